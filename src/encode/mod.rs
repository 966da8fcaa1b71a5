//! Encoding sinks.
//!
//! Sinks consume composed frames in display order together with their durations.

/// GIF89a sink and artifact inspection.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
