//! Source image handling: color specs, decoding and folder discovery.

/// Background color specification parsing.
pub mod color;
/// Byte-to-bitmap decoding into RGBA8.
pub mod decode;
/// Input folder scanning and output path selection.
pub mod discover;
