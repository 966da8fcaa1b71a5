//! Frame composition.
//!
//! Compositors paint the background first and then alpha-composite each fitted image on top.

/// Single-item and multi-item compositors.
pub mod compose;
/// Badge grouping with cyclic padding.
pub mod group;
