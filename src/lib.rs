//! Badgeloop turns still badge and logo images into one looping animated GIF.
//!
//! The flow is one-directional:
//!
//! - Decode bytes into [`NormalizedImage`]s with [`load_image`]
//! - Group badges with [`group_images`] and compose frames with [`compose_group`] and
//!   [`compose_single`]
//! - Encode `(Frame, duration_ms)` pairs with [`assemble_animation`]
//!
//! [`generate_gif`] and [`generate_gif_from_bytes`] run the whole thing from a [`GifConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Source image handling.
pub mod assets;
/// Category labels, asset names and order reconciliation.
pub mod catalog;
/// Encoding sinks.
pub mod encode;
/// Canvas geometry.
pub mod layout;
/// End-to-end composition and encoding.
pub mod pipeline;
/// Frame composition.
pub mod render;

pub use crate::foundation::config::{DEFAULT_SIZE, GifConfig, MAX_DIMENSION, parse_size};
pub use crate::foundation::core::{Background, Canvas, Rgba8};
pub use crate::foundation::error::{BadgeloopError, BadgeloopResult};

pub use crate::assets::color::resolve_color;
pub use crate::assets::decode::{LoadOptions, NormalizedImage, load_image, load_image_with};
pub use crate::assets::discover::{DiscoveredImages, discover_images, resolve_unique_path};
pub use crate::catalog::{
    DisplayConfig, asset_tags, category_config, display_name, reconcile_order,
};
pub use crate::encode::gif::{
    AnimationInfo, GifSink, GifSinkOpts, assemble_animation, assemble_animation_with,
    inspect_animation,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{
    DecodePolicy, frame_count, generate_gif, generate_gif_from_bytes, plan_frames,
};
pub use crate::render::compose::{Frame, compose_group, compose_single};
pub use crate::render::group::group_images;
