use crate::foundation::error::{BadgeloopError, BadgeloopResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> BadgeloopResult<Self> {
        if width == 0 || height == 0 {
            return Err(BadgeloopError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is fully opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Channels as a `(r, g, b, a)` tuple.
    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Channels as an `image` crate pixel.
    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Canvas fill painted under every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// A concrete color.
    Solid(Rgba8),
    /// No fill; the frame starts fully transparent.
    Transparent,
}

impl Background {
    /// Parse a background specification.
    ///
    /// `"transparent"` (any case) selects [`Background::Transparent`]; everything else goes
    /// through [`crate::resolve_color`].
    pub fn parse(spec: &str) -> BadgeloopResult<Self> {
        if spec.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        crate::assets::color::resolve_color(spec).map(Self::Solid)
    }

    /// RGBA value used to fill the canvas.
    pub fn fill(self) -> Rgba8 {
        match self {
            Self::Solid(c) => c,
            Self::Transparent => Rgba8::transparent(),
        }
    }

    /// Return `true` for [`Background::Transparent`].
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid(Rgba8::rgb(255, 255, 255))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
