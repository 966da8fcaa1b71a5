use image::RgbaImage;

use crate::foundation::error::{BadgeloopError, BadgeloopResult};

/// Decoded source bitmap in straight-alpha RGBA8.
///
/// Sources without an alpha channel are fully opaque. Composition never mutates a
/// `NormalizedImage`; every frame is painted onto a fresh canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedImage {
    rgba: RgbaImage,
}

impl NormalizedImage {
    /// Wrap an already decoded bitmap.
    pub fn new(rgba: RgbaImage) -> BadgeloopResult<Self> {
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(BadgeloopError::unsupported_image(
                "image has zero width or height",
            ));
        }
        Ok(Self { rgba })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Borrow the underlying bitmap.
    pub fn pixels(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Return `true` if any pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.rgba.pixels().any(|p| p.0[3] < 255)
    }

    /// Consume into the underlying bitmap.
    pub fn into_inner(self) -> RgbaImage {
        self.rgba
    }
}

/// Extra processing applied while loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Key out near-white pixels of images without transparency.
    pub remove_white_bg: bool,
    /// A pixel is white when R, G and B are all `>=` this value.
    pub white_threshold: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            remove_white_bg: false,
            white_threshold: 250,
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP) into RGBA8.
pub fn load_image(bytes: &[u8]) -> BadgeloopResult<NormalizedImage> {
    load_image_with(bytes, &LoadOptions::default())
}

/// [`load_image`] with white-background removal.
///
/// Removal only runs when the decoded image is fully opaque; sources that already carry
/// transparency are kept as-is.
pub fn load_image_with(bytes: &[u8], opts: &LoadOptions) -> BadgeloopResult<NormalizedImage> {
    if bytes.is_empty() {
        return Err(BadgeloopError::unsupported_image("empty payload"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BadgeloopError::unsupported_image(e.to_string()))?;
    let img = NormalizedImage::new(dyn_img.to_rgba8())?;

    if opts.remove_white_bg && !img.has_transparency() {
        return Ok(remove_white_background(img, opts.white_threshold));
    }
    Ok(img)
}

/// Make every pixel whose R, G and B are all `>= threshold` fully transparent.
///
/// Color channels are left untouched so resampling near the keyed edge stays clean.
pub fn remove_white_background(img: NormalizedImage, threshold: u8) -> NormalizedImage {
    let mut rgba = img.into_inner();
    for px in rgba.pixels_mut() {
        let [r, g, b, _] = px.0;
        if r >= threshold && g >= threshold && b >= threshold {
            px.0[3] = 0;
        }
    }
    NormalizedImage { rgba }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
