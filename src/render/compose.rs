use std::borrow::Borrow;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::decode::NormalizedImage;
use crate::foundation::core::{Background, Canvas};
use crate::foundation::error::{BadgeloopError, BadgeloopResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::layout::fit::{ColumnLayout, Placement, Size, place_single};

/// A composed canvas-sized frame in straight-alpha RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rgba: RgbaImage,
}

impl Frame {
    /// Frame filled with the background and nothing else.
    pub fn blank(canvas: Canvas, background: Background) -> Self {
        Self {
            rgba: RgbaImage::from_pixel(canvas.width, canvas.height, background.fill().to_pixel()),
        }
    }

    /// Wrap an existing bitmap as a frame.
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Borrow the pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Consume into the pixel buffer.
    pub fn into_rgba(self) -> RgbaImage {
        self.rgba
    }

    fn paint(&mut self, image: &NormalizedImage, at: Placement) {
        let src = image.pixels();
        if (src.width(), src.height()) == (at.size.width, at.size.height) {
            imageops::overlay(&mut self.rgba, src, at.x, at.y);
        } else {
            let scaled = resample(image, at.size);
            imageops::overlay(&mut self.rgba, &scaled, at.x, at.y);
        }
    }
}

/// Lanczos3 resize. Sources with transparency are filtered in premultiplied space.
fn resample(image: &NormalizedImage, to: Size) -> RgbaImage {
    if !image.has_transparency() {
        return imageops::resize(image.pixels(), to.width, to.height, FilterType::Lanczos3);
    }

    let mut premul = image.pixels().clone();
    premultiply_rgba8_in_place(&mut premul);
    let mut scaled = imageops::resize(&premul, to.width, to.height, FilterType::Lanczos3);
    unpremultiply_rgba8_in_place(&mut scaled);
    scaled
}

fn size_of(image: &NormalizedImage) -> Size {
    Size::new(image.width(), image.height())
}

/// Fit one image into the padded canvas, keeping its aspect ratio, centered.
///
/// The background is painted first and the image is composited over it with its own alpha.
pub fn compose_single(
    image: &NormalizedImage,
    canvas: Canvas,
    background: Background,
    padding: u32,
) -> Frame {
    let mut frame = Frame::blank(canvas, background);
    let at = place_single(size_of(image), canvas, padding);
    tracing::trace!(x = at.x, y = at.y, w = at.size.width, h = at.size.height, "place single");
    frame.paint(image, at);
    frame
}

/// Lay out `images` side by side in equal columns separated by `padding`.
///
/// A single image is delegated to [`compose_single`], so both paths are pixel-identical.
/// Accepts owned images or references, so groups can borrow from one decoded list.
pub fn compose_group<I: Borrow<NormalizedImage>>(
    images: &[I],
    canvas: Canvas,
    background: Background,
    padding: u32,
) -> BadgeloopResult<Frame> {
    match images {
        [] => Err(BadgeloopError::EmptyGroup),
        [only] => Ok(compose_single(only.borrow(), canvas, background, padding)),
        _ => {
            let layout = ColumnLayout::new(canvas, padding, images.len());
            tracing::trace!(
                columns = layout.count,
                column_width = layout.column_width,
                start_x = layout.start_x,
                "column layout"
            );

            let mut frame = Frame::blank(canvas, background);
            for (i, image) in images.iter().enumerate() {
                let image = image.borrow();
                let at = layout.place(i, size_of(image));
                frame.paint(image, at);
            }
            Ok(frame)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
