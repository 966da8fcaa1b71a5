//! Integer geometry for placing images on a frame.
//!
//! All offsets use floor division. Sizes are never zero.

use crate::foundation::core::Canvas;

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Top-left position of a placed image, relative to the canvas origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal offset.
    pub x: i64,
    /// Vertical offset.
    pub y: i64,
    /// Scaled image size.
    pub size: Size,
}

/// Interior of the canvas left after removing `padding` on every side, clamped to 1x1.
pub fn safe_box(canvas: Canvas, padding: u32) -> Size {
    let inset = u64::from(padding) * 2;
    let shrink = |dim: u32| u64::from(dim).saturating_sub(inset).max(1) as u32;
    Size::new(shrink(canvas.width), shrink(canvas.height))
}

/// Largest size with the source aspect ratio that fits inside `bound`.
///
/// When the ratios differ, the constrained side is recomputed and rounded half to even;
/// matching ratios map straight onto `bound`. The source may be scaled up.
pub fn contain_size(src: Size, bound: Size) -> Size {
    let (sw, sh) = (u64::from(src.width.max(1)), u64::from(src.height.max(1)));
    let (bw, bh) = (u64::from(bound.width.max(1)), u64::from(bound.height.max(1)));

    // Compare sw/sh against bw/bh without floating point.
    let lhs = sw * bh;
    let rhs = bw * sh;
    let size = if lhs > rhs {
        // Wider than the box: width is the limit.
        let h = (sh as f64 / sw as f64 * bw as f64).round_ties_even() as u64;
        Size::new(bw as u32, h.clamp(1, bh) as u32)
    } else if lhs < rhs {
        let w = (sw as f64 / sh as f64 * bh as f64).round_ties_even() as u64;
        Size::new(w.clamp(1, bw) as u32, bh as u32)
    } else {
        Size::new(bw as u32, bh as u32)
    };
    tracing::trace!(?src, ?bound, ?size, "contain fit");
    size
}

/// Place one image centered on the full canvas inside the padded safe box.
pub fn place_single(src: Size, canvas: Canvas, padding: u32) -> Placement {
    let size = contain_size(src, safe_box(canvas, padding));
    Placement {
        x: centered(canvas.width, size.width),
        y: centered(canvas.height, size.height),
        size,
    }
}

/// Column geometry for an `n`-item frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Padded interior of the canvas.
    pub safe: Size,
    /// Gap between adjacent columns.
    pub spacing: u32,
    /// Width of every column.
    pub column_width: u32,
    /// Left edge of the first column.
    pub start_x: i64,
    /// Canvas padding.
    pub padding: u32,
    /// Number of columns.
    pub count: usize,
}

impl ColumnLayout {
    /// Split the safe box into `count` equal columns separated by `padding`.
    ///
    /// Remainder pixels from the integer split are left as slack rather than distributed.
    pub fn new(canvas: Canvas, padding: u32, count: usize) -> Self {
        let n = count.max(1) as i64;
        let safe = safe_box(canvas, padding);
        let spacing = if count > 1 { padding } else { 0 };
        let gaps = i64::from(spacing) * (n - 1);

        let available_width = (i64::from(safe.width) - gaps).max(1);
        let column_width = (available_width / n).max(1);
        let total_content_width = column_width * n + gaps;
        let start_x =
            i64::from(padding) + (i64::from(safe.width) - total_content_width).div_euclid(2);

        Self {
            safe,
            spacing,
            column_width: column_width as u32,
            start_x,
            padding,
            count,
        }
    }

    /// Left edge of column `index`.
    pub fn column_x(&self, index: usize) -> i64 {
        self.start_x + index as i64 * (i64::from(self.column_width) + i64::from(self.spacing))
    }

    /// Place an image of size `src` in column `index`, centered in both axes.
    pub fn place(&self, index: usize, src: Size) -> Placement {
        let size = contain_size(src, Size::new(self.column_width, self.safe.height));
        Placement {
            x: self.column_x(index) + centered(self.column_width, size.width),
            y: i64::from(self.padding) + centered(self.safe.height, size.height),
            size,
        }
    }
}

/// Floor-centered offset of `inner` within `outer`. Negative when `inner` is larger.
fn centered(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
