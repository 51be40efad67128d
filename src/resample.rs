use image::Rgba;

use crate::render::{BLACK, Raster, blank, is_empty};
use crate::selection::Rect;

/// Bilinear lookup at a fractional source position.
///
/// The right and bottom neighbours are clamped to the last column/row, so
/// the lookup never wraps and never reads outside the raster. Alpha is
/// always opaque.
#[inline]
pub fn sample_bilinear(raster: &Raster, x: f32, y: f32) -> Rgba<u8> {
    if is_empty(raster) {
        return BLACK;
    }
    let (width, height) = raster.dimensions();

    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let dx = x - x0 as f32;
    let dy = y - y0 as f32;
    let one_minus_dx = 1.0 - dx;
    let one_minus_dy = 1.0 - dy;

    let p00 = raster.get_pixel(x0, y0);
    let p01 = raster.get_pixel(x1, y0);
    let p10 = raster.get_pixel(x0, y1);
    let p11 = raster.get_pixel(x1, y1);

    let mut out = BLACK;
    for c in 0..3 {
        let v0 = f32::from(p00[c]).mul_add(one_minus_dx, f32::from(p01[c]) * dx);
        let v1 = f32::from(p10[c]).mul_add(one_minus_dx, f32::from(p11[c]) * dx);
        out[c] = v0.mul_add(one_minus_dy, v1 * dy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Scale the whole raster by `scale`; the output is
/// `floor(width * scale) x floor(height * scale)`.
pub fn resample(raster: &Raster, scale: f32) -> Raster {
    if is_empty(raster) || !(scale.is_finite() && scale > 0.0) {
        return blank(0, 0);
    }

    let width = (raster.width() as f32 * scale).floor() as u32;
    let height = (raster.height() as f32 * scale).floor() as u32;
    let mut out = blank(width, height);

    for y in 0..height {
        let src_y = y as f32 / scale;
        for x in 0..width {
            let src_x = x as f32 / scale;
            out.put_pixel(x, y, sample_bilinear(raster, src_x, src_y));
        }
    }

    out
}

/// Stretch the part of `raster` under `region` onto a `width x height`
/// raster. Parts of the region outside the source repeat its edge texels.
pub fn resample_region(raster: &Raster, region: &Rect, width: u32, height: u32) -> Raster {
    let mut out = blank(width, height);
    if is_empty(raster) {
        return out;
    }

    let step_x = region.w / width as f32;
    let step_y = region.h / height as f32;

    for y in 0..height {
        let src_y = region.y + y as f32 * step_y;
        for x in 0..width {
            let src_x = region.x + x as f32 * step_x;
            out.put_pixel(x, y, sample_bilinear(raster, src_x, src_y));
        }
    }

    out
}
