use image::{Rgba, RgbaImage};
use log::debug;

/// An RGBA8 slice image.
pub type Raster = RgbaImage;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque black raster.
pub fn blank(width: u32, height: u32) -> Raster {
    RgbaImage::from_pixel(width, height, BLACK)
}

pub fn is_empty(raster: &Raster) -> bool {
    raster.width() == 0 || raster.height() == 0
}

/// Window `samples` into 8 bit gray using their own min and max.
///
/// The first `width * height` samples become texels; the min/max is taken
/// over everything passed in, so slice padding takes part in the window. A
/// constant slice has no range to stretch and comes out all black.
pub fn normalize(samples: &[i16], width: usize, height: usize) -> Raster {
    let mut raster = blank(width as u32, height as u32);
    if samples.is_empty() {
        return raster;
    }

    let (vmin, vmax) = samples
        .iter()
        .fold((i16::MAX, i16::MIN), |a, &b| (a.0.min(b), a.1.max(b)));
    let range = i32::from(vmax) - i32::from(vmin);
    debug!("window: min={vmin} max={vmax}");

    if range == 0 {
        debug!("constant slice (value {vmin}), using black fallback");
    }

    let to_gray = |v: i16| -> u8 {
        if range == 0 {
            return 0;
        }
        let c = (i32::from(v) - i32::from(vmin)) as f32 / range as f32 * 255.0;
        c.round().clamp(0.0, 255.0) as u8
    };

    for (texel, &v) in raster.pixels_mut().zip(samples.iter().take(width * height)) {
        let c = to_gray(v);
        *texel = Rgba([c, c, c, 255]);
    }

    raster
}
