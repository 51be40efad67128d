use log::debug;

use crate::{
    error::Result,
    read::Volume,
    render::{Raster, blank, is_empty, normalize},
    resample::{resample_region, sample_bilinear},
    selection::Rect,
    viewport::{Point, Viewport},
};

/// Size of the drawing surface frames are composited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

/// Draw `raster` onto a black `surface`.
///
/// First pass: every surface pixel is mapped back through the viewport and
/// bilinearly sampled if it lands inside the raster, so the cost follows the
/// surface size and not the zoom. Second pass, only with a non-degenerate
/// `selection`: the selected region of the untransformed raster stretched
/// over the whole surface. The second pass is drawn last and covers the
/// first.
pub fn composite(
    raster: &Raster,
    viewport: &Viewport,
    selection: Option<&Rect>,
    surface: Surface,
) -> Raster {
    let mut frame = blank(surface.width, surface.height);
    if is_empty(raster) {
        return frame;
    }

    let (width, height) = (raster.width() as f32, raster.height() as f32);
    for (sx, sy, texel) in frame.enumerate_pixels_mut() {
        let src = viewport.screen_to_source(Point::new(sx as f32, sy as f32));
        if src.x >= 0.0 && src.y >= 0.0 && src.x < width && src.y < height {
            *texel = sample_bilinear(raster, src.x, src.y);
        }
    }

    if let Some(rect) = selection.filter(|r| !r.is_degenerate()) {
        frame = resample_region(raster, rect, surface.width, surface.height);
    }

    frame
}

/// Extract, window and composite slice `index` of `volume`.
///
/// Returns `Ok(None)` when there is no surface to draw on.
pub fn render_slice(
    volume: &Volume,
    index: usize,
    viewport: &Viewport,
    selection: Option<&Rect>,
    surface: Option<Surface>,
) -> Result<Option<Raster>> {
    let Some(surface) = surface else {
        debug!("no display surface, skipping render of slice {index}");
        return Ok(None);
    };

    let header = volume.header();
    let samples = volume.get_slice(index)?;
    let raster = normalize(samples, header.width(), header.height());

    Ok(Some(composite(&raster, viewport, selection, surface)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        read::{VolumeBuffer, VolumeHeader},
        render::BLACK,
    };

    fn gray(width: u32, height: u32, values: &[u8]) -> Raster {
        let data = values.iter().flat_map(|&v| [v, v, v, 255]).collect();
        Raster::from_raw(width, height, data).unwrap()
    }

    fn column(frame: &Raster, x: u32) -> Vec<u8> {
        (0..frame.height()).map(|y| frame.get_pixel(x, y)[0]).collect()
    }

    #[test]
    fn identity_viewport_copies_raster() {
        let src = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        let frame = composite(&src, &Viewport::default(), None, Surface::new(3, 2));
        assert_eq!(frame, src);
    }

    #[test]
    fn pan_shifts_and_clips() {
        let src = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        let vp = Viewport::new(1.0, Point::new(1.0, 0.0));
        let frame = composite(&src, &vp, None, Surface::new(3, 2));
        assert_eq!(column(&frame, 0), [0, 0]);
        assert_eq!(column(&frame, 1), [1, 4]);
        assert_eq!(column(&frame, 2), [2, 5]);
        assert_eq!(frame.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn zoom_interpolates_between_texels() {
        let src = gray(2, 1, &[0, 255]);
        let vp = Viewport::new(2.0, Point::ZERO);
        let frame = composite(&src, &vp, None, Surface::new(5, 3));
        let row: Vec<u8> = (0..5).map(|x| frame.get_pixel(x, 0)[0]).collect();
        assert_eq!(row, [0, 128, 255, 255, 0]);
        assert_eq!(*frame.get_pixel(0, 2), BLACK);
    }

    #[test]
    fn pan_and_zoom_combine() {
        let src = gray(3, 2, &[10, 20, 30, 40, 50, 60]);
        let vp = Viewport::new(2.0, Point::new(1.0, 1.0));
        let frame = composite(&src, &vp, None, Surface::new(8, 6));
        for y in 0..2 {
            for x in 0..3 {
                let at = vp.source_to_screen(Point::new(x as f32, y as f32));
                assert_eq!(
                    frame.get_pixel(at.x as u32, at.y as u32),
                    src.get_pixel(x, y),
                    "texel ({x}, {y})"
                );
            }
        }
        assert_eq!(*frame.get_pixel(0, 0), BLACK);
        assert_eq!(*frame.get_pixel(7, 1), BLACK);
        assert_eq!(*frame.get_pixel(1, 5), BLACK);
        // (1, 4) maps to (0, 1.5), clamped onto the bottom row
        assert_eq!(frame.get_pixel(1, 4)[0], 40);
    }

    #[test]
    fn zoom_out_shrinks_into_corner() {
        let values: Vec<u8> = (0..16).map(|v| (v * 10 + 5) as u8).collect();
        let src = gray(4, 4, &values);
        let vp = Viewport::new(0.5, Point::ZERO);
        let frame = composite(&src, &vp, None, Surface::new(4, 4));
        assert_eq!(frame.get_pixel(0, 0)[0], 5);
        assert_eq!(frame.get_pixel(1, 0)[0], 25);
        assert_eq!(frame.get_pixel(1, 1)[0], 105);
        assert_eq!(*frame.get_pixel(2, 0), BLACK);
        assert_eq!(*frame.get_pixel(0, 2), BLACK);
        assert_eq!(*frame.get_pixel(3, 3), BLACK);
    }

    #[test]
    fn selection_crop_wins_over_viewport() {
        let values: Vec<u8> = (0..16).map(|v| (v * 10) as u8).collect();
        let src = gray(4, 4, &values);
        let vp = Viewport::new(3.0, Point::new(-7.0, 2.0));
        let rect = Rect::new(2.0, 2.0, 2.0, 2.0);
        let frame = composite(&src, &vp, Some(&rect), Surface::new(4, 4));
        assert_eq!(frame, resample_region(&src, &rect, 4, 4));
        assert_eq!(frame.get_pixel(0, 0)[0], 100);
    }

    #[test]
    fn degenerate_selection_is_not_drawn() {
        let src = gray(2, 2, &[10, 20, 30, 40]);
        let rect = Rect::new(1.0, 1.0, 0.0, 5.0);
        let frame = composite(&src, &Viewport::default(), Some(&rect), Surface::new(2, 2));
        assert_eq!(frame, src);
    }

    #[test]
    fn render_without_surface_is_noop() {
        let header = VolumeHeader::from_shape(2, 2, 1).unwrap();
        let volume = Volume::new(header, VolumeBuffer::new(vec![0, 1, 2, 3]));
        let out = render_slice(&volume, 0, &Viewport::default(), None, None).unwrap();
        assert!(out.is_none());
        let out = render_slice(&volume, 0, &Viewport::default(), None, Some(Surface::new(2, 2)))
            .unwrap()
            .unwrap();
        assert_eq!(out.get_pixel(1, 1)[0], 255);
        let surface = Some(Surface::new(2, 2));
        assert!(render_slice(&volume, 1, &Viewport::default(), None, surface).is_err());
    }
}
