use std::{path::Path, time::Instant};

use indicatif::{MultiProgress, ParallelProgressIterator, ProgressBar};
use log::{debug, info};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    compose::{Surface, render_slice},
    error::{Result, ViewerError},
    read::Volume,
    selection::Rect,
    viewport::Viewport,
    write::{export_filename, write_png},
};

/// How every slice of a batch export is framed.
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub viewport: Viewport,
    pub crop: Option<Rect>,
    /// Defaults to the slice size.
    pub surface: Option<Surface>,
}

/// Render slices `start_at_slice..=stop_at_slice` of `volume` into
/// `dest_path` as `image_{slice}.png`. Returns the number of files written.
pub fn export_range(
    volume: &Volume,
    dest_path: &Path,             // directory
    start_at_slice: usize,        // 1-indexed
    stop_at_slice: Option<usize>, // 1-indexed, last slice if not given
    settings: &ExportSettings,
    multi_progress: &MultiProgress,
) -> Result<usize> {
    let t0 = Instant::now();

    let header = volume.header();
    let nz = header.slices();
    info!(
        "dimensions: {nz}x{}x{}",
        header.height(),
        header.width()
    );

    let stop = stop_at_slice.unwrap_or(nz);
    if stop > nz {
        return Err(ViewerError::OutOfRange {
            index: stop - 1,
            slices: nz,
        });
    }
    if start_at_slice == 0 || start_at_slice > stop {
        return Err(ViewerError::InvalidRange {
            start: start_at_slice,
            stop,
        });
    }
    let start = start_at_slice - 1;

    let surface = settings
        .surface
        .unwrap_or(Surface::new(header.width() as u32, header.height() as u32));
    debug!("surface: {surface:?}, viewport: {:?}", settings.viewport);

    let idxs: Vec<usize> = (start..stop).collect();
    let len = idxs.len();
    let progress = multi_progress.add(ProgressBar::new(len as u64));

    let res: Result<Vec<()>> = idxs
        .into_par_iter()
        .progress_with(progress.clone())
        .map(|z| -> Result<()> {
            let frame = render_slice(
                volume,
                z,
                &settings.viewport,
                settings.crop.as_ref(),
                Some(surface),
            )?;
            let Some(frame) = frame else {
                return Ok(());
            };
            let out_path = dest_path.join(export_filename(z));
            write_png(&out_path, &frame)?;
            debug!("created {out_path:?}");
            Ok(())
        })
        .collect();
    res?;

    progress.finish();
    multi_progress.remove(&progress);

    info!("export of {len} slices done in {:?}", t0.elapsed());

    Ok(len)
}

#[cfg(test)]
mod tests {
    use indicatif::ProgressDrawTarget;

    use super::*;
    use crate::read::{VolumeBuffer, VolumeHeader};

    fn volume(slices: usize) -> Volume {
        let header = VolumeHeader::from_shape(4, 2, slices).unwrap();
        let samples = (0..8 * slices).map(|v| (v % 8) as i16).collect();
        Volume::new(header, VolumeBuffer::new(samples))
    }

    fn hidden() -> MultiProgress {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn exports_requested_range() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_range(
            &volume(5),
            dir.path(),
            2,
            Some(4),
            &ExportSettings::default(),
            &hidden(),
        )
        .unwrap();
        assert_eq!(written, 3);
        for z in 0..5 {
            let exists = dir.path().join(export_filename(z)).exists();
            assert_eq!(exists, (1..4).contains(&z), "slice {z}");
        }
        let img = image::open(dir.path().join("image_1.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(3, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn custom_surface_and_crop() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExportSettings {
            crop: Some(Rect::new(0.0, 0.0, 2.0, 1.0)),
            surface: Some(Surface::new(8, 8)),
            ..Default::default()
        };
        export_range(&volume(1), dir.path(), 1, None, &settings, &hidden()).unwrap();
        let img = image::open(dir.path().join("image_0.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert!(img.get_pixel(7, 0).0[0] > img.get_pixel(0, 0).0[0]);
    }

    #[test]
    fn rejects_bad_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let vol = volume(3);
        let settings = ExportSettings::default();
        assert!(matches!(
            export_range(&vol, dir.path(), 0, None, &settings, &hidden()),
            Err(ViewerError::InvalidRange { start: 0, stop: 3 })
        ));
        assert!(matches!(
            export_range(&vol, dir.path(), 3, Some(2), &settings, &hidden()),
            Err(ViewerError::InvalidRange { start: 3, stop: 2 })
        ));
        assert!(matches!(
            export_range(&vol, dir.path(), 1, Some(4), &settings, &hidden()),
            Err(ViewerError::OutOfRange { index: 3, slices: 3 })
        ));
    }
}
