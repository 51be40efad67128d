use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use indicatif::MultiProgress;
use slice_viewer::{
    Point, Rect, Surface, Viewport,
    common::LayoutArgs,
    convert::{ExportSettings, export_range},
};

#[derive(Parser, Debug)]
struct Args {
    /// Path to the input volume: int16 samples without any header.
    raw_path: PathBuf,
    /// Directory the `image_{slice}.png` files are written to.
    dest_path: PathBuf,
    #[command(flatten)]
    layout: LayoutArgs,
    /// First slice to export, 1-indexed.
    #[arg(long, default_value_t = 1)]
    start: usize,
    /// Last slice to export, 1-indexed. Defaults to the last slice.
    #[arg(long)]
    stop: Option<usize>,
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_x: f32,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_y: f32,
    /// Region in slice coordinates to stretch over the whole output.
    #[arg(long, num_args = 4, value_names = ["X", "Y", "W", "H"], allow_negative_numbers = true)]
    crop: Option<Vec<f32>>,
    /// Output width, defaults to the slice width.
    #[arg(long)]
    canvas_width: Option<u32>,
    /// Output height, defaults to the slice height.
    #[arg(long)]
    canvas_height: Option<u32>,
}

impl Args {
    fn settings(&self) -> ExportSettings {
        let crop = match self.crop.as_deref() {
            Some(&[x, y, w, h]) => Some(Rect::new(x, y, w, h)),
            _ => None,
        };
        ExportSettings {
            viewport: Viewport::new(self.zoom, Point::new(self.pan_x, self.pan_y)),
            crop,
            surface: Some(Surface::new(
                self.canvas_width.unwrap_or(self.layout.width as u32),
                self.canvas_height.unwrap_or(self.layout.height as u32),
            )),
        }
    }
}

fn main() -> Result<(), Box<dyn Error + Sync + Send>> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);
    let multi_progress = MultiProgress::new();

    let args = Args::parse();

    let volume = args.layout.open(&args.raw_path)?;
    fs::create_dir_all(&args.dest_path)?;

    let settings = args.settings();

    export_range(
        &volume,
        &args.dest_path,
        args.start,
        args.stop,
        &settings,
        &multi_progress,
    )?;

    Ok(())
}
