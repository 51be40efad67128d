use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::codecs::png::PngEncoder;

use crate::{error::Result, render::Raster};

pub fn export_filename(slice: usize) -> String {
    format!("image_{slice}.png")
}

pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_png_to(&mut out, raster)?;
    Ok(out)
}

/// Write `raster` as PNG to a new file; an existing file is never replaced.
pub fn write_png(filename: &Path, raster: &Raster) -> Result<()> {
    let out_file = File::create_new(filename)?;
    let mut writer = BufWriter::new(out_file);
    write_png_to(&mut writer, raster)?;
    writer.flush()?;
    Ok(())
}

fn write_png_to<W: Write>(writer: W, raster: &Raster) -> Result<()> {
    raster.write_with_encoder(PngEncoder::new(writer))?;
    Ok(())
}
