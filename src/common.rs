use std::path::Path;

use byteorder::{BigEndian, LittleEndian};

use crate::{
    error::Result,
    read::{Volume, VolumeHeader},
};

#[derive(Debug, clap::ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgEndianess {
    #[default]
    Little,
    Big,
}

/// Layout of a headerless int16 volume, shared by the command line tools.
#[derive(clap::Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Samples per row.
    #[arg(long)]
    pub width: usize,
    /// Rows per slice.
    #[arg(long)]
    pub height: usize,
    /// Number of slices.
    #[arg(long)]
    pub slices: usize,
    /// Byte order of the samples.
    #[arg(long, value_enum, default_value = "little")]
    pub endianess: ArgEndianess,
}

impl LayoutArgs {
    pub fn header(&self) -> Result<VolumeHeader> {
        let endianess = match self.endianess {
            ArgEndianess::Little => "little",
            ArgEndianess::Big => "big",
        };
        Ok(VolumeHeader::from_shape(self.width, self.height, self.slices)?
            .with_field("endianess", endianess))
    }

    pub fn open(&self, path: &Path) -> Result<Volume> {
        let header = self.header()?.with_field("source", path.display());
        match self.endianess {
            ArgEndianess::Little => Volume::open_raw::<LittleEndian>(path, header),
            ArgEndianess::Big => Volume::open_raw::<BigEndian>(path, header),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn layout(endianess: ArgEndianess) -> LayoutArgs {
        LayoutArgs {
            width: 2,
            height: 2,
            slices: 1,
            endianess,
        }
    }

    #[test]
    fn opens_raw_file_in_requested_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vol.raw");
        fs::write(&path, [0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]).unwrap();

        let le = layout(ArgEndianess::Little).open(&path).unwrap();
        assert_eq!(le.get_slice(0).unwrap(), &[256, 512, 768, 1024]);
        let be = layout(ArgEndianess::Big).open(&path).unwrap();
        assert_eq!(be.get_slice(0).unwrap(), &[1, 2, 3, 4]);

        let table = be.header().display_table();
        assert_eq!(table[3], ("endianess".to_string(), "big".to_string()));
        assert_eq!(table[4].0, "source");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = layout(ArgEndianess::Little).open(&dir.path().join("nope.raw"));
        assert!(matches!(res, Err(crate::ViewerError::Io(_))));
    }
}
