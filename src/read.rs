use std::{fs, path::Path};

use byteorder::ByteOrder;
use log::{info, warn};

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleType {
    pub bytes: u8,
    pub signed: bool,
}

impl SampleType {
    pub const INT16: SampleType = SampleType {
        bytes: 2,
        signed: true,
    };

    pub fn name(&self) -> String {
        let prefix = if self.signed { "" } else { "u" };
        format!("{prefix}int{}", u32::from(self.bytes) * 8)
    }
}

/// Dimensions and sample layout of a volume, as handed over by the loader.
///
/// `dims` follows the usual container convention: `dims[0]` is the number of
/// axes, `dims[1]` the width, `dims[2]` the height and `dims[3]` the number
/// of slices. Anything else the loader knows about the file can be attached
/// with [`VolumeHeader::with_field`] and only shows up in
/// [`VolumeHeader::display_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeHeader {
    dims: Vec<usize>,
    sample_type: SampleType,
    extra: Vec<(String, String)>,
}

impl VolumeHeader {
    pub fn new(dims: Vec<usize>, sample_type: SampleType) -> Result<Self> {
        if dims.len() < 4 {
            return Err(ViewerError::InvalidDimensions(format!(
                "expected at least 4 dims entries, got {}",
                dims.len()
            )));
        }
        if dims[1] == 0 || dims[2] == 0 {
            return Err(ViewerError::InvalidDimensions(format!(
                "slice plane must not be empty, got {}x{}",
                dims[1], dims[2]
            )));
        }
        Ok(Self {
            dims,
            sample_type,
            extra: Vec::new(),
        })
    }

    /// Header for a plain 3D stack of int16 samples.
    pub fn from_shape(width: usize, height: usize, slices: usize) -> Result<Self> {
        Self::new(vec![3, width, height, slices], SampleType::INT16)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn width(&self) -> usize {
        self.dims[1]
    }

    pub fn height(&self) -> usize {
        self.dims[2]
    }

    pub fn slices(&self) -> usize {
        self.dims[3]
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Number of samples per slice, including the padding to a multiple of 4.
    pub fn slice_size(&self) -> usize {
        (self.width() * self.height()).div_ceil(4) * 4
    }

    pub fn display_table(&self) -> Vec<(String, String)> {
        let mut table = vec![
            ("dims".to_string(), format!("{:?}", self.dims)),
            ("datatype".to_string(), self.sample_type.name()),
            (
                "bitpix".to_string(),
                (u32::from(self.sample_type.bytes) * 8).to_string(),
            ),
        ];
        table.extend(self.extra.iter().cloned());
        table
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeBuffer {
    samples: Vec<i16>,
}

impl VolumeBuffer {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Reinterpret raw bytes as int16 samples in byte order `B`. A trailing
    /// odd byte is dropped.
    pub fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
        let count = bytes.len() / 2;
        let mut samples = vec![0i16; count];
        B::read_i16_into(&bytes[..count * 2], &mut samples);
        Self { samples }
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Returns the samples of slice `index`, padding included.
pub fn extract_slice<'a>(
    buffer: &'a [i16],
    header: &VolumeHeader,
    index: usize,
) -> Result<&'a [i16]> {
    if index >= header.slices() {
        return Err(ViewerError::OutOfRange {
            index,
            slices: header.slices(),
        });
    }

    let slice_size = header.slice_size();
    let start = slice_size * index;

    buffer
        .get(start..start + slice_size)
        .ok_or(ViewerError::SliceOutOfBounds {
            offset: start,
            len: slice_size,
            available: buffer.len(),
        })
}

#[derive(Debug)]
pub struct Volume {
    header: VolumeHeader,
    buffer: VolumeBuffer,
}

impl Volume {
    pub fn new(header: VolumeHeader, buffer: VolumeBuffer) -> Self {
        Self { header, buffer }
    }

    /// Load a headerless file of int16 samples stored in byte order `B`.
    pub fn open_raw<B: ByteOrder>(path: &Path, header: VolumeHeader) -> Result<Self> {
        let bytes = fs::read(path)?;
        let buffer = VolumeBuffer::from_bytes::<B>(&bytes);
        info!(
            "loaded {path:?}: {}x{}x{}, {} samples",
            header.slices(),
            header.height(),
            header.width(),
            buffer.len()
        );
        let expected = header.slice_size() * header.slices();
        if buffer.len() < expected {
            warn!(
                "buffer holds {} samples, {expected} needed for all slices",
                buffer.len()
            );
        }
        Ok(Self::new(header, buffer))
    }

    pub fn header(&self) -> &VolumeHeader {
        &self.header
    }

    pub fn buffer(&self) -> &VolumeBuffer {
        &self.buffer
    }

    pub fn get_slice(&self, z: usize) -> Result<&[i16]> {
        extract_slice(self.buffer.as_slice(), &self.header, z)
    }
}
