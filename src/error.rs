use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("slice index {index} outside of volume with {slices} slices")]
    OutOfRange { index: usize, slices: usize },

    #[error("slice at offset {offset} with {len} samples exceeds buffer of {available} samples")]
    SliceOutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("invalid slice range {start}..={stop}")]
    InvalidRange { start: usize, stop: usize },

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
