//! # slice-viewer
//!
//! Renders single slices of a 16 bit volume (a stack of grayscale planes as
//! found in medical imaging containers) for interactive viewing and export.
//!
//! Decoding the container is left to the caller: the library takes the
//! volume dimensions as a [`VolumeHeader`] and the samples as a flat
//! [`VolumeBuffer`]. From there a slice goes through
//!  - extraction ([`read::extract_slice`], slices are padded to a multiple
//!    of 4 samples),
//!  - windowing to 8 bit gray using the slice's own min/max
//!    ([`render::normalize`]),
//!  - bilinear resampling on zoom ([`resample::resample`]),
//!  - compositing with the pan/zoom viewport and an optional crop
//!    selection ([`compose::composite`]).
//!
//! [`ViewerSession`] holds the interactive state (current slice, viewport,
//! four-point selection) and produces frames on request.
//!
//! # Examples
//!
//! ```no_run
//! # use slice_viewer::{Surface, ViewerSession, Volume, VolumeHeader};
//! # use byteorder::LittleEndian;
//! # use std::path::Path;
//! let header = VolumeHeader::from_shape(256, 256, 120).expect("valid dimensions");
//! let volume = Volume::open_raw::<LittleEndian>(Path::new("scan.raw"), header)
//!     .expect("should have read the raw volume");
//! let mut session = ViewerSession::new();
//! session.load(volume);
//! session.set_surface(Some(Surface::new(512, 512)));
//! session.set_slice(60);
//! session.zoom_in();
//! let frame = session.render().expect("surface is set");
//! ```

pub mod common;
pub mod compose;
pub mod convert;
pub mod error;
pub mod read;
pub mod render;
pub mod resample;
pub mod selection;
pub mod session;
pub mod viewport;
pub mod write;

pub use compose::Surface;
pub use error::{Result, ViewerError};
pub use read::{SampleType, Volume, VolumeBuffer, VolumeHeader};
pub use render::Raster;
pub use selection::{Rect, SelectionEngine, SelectionState};
pub use session::{InteractionMode, ViewerSession};
pub use viewport::{Point, Viewport};
