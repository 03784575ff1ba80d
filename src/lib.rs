//! seisvol - seismic volumes from SEG-Y and `.npy` files
//!
//! Loads a 3D post-stack survey into a dense in-memory cube indexed
//! `[xline, inline, depth]`.
//!
//! # Loading
//!
//! SEG-Y files are read with a fast path that infers a regular inline/crossline
//! grid from a few trace headers. When that fails (missing or irregular
//! geometry headers), every trace header is scanned and the cube is rebuilt
//! from the line numbers each trace carries. `.npy` dumps are read directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use seisvol::{load, get_headers, volume_range_info};
//!
//! # fn example() -> seisvol::Result<()> {
//! let volume = load("survey.sgy", true)?;
//! println!("{:?}", volume_range_info(&volume));
//!
//! let headers = get_headers("survey.sgy", 0)?;
//! if let Some(bundle) = headers.headers() {
//!     println!("{}", bundle.textual_header);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod geometry;
pub mod header;
pub mod loader;
pub mod normalize;
pub mod npy;
pub mod options;
pub mod segy;
pub mod types;
pub mod utils;
pub mod volume;

// Re-exports
pub use builder::{build_from_source, build_from_traces, build_from_traces_with};
pub use error::{Result, SeismicError};
pub use geometry::{CoordinateIndexMap, Geometry, Sorting};
pub use header::{HeaderBundle, HeaderField, HeaderLookup};
pub use loader::{get_headers, load, load_segy, load_segy_with_strategy, load_with, LoadStrategy};
pub use normalize::{normalize, normalize_by_name, NormalizationMethod};
pub use npy::load_npy;
pub use options::{BuildOptions, DuplicatePolicy, LoadOptions, SegyOptions};
pub use segy::{SegyFile, TraceSource};
pub use types::{FileFormat, IndexRange, LineType, SampleFormat};
pub use volume::{
    extract_slice, parse_axis_order, reorder_volume, summary, volume_range_info, SeismicVolume,
    VolumeRangeInfo,
};

/// Version of this crate
pub const SEISVOL_VERSION: &str = env!("CARGO_PKG_VERSION");
