//! Volume loading entry points
//!
//! SEG-Y files are loaded with one of two strategies. The fast path trusts a
//! regular grid inferred from a few trace headers; the fallback scans every
//! header. [`load_segy`] is the single place that picks between them.

use crate::builder::build_from_traces_with;
use crate::error::{Result, SeismicError};
use crate::geometry::Geometry;
use crate::header::HeaderLookup;
use crate::normalize::normalize;
use crate::npy::load_npy;
use crate::options::LoadOptions;
use crate::segy::SegyFile;
use crate::types::FileFormat;
use crate::volume::{summary, SeismicVolume};
use std::path::Path;

/// How a SEG-Y file is turned into a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Infer a regular grid from sampled headers and read traces by position
    FastPath,
    /// Scan every trace header and place traces by their line numbers
    Fallback,
}

impl LoadStrategy {
    fn run(self, path: &Path, opts: &LoadOptions) -> Result<SeismicVolume> {
        match self {
            LoadStrategy::FastPath => {
                let mut segy = SegyFile::open(path)?;
                let geometry =
                    Geometry::infer(&mut segy, &opts.segy)?.ok_or(SeismicError::MissingGeometry)?;
                log::debug!(
                    "Inferred {:?} grid: {} inlines x {} crosslines, {} samples of {} at {} us",
                    geometry.sorting,
                    geometry.inlines.len(),
                    geometry.crosslines.len(),
                    geometry.samples,
                    segy.sample_format(),
                    segy.sample_interval_us()
                );
                geometry.read_cube(&mut segy)
            }
            LoadStrategy::Fallback => build_from_traces_with(path, &opts.build_options()),
        }
    }
}

/// Load a seismic volume, optionally min-max normalized to [-1, 1]
///
/// The result is indexed `[xline, inline, depth]`.
pub fn load(path: impl AsRef<Path>, normalize: bool) -> Result<SeismicVolume> {
    load_with(path, &LoadOptions::new(normalize))
}

/// Load a seismic volume with explicit options
pub fn load_with(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<SeismicVolume> {
    let path = path.as_ref();
    let volume = match FileFormat::require(path)? {
        FileFormat::Npy => load_npy(path)?,
        FileFormat::Segy => load_segy(path, opts)?,
    };
    log::info!("Loaded {}: {}", path.display(), summary(&volume));

    Ok(match opts.normalize {
        Some(method) => normalize(volume, method),
        None => volume,
    })
}

/// Load a SEG-Y file, falling back to a full header scan if the fast path fails
///
/// A failure of the fallback is reported as [`SeismicError::LoadFailure`].
pub fn load_segy(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<SeismicVolume> {
    let path = path.as_ref();
    match LoadStrategy::FastPath.run(path, opts) {
        Ok(volume) => Ok(volume),
        Err(reason) => {
            log::info!("Falling back to header-based loader: {}", reason);
            LoadStrategy::Fallback
                .run(path, opts)
                .map_err(SeismicError::load_failure)
        }
    }
}

/// Load a SEG-Y file with one strategy only, with no fallback
pub fn load_segy_with_strategy(
    path: impl AsRef<Path>,
    strategy: LoadStrategy,
    opts: &LoadOptions,
) -> Result<SeismicVolume> {
    strategy.run(path.as_ref(), opts)
}

/// Read the textual, binary, and `trace_index` trace headers of a SEG-Y file
///
/// `.npy` paths yield [`HeaderLookup::NotApplicable`] and other extensions
/// [`HeaderLookup::Unsupported`]; neither touches the file.
pub fn get_headers(path: impl AsRef<Path>, trace_index: usize) -> Result<HeaderLookup> {
    match FileFormat::from_path(path.as_ref()) {
        Some(FileFormat::Segy) => {
            let mut segy = SegyFile::open(path)?;
            Ok(HeaderLookup::Headers(segy.headers(trace_index)?))
        }
        Some(FileFormat::Npy) => Ok(HeaderLookup::NotApplicable),
        None => Ok(HeaderLookup::Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_does_no_io() {
        // The file does not exist; an I/O attempt would surface as Io
        let err = load("/nonexistent/dir/cube.csv", false).unwrap_err();
        assert!(matches!(err, SeismicError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_headers_sentinels_without_files() {
        assert_eq!(
            get_headers("/nonexistent/cube.npy", 0).unwrap(),
            HeaderLookup::NotApplicable
        );
        assert_eq!(
            get_headers("/nonexistent/cube.txt", 0).unwrap(),
            HeaderLookup::Unsupported
        );
    }

    #[test]
    fn test_missing_segy_is_load_failure() {
        let err = load("/nonexistent/cube.sgy", false).unwrap_err();
        match err {
            SeismicError::LoadFailure(cause) => assert!(matches!(*cause, SeismicError::Io(_))),
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }
}
