//! Header-scanning volume builder
//!
//! Used when the fast path cannot infer a regular grid. Every trace header is
//! read, the unique inline and crossline numbers are collected, and the dense
//! cube is assembled from the line numbers each trace carries. All traces are
//! held in memory until the cube can be sized.

use crate::error::{Result, SeismicError};
use crate::geometry::CoordinateIndexMap;
use crate::options::{BuildOptions, DuplicatePolicy};
use crate::segy::{SegyFile, TraceSource};
use crate::volume::SeismicVolume;
use ndarray::{s, Array2, Array3, ArrayView1};
use std::path::Path;

/// One trace's grid position and samples, kept only while the cube is built
#[derive(Debug, Clone)]
struct TraceRecord {
    inline: i32,
    crossline: i32,
    samples: Vec<f32>,
}

/// Build a volume from a SEG-Y file by scanning every trace header
pub fn build_from_traces(path: impl AsRef<Path>) -> Result<SeismicVolume> {
    build_from_traces_with(path, &BuildOptions::default())
}

/// [`build_from_traces`] with explicit header layout and collision policy
pub fn build_from_traces_with(
    path: impl AsRef<Path>,
    opts: &BuildOptions,
) -> Result<SeismicVolume> {
    let mut segy = SegyFile::open(path)?;
    build_from_source(&mut segy, opts)
}

/// Build a volume from any trace source
pub fn build_from_source<S: TraceSource>(
    source: &mut S,
    opts: &BuildOptions,
) -> Result<SeismicVolume> {
    let trace_count = source.trace_count();
    if trace_count == 0 {
        return Err(SeismicError::EmptyInput);
    }

    let n_samples = source.samples_per_trace();
    if n_samples == 0 {
        return Err(SeismicError::InvalidDimensions(
            "traces have no samples".to_string(),
        ));
    }

    let il_field = opts.segy.inline_field();
    let xl_field = opts.segy.crossline_field();

    let mut records = Vec::with_capacity(trace_count);
    for trace in 0..trace_count {
        records.push(TraceRecord {
            inline: source.header_field(trace, il_field)?,
            crossline: source.header_field(trace, xl_field)?,
            samples: source.read_trace(trace)?,
        });
    }

    let inlines = CoordinateIndexMap::from_observed(records.iter().map(|r| r.inline));
    let crosslines = CoordinateIndexMap::from_observed(records.iter().map(|r| r.crossline));
    log::debug!(
        "Scanned {} traces: {} inlines ({:?}..{:?}), {} crosslines ({:?}..{:?})",
        trace_count,
        inlines.len(),
        inlines.values().first(),
        inlines.values().last(),
        crosslines.len(),
        crosslines.values().first(),
        crosslines.values().last()
    );

    let mut volume = Array3::<f32>::zeros((crosslines.len(), inlines.len(), n_samples));
    let mut filled = Array2::<bool>::from_elem((crosslines.len(), inlines.len()), false);
    let mut collisions = 0usize;

    for (trace, record) in records.into_iter().enumerate() {
        if record.samples.len() != n_samples {
            return Err(SeismicError::ShapeMismatch {
                trace,
                expected: n_samples,
                found: record.samples.len(),
            });
        }

        let xl_idx = crosslines
            .index_of(record.crossline)
            .ok_or(SeismicError::MissingGeometry)?;
        let il_idx = inlines
            .index_of(record.inline)
            .ok_or(SeismicError::MissingGeometry)?;

        if std::mem::replace(&mut filled[[xl_idx, il_idx]], true) {
            if opts.duplicates == DuplicatePolicy::Reject {
                return Err(SeismicError::DuplicateCoordinate {
                    inline: record.inline,
                    crossline: record.crossline,
                    trace,
                });
            }
            collisions += 1;
        }

        volume
            .slice_mut(s![xl_idx, il_idx, ..])
            .assign(&ArrayView1::from(&record.samples[..]));
    }

    if collisions > 0 {
        log::warn!(
            "{} traces overwrote an earlier trace at the same inline/crossline",
            collisions
        );
    }
    let empty_cells = filled.iter().filter(|f| !**f).count();
    if empty_cells > 0 {
        log::debug!("{} grid cells have no trace and stay zero", empty_cells);
    }

    Ok(volume)
}
