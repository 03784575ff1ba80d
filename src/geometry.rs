//! Survey grid geometry
//!
//! [`CoordinateIndexMap`] turns sparse line numbers into dense array indices.
//! [`Geometry`] is the fast path: it samples a handful of trace headers,
//! assumes the file is a complete regular grid sorted by inline or crossline,
//! and reads traces positionally. Each trace's line numbers are checked
//! against its grid cell as it is read.

use crate::error::{Result, SeismicError};
use crate::header::HeaderField;
use crate::options::SegyOptions;
use crate::segy::TraceSource;
use crate::volume::SeismicVolume;
use ndarray::{s, Array3, ArrayView1};
use std::collections::HashMap;

/// Sorted unique coordinates and the dense index of each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateIndexMap {
    values: Vec<i32>,
    index: HashMap<i32, usize>,
}

impl CoordinateIndexMap {
    /// Build from observed coordinates, which may repeat and arrive unsorted
    pub fn from_observed(observed: impl IntoIterator<Item = i32>) -> Self {
        let mut values: Vec<i32> = observed.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        let index = values.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        Self { values, index }
    }

    /// Dense index of a coordinate
    pub fn index_of(&self, value: i32) -> Option<usize> {
        self.index.get(&value).copied()
    }

    /// The sorted unique coordinates
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which line number stays constant across consecutive traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sorting {
    /// Traces run along crosslines within each inline
    InlineSorted,
    /// Traces run along inlines within each crossline
    CrosslineSorted,
}

/// A regular grid inferred from trace headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub sorting: Sorting,
    /// Inline numbers in ascending order
    pub inlines: Vec<i32>,
    /// Crossline numbers in ascending order
    pub crosslines: Vec<i32>,
    pub samples: usize,
    /// Slow-axis line numbers were stored in descending order
    slow_descending: bool,
    /// Fast-axis line numbers were stored in descending order
    fast_descending: bool,
    inline_field: HeaderField,
    crossline_field: HeaderField,
}

/// Direction of a strictly monotonic sequence, `None` if it is not one
fn monotonic(values: &[i32]) -> Option<bool> {
    if values.len() < 2 {
        return Some(false);
    }
    if values.windows(2).all(|w| w[0] < w[1]) {
        Some(false)
    } else if values.windows(2).all(|w| w[0] > w[1]) {
        Some(true)
    } else {
        None
    }
}

impl Geometry {
    /// Infer a regular grid, or `None` if the headers do not describe one
    pub fn infer<S: TraceSource>(source: &mut S, opts: &SegyOptions) -> Result<Option<Self>> {
        let traces = source.trace_count();
        let samples = source.samples_per_trace();
        if traces == 0 || samples == 0 {
            return Ok(None);
        }

        let il_field = opts.inline_field();
        let xl_field = opts.crossline_field();
        let il0 = source.header_field(0, il_field)?;
        let xl0 = source.header_field(0, xl_field)?;

        if traces == 1 {
            return Ok(Some(Self {
                sorting: Sorting::InlineSorted,
                inlines: vec![il0],
                crosslines: vec![xl0],
                samples,
                slow_descending: false,
                fast_descending: false,
                inline_field: il_field,
                crossline_field: xl_field,
            }));
        }

        let il1 = source.header_field(1, il_field)?;
        let xl1 = source.header_field(1, xl_field)?;
        let (sorting, slow_field, fast_field) = if il0 == il1 && xl0 != xl1 {
            (Sorting::InlineSorted, il_field, xl_field)
        } else if xl0 == xl1 && il0 != il1 {
            (Sorting::CrosslineSorted, xl_field, il_field)
        } else {
            log::debug!(
                "Cannot infer sorting from first traces: ({}, {}) then ({}, {})",
                il0,
                xl0,
                il1,
                xl1
            );
            return Ok(None);
        };

        let slow0 = match sorting {
            Sorting::InlineSorted => il0,
            Sorting::CrosslineSorted => xl0,
        };
        let mut fast_values = Vec::new();
        for trace in 0..traces {
            if source.header_field(trace, slow_field)? != slow0 {
                break;
            }
            fast_values.push(source.header_field(trace, fast_field)?);
        }
        let n_fast = fast_values.len();

        if traces % n_fast != 0 {
            log::debug!(
                "{} traces do not divide into lines of {} traces",
                traces,
                n_fast
            );
            return Ok(None);
        }
        let n_slow = traces / n_fast;

        let slow_values = (0..n_slow)
            .map(|line| source.header_field(line * n_fast, slow_field))
            .collect::<Result<Vec<_>>>()?;

        let (Some(slow_descending), Some(fast_descending)) =
            (monotonic(&slow_values), monotonic(&fast_values))
        else {
            log::debug!("Line numbers are not strictly monotonic");
            return Ok(None);
        };

        // The last trace must close the grid on the expected corner
        let last = traces - 1;
        if source.header_field(last, slow_field)? != slow_values[n_slow - 1]
            || source.header_field(last, fast_field)? != fast_values[n_fast - 1]
        {
            log::debug!("Last trace does not sit on the grid corner");
            return Ok(None);
        }

        let mut slow_sorted = slow_values;
        slow_sorted.sort_unstable();
        let mut fast_sorted = fast_values;
        fast_sorted.sort_unstable();

        let (inlines, crosslines) = match sorting {
            Sorting::InlineSorted => (slow_sorted, fast_sorted),
            Sorting::CrosslineSorted => (fast_sorted, slow_sorted),
        };

        Ok(Some(Self {
            sorting,
            inlines,
            crosslines,
            samples,
            slow_descending,
            fast_descending,
            inline_field: il_field,
            crossline_field: xl_field,
        }))
    }

    fn slow_len(&self) -> usize {
        match self.sorting {
            Sorting::InlineSorted => self.inlines.len(),
            Sorting::CrosslineSorted => self.crosslines.len(),
        }
    }

    fn fast_len(&self) -> usize {
        match self.sorting {
            Sorting::InlineSorted => self.crosslines.len(),
            Sorting::CrosslineSorted => self.inlines.len(),
        }
    }

    /// Read every trace into a `[xline, inline, depth]` cube by position
    ///
    /// Fails with [`SeismicError::MissingGeometry`] as soon as a trace's own
    /// line numbers disagree with the cell its position maps to.
    pub fn read_cube<S: TraceSource>(&self, source: &mut S) -> Result<SeismicVolume> {
        let n_slow = self.slow_len();
        let n_fast = self.fast_len();
        let mut volume =
            Array3::<f32>::zeros((self.crosslines.len(), self.inlines.len(), self.samples));

        for slow in 0..n_slow {
            let slow_idx = if self.slow_descending { n_slow - 1 - slow } else { slow };
            for fast in 0..n_fast {
                let fast_idx = if self.fast_descending { n_fast - 1 - fast } else { fast };
                let trace = slow * n_fast + fast;

                let (xl_idx, il_idx) = match self.sorting {
                    Sorting::InlineSorted => (fast_idx, slow_idx),
                    Sorting::CrosslineSorted => (slow_idx, fast_idx),
                };
                let inline = source.header_field(trace, self.inline_field)?;
                let crossline = source.header_field(trace, self.crossline_field)?;
                if inline != self.inlines[il_idx] || crossline != self.crosslines[xl_idx] {
                    log::debug!(
                        "Trace {} carries ({}, {}) where the grid expects ({}, {})",
                        trace,
                        inline,
                        crossline,
                        self.inlines[il_idx],
                        self.crosslines[xl_idx]
                    );
                    return Err(SeismicError::MissingGeometry);
                }

                let samples = source.read_trace(trace)?;
                if samples.len() != self.samples {
                    return Err(SeismicError::ShapeMismatch {
                        trace,
                        expected: self.samples,
                        found: samples.len(),
                    });
                }

                volume
                    .slice_mut(s![xl_idx, il_idx, ..])
                    .assign(&ArrayView1::from(&samples[..]));
            }
        }

        Ok(volume)
    }
}
