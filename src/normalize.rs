//! Amplitude normalization

use crate::error::{Result, SeismicError};
use ndarray::{Array, Dimension};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalization methods for loaded volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizationMethod {
    /// Linear rescale of [min, max] onto [-1, 1]
    #[default]
    MinMax,
}

impl FromStr for NormalizationMethod {
    type Err = SeismicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minmax" => Ok(NormalizationMethod::MinMax),
            other => Err(SeismicError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationMethod::MinMax => write!(f, "minmax"),
        }
    }
}

/// Smallest and largest value of an array, ignoring NaN
pub fn value_range<A: Float, D: Dimension>(array: &Array<A, D>) -> Option<(A, A)> {
    array.iter().fold(None, |acc, &v| match acc {
        None if v.is_nan() => None,
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Normalize an array, reusing its buffer
///
/// A constant (or empty) array is returned unchanged.
pub fn normalize<A: Float, D: Dimension>(
    mut array: Array<A, D>,
    method: NormalizationMethod,
) -> Array<A, D> {
    match method {
        NormalizationMethod::MinMax => {
            let Some((lo, hi)) = value_range(&array) else {
                return array;
            };
            let span = hi - lo;
            if span == A::zero() {
                return array;
            }
            let two = A::one() + A::one();
            array.mapv_inplace(|v| two * ((v - lo) / span) - A::one());
            array
        }
    }
}

/// Normalize using a method given by name, e.g. `"minmax"`
pub fn normalize_by_name<A: Float, D: Dimension>(
    array: Array<A, D>,
    method: &str,
) -> Result<Array<A, D>> {
    Ok(normalize(array, method.parse()?))
}
