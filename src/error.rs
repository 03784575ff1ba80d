//! Error types for seismic loading operations

use thiserror::Error;

/// Main error type for seismic volume operations
#[derive(Error, Debug)]
pub enum SeismicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}. Use .npy, .sgy, or .segy")]
    UnsupportedFormat(String),

    #[error("SEG-Y file could not be loaded: {0}")]
    LoadFailure(#[source] Box<SeismicError>),

    #[error("Shape mismatch at trace {trace}: expected {expected} samples, found {found}")]
    ShapeMismatch {
        trace: usize,
        expected: usize,
        found: usize,
    },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unsupported normalization method: {0}")]
    UnsupportedMethod(String),

    #[error("Trace headers do not describe a regular inline/crossline grid")]
    MissingGeometry,

    #[error("Input contains no traces")]
    EmptyInput,

    #[error("Invalid SEG-Y format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported sample format code: {0}")]
    UnsupportedSampleFormat(i16),

    #[error("Duplicate coordinate (inline {inline}, crossline {crossline}) at trace {trace}")]
    DuplicateCoordinate {
        inline: i32,
        crossline: i32,
        trace: usize,
    },

    #[error("Invalid axis order: {0}. Use only 'i', 'x', or 'd'")]
    InvalidAxisOrder(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid line type: {0}. Use 'inline', 'xline', or 'depth'")]
    InvalidLineType(String),

    #[error("NPY decode error: {0}")]
    Npy(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SeismicError {
    /// Wrap a fallback failure so callers see a single load error
    pub fn load_failure(cause: SeismicError) -> Self {
        SeismicError::LoadFailure(Box::new(cause))
    }
}

/// Specialized Result type for seismic operations
pub type Result<T> = std::result::Result<T, SeismicError>;

impl From<ndarray::ShapeError> for SeismicError {
    fn from(err: ndarray::ShapeError) -> Self {
        SeismicError::InvalidDimensions(err.to_string())
    }
}

impl From<serde_json::Error> for SeismicError {
    fn from(err: serde_json::Error) -> Self {
        SeismicError::Serialization(err.to_string())
    }
}
