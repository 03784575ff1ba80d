//! Core data types for seismic loading

use crate::error::{Result, SeismicError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Input file formats recognized by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// NumPy `.npy` array dump with the shape embedded in its header
    Npy,
    /// SEG-Y trace interchange (`.sgy` / `.segy`)
    Segy,
}

impl FileFormat {
    /// Detect the format from the path extension (case-insensitive)
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "npy" => Some(FileFormat::Npy),
            "sgy" | "segy" => Some(FileFormat::Segy),
            _ => None,
        }
    }

    /// Like [`FileFormat::from_path`], but unknown extensions are an error
    pub fn require(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_path(path)
            .ok_or_else(|| SeismicError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Sample encodings supported when reading SEG-Y traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum SampleFormat {
    /// 4-byte IBM hexadecimal floating point
    IbmFloat = 1,
    /// 4-byte two's complement integer
    Int32 = 2,
    /// 2-byte two's complement integer
    Int16 = 3,
    /// 4-byte IEEE floating point
    IeeeFloat = 5,
    /// 1-byte two's complement integer
    Int8 = 8,
}

impl SampleFormat {
    /// Map the binary header format code to a sample format
    pub fn from_code(code: i16) -> Result<Self> {
        match code {
            1 => Ok(SampleFormat::IbmFloat),
            2 => Ok(SampleFormat::Int32),
            3 => Ok(SampleFormat::Int16),
            5 => Ok(SampleFormat::IeeeFloat),
            8 => Ok(SampleFormat::Int8),
            other => Err(SeismicError::UnsupportedSampleFormat(other)),
        }
    }

    /// Size in bytes of one sample
    pub fn size_in_bytes(&self) -> usize {
        match self {
            SampleFormat::IbmFloat | SampleFormat::Int32 | SampleFormat::IeeeFloat => 4,
            SampleFormat::Int16 => 2,
            SampleFormat::Int8 => 1,
        }
    }

    /// The binary header code for this format
    pub fn code(&self) -> i16 {
        *self as i16
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Direction of a 2D section cut from a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    Inline,
    Xline,
    Depth,
}

impl FromStr for LineType {
    type Err = SeismicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inline" => Ok(LineType::Inline),
            "xline" => Ok(LineType::Xline),
            "depth" => Ok(LineType::Depth),
            other => Err(SeismicError::InvalidLineType(other.to_string())),
        }
    }
}

/// Index range of one axis, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub first: usize,
    pub last: usize,
}

impl IndexRange {
    /// Range covering an axis of `len` samples; `len` must be at least 1
    pub fn for_len(len: usize) -> Self {
        Self {
            first: 0,
            last: len.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("a/b/cube.npy"), Some(FileFormat::Npy));
        assert_eq!(FileFormat::from_path("cube.SGY"), Some(FileFormat::Segy));
        assert_eq!(FileFormat::from_path("cube.segy"), Some(FileFormat::Segy));
        assert_eq!(FileFormat::from_path("cube.csv"), None);
        assert_eq!(FileFormat::from_path("cube"), None);
        assert!(matches!(
            FileFormat::require("cube.csv"),
            Err(SeismicError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_sample_format_codes() {
        assert_eq!(SampleFormat::from_code(1).unwrap(), SampleFormat::IbmFloat);
        assert_eq!(SampleFormat::from_code(5).unwrap().size_in_bytes(), 4);
        assert_eq!(SampleFormat::from_code(3).unwrap().size_in_bytes(), 2);
        assert_eq!(SampleFormat::Int8.code(), 8);
        assert!(matches!(
            SampleFormat::from_code(6),
            Err(SeismicError::UnsupportedSampleFormat(6))
        ));
    }

    #[test]
    fn test_line_type_parse() {
        assert_eq!("inline".parse::<LineType>().unwrap(), LineType::Inline);
        assert_eq!("depth".parse::<LineType>().unwrap(), LineType::Depth);
        assert!("timeslice".parse::<LineType>().is_err());
    }
}
