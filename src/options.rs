//! Load configuration

use crate::error::Result;
use crate::header::{FieldWidth, HeaderField, CROSSLINE_3D, INLINE_3D};
use crate::normalize::NormalizationMethod;
use serde::{Deserialize, Serialize};

/// Which trace header bytes carry the survey grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegyOptions {
    /// 1-based byte position of the 4-byte inline number
    pub inline_byte: u16,
    /// 1-based byte position of the 4-byte crossline number
    pub crossline_byte: u16,
}

impl SegyOptions {
    /// Read inline numbers from a non-standard byte position
    pub fn with_inline_byte(mut self, byte: u16) -> Self {
        self.inline_byte = byte;
        self
    }

    /// Read crossline numbers from a non-standard byte position
    pub fn with_crossline_byte(mut self, byte: u16) -> Self {
        self.crossline_byte = byte;
        self
    }

    pub fn inline_field(&self) -> HeaderField {
        HeaderField::trace_field_at(self.inline_byte)
            .filter(|f| f.width == FieldWidth::I32)
            .unwrap_or(HeaderField::new("inline", self.inline_byte, FieldWidth::I32))
    }

    pub fn crossline_field(&self) -> HeaderField {
        HeaderField::trace_field_at(self.crossline_byte)
            .filter(|f| f.width == FieldWidth::I32)
            .unwrap_or(HeaderField::new(
                "crossline",
                self.crossline_byte,
                FieldWidth::I32,
            ))
    }
}

impl Default for SegyOptions {
    fn default() -> Self {
        Self {
            inline_byte: INLINE_3D.byte,
            crossline_byte: CROSSLINE_3D.byte,
        }
    }
}

/// What to do when two traces land on the same (inline, crossline) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Keep the later trace and log how many cells were overwritten
    #[default]
    LastWriteWins,
    /// Fail with `DuplicateCoordinate` on the first collision
    Reject,
}

/// Options for the header-scanning volume builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    pub segy: SegyOptions,
    pub duplicates: DuplicatePolicy,
}

impl BuildOptions {
    pub fn with_segy(mut self, segy: SegyOptions) -> Self {
        self.segy = segy;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Options for [`crate::loader::load_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Normalization applied after loading, if any
    pub normalize: Option<NormalizationMethod>,
    /// Trace header layout
    pub segy: SegyOptions,
    /// Collision handling for the fallback builder
    pub duplicates: DuplicatePolicy,
}

impl LoadOptions {
    /// Options matching `load(path, normalize)`
    pub fn new(normalize: bool) -> Self {
        Self::default().with_normalization(normalize.then_some(NormalizationMethod::MinMax))
    }

    pub fn with_normalization(mut self, method: Option<NormalizationMethod>) -> Self {
        self.normalize = method;
        self
    }

    pub fn with_segy(mut self, segy: SegyOptions) -> Self {
        self.segy = segy;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options handed to the fallback builder
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            segy: self.segy,
            duplicates: self.duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields() {
        let opts = SegyOptions::default();
        assert_eq!(opts.inline_field(), INLINE_3D);
        assert_eq!(opts.crossline_field(), CROSSLINE_3D);
    }

    #[test]
    fn test_custom_bytes() {
        let opts = SegyOptions::default()
            .with_inline_byte(9)
            .with_crossline_byte(233);
        assert_eq!(opts.inline_field().name, "FieldRecord");
        assert_eq!(opts.crossline_field().name, "UnassignedInt1");

        let odd = SegyOptions::default().with_inline_byte(115);
        assert_eq!(odd.inline_field().name, "inline");
        assert_eq!(odd.inline_field().width, FieldWidth::I32);
    }

    #[test]
    fn test_load_options_json() {
        let opts = LoadOptions::new(true).with_duplicates(DuplicatePolicy::Reject);
        let json = serde_json::to_string(&opts).unwrap();
        let back = LoadOptions::from_json(&json).unwrap();
        assert_eq!(back, opts);
        assert_eq!(back.normalize, Some(NormalizationMethod::MinMax));
        assert_eq!(LoadOptions::new(false).normalize, None);
    }

    #[test]
    fn test_load_options_bad_json() {
        assert!(matches!(
            LoadOptions::from_json("{\"normalize\": \"zscore\"}"),
            Err(crate::error::SeismicError::Serialization(_))
        ));
    }
}
