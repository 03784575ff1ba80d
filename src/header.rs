//! SEG-Y header field tables and the header bundle returned by introspection

use crate::utils::ebcdic_to_ascii;
use bytes::Buf;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size of the textual file header
pub const TEXT_HEADER_SIZE: usize = 3200;

/// Size of the binary file header
pub const BINARY_HEADER_SIZE: usize = 400;

/// Size of each trace header
pub const TRACE_HEADER_SIZE: usize = 240;

/// Byte position of the binary header within the file (1-based)
pub const BINARY_HEADER_START: u16 = 3201;

/// Width of an integer header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldWidth {
    I16,
    I32,
}

impl FieldWidth {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            FieldWidth::I16 => 2,
            FieldWidth::I32 => 4,
        }
    }
}

/// A named big-endian integer field inside a header block
///
/// `byte` is the 1-based position as printed in the SEG-Y standard: relative to
/// the trace header for trace fields, and to the start of the file for binary
/// header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub name: &'static str,
    pub byte: u16,
    pub width: FieldWidth,
}

impl HeaderField {
    pub const fn new(name: &'static str, byte: u16, width: FieldWidth) -> Self {
        Self { name, byte, width }
    }

    /// Decode this field from a header block whose first byte sits at `origin`
    ///
    /// Returns `None` when the field does not fit in `block`.
    pub fn read(&self, block: &[u8], origin: u16) -> Option<i32> {
        let offset = (self.byte.checked_sub(origin)?) as usize;
        let mut field = block.get(offset..offset + self.width.size_in_bytes())?;
        Some(match self.width {
            FieldWidth::I16 => field.get_i16() as i32,
            FieldWidth::I32 => field.get_i32(),
        })
    }

    /// Look up a trace header field by byte position
    pub fn trace_field_at(byte: u16) -> Option<HeaderField> {
        TRACE_HEADER_FIELDS.iter().copied().find(|f| f.byte == byte)
    }
}

macro_rules! fields {
    ($($name:literal @ $byte:literal : $width:ident),* $(,)?) => {
        &[$(HeaderField::new($name, $byte, FieldWidth::$width)),*]
    };
}

/// Inline number of a 3D post-stack survey (bytes 189-192)
pub const INLINE_3D: HeaderField = HeaderField::new("INLINE_3D", 189, FieldWidth::I32);

/// Crossline number of a 3D post-stack survey (bytes 193-196)
pub const CROSSLINE_3D: HeaderField = HeaderField::new("CROSSLINE_3D", 193, FieldWidth::I32);

/// Samples per trace in the trace header (bytes 115-116)
pub const TRACE_SAMPLE_COUNT: HeaderField =
    HeaderField::new("TRACE_SAMPLE_COUNT", 115, FieldWidth::I16);

/// SEG-Y rev1 trace header layout
pub const TRACE_HEADER_FIELDS: &[HeaderField] = fields![
    "TRACE_SEQUENCE_LINE" @ 1: I32,
    "TRACE_SEQUENCE_FILE" @ 5: I32,
    "FieldRecord" @ 9: I32,
    "TraceNumber" @ 13: I32,
    "EnergySourcePoint" @ 17: I32,
    "CDP" @ 21: I32,
    "CDP_TRACE" @ 25: I32,
    "TraceIdentificationCode" @ 29: I16,
    "NSummedTraces" @ 31: I16,
    "NStackedTraces" @ 33: I16,
    "DataUse" @ 35: I16,
    "offset" @ 37: I32,
    "ReceiverGroupElevation" @ 41: I32,
    "SourceSurfaceElevation" @ 45: I32,
    "SourceDepth" @ 49: I32,
    "ReceiverDatumElevation" @ 53: I32,
    "SourceDatumElevation" @ 57: I32,
    "SourceWaterDepth" @ 61: I32,
    "GroupWaterDepth" @ 65: I32,
    "ElevationScalar" @ 69: I16,
    "SourceGroupScalar" @ 71: I16,
    "SourceX" @ 73: I32,
    "SourceY" @ 77: I32,
    "GroupX" @ 81: I32,
    "GroupY" @ 85: I32,
    "CoordinateUnits" @ 89: I16,
    "WeatheringVelocity" @ 91: I16,
    "SubWeatheringVelocity" @ 93: I16,
    "SourceUpholeTime" @ 95: I16,
    "GroupUpholeTime" @ 97: I16,
    "SourceStaticCorrection" @ 99: I16,
    "GroupStaticCorrection" @ 101: I16,
    "TotalStaticApplied" @ 103: I16,
    "LagTimeA" @ 105: I16,
    "LagTimeB" @ 107: I16,
    "DelayRecordingTime" @ 109: I16,
    "MuteTimeStart" @ 111: I16,
    "MuteTimeEND" @ 113: I16,
    "TRACE_SAMPLE_COUNT" @ 115: I16,
    "TRACE_SAMPLE_INTERVAL" @ 117: I16,
    "GainType" @ 119: I16,
    "InstrumentGainConstant" @ 121: I16,
    "InstrumentInitialGain" @ 123: I16,
    "Correlated" @ 125: I16,
    "SweepFrequencyStart" @ 127: I16,
    "SweepFrequencyEnd" @ 129: I16,
    "SweepLength" @ 131: I16,
    "SweepType" @ 133: I16,
    "SweepTraceTaperLengthStart" @ 135: I16,
    "SweepTraceTaperLengthEnd" @ 137: I16,
    "TaperType" @ 139: I16,
    "AliasFilterFrequency" @ 141: I16,
    "AliasFilterSlope" @ 143: I16,
    "NotchFilterFrequency" @ 145: I16,
    "NotchFilterSlope" @ 147: I16,
    "LowCutFrequency" @ 149: I16,
    "HighCutFrequency" @ 151: I16,
    "LowCutSlope" @ 153: I16,
    "HighCutSlope" @ 155: I16,
    "YearDataRecorded" @ 157: I16,
    "DayOfYear" @ 159: I16,
    "HourOfDay" @ 161: I16,
    "MinuteOfHour" @ 163: I16,
    "SecondOfMinute" @ 165: I16,
    "TimeBaseCode" @ 167: I16,
    "TraceWeightingFactor" @ 169: I16,
    "GeophoneGroupNumberRoll1" @ 171: I16,
    "GeophoneGroupNumberFirstTraceOrigField" @ 173: I16,
    "GeophoneGroupNumberLastTraceOrigField" @ 175: I16,
    "GapSize" @ 177: I16,
    "OverTravel" @ 179: I16,
    "CDP_X" @ 181: I32,
    "CDP_Y" @ 185: I32,
    "INLINE_3D" @ 189: I32,
    "CROSSLINE_3D" @ 193: I32,
    "ShotPoint" @ 197: I32,
    "ShotPointScalar" @ 201: I16,
    "TraceValueMeasurementUnit" @ 203: I16,
    "TransductionConstantMantissa" @ 205: I32,
    "TransductionConstantPower" @ 209: I16,
    "TransductionUnit" @ 211: I16,
    "TraceIdentifier" @ 213: I16,
    "ScalarTraceHeader" @ 215: I16,
    "SourceType" @ 217: I16,
    "SourceEnergyDirectionMantissa" @ 219: I32,
    "SourceEnergyDirectionExponent" @ 223: I16,
    "SourceMeasurementMantissa" @ 225: I32,
    "SourceMeasurementExponent" @ 229: I16,
    "SourceMeasurementUnit" @ 231: I16,
    "UnassignedInt1" @ 233: I32,
    "UnassignedInt2" @ 237: I32,
];

/// Sample interval in microseconds (binary header)
pub const BIN_INTERVAL: HeaderField = HeaderField::new("Interval", 3217, FieldWidth::I16);

/// Samples per trace (binary header)
pub const BIN_SAMPLES: HeaderField = HeaderField::new("Samples", 3221, FieldWidth::I16);

/// Sample format code (binary header)
pub const BIN_FORMAT: HeaderField = HeaderField::new("Format", 3225, FieldWidth::I16);

/// Number of extended textual headers following the binary header
pub const BIN_EXTENDED_HEADERS: HeaderField =
    HeaderField::new("ExtendedHeaders", 3505, FieldWidth::I16);

/// SEG-Y binary header layout
pub const BINARY_HEADER_FIELDS: &[HeaderField] = fields![
    "JobID" @ 3201: I32,
    "LineNumber" @ 3205: I32,
    "ReelNumber" @ 3209: I32,
    "Traces" @ 3213: I16,
    "AuxTraces" @ 3215: I16,
    "Interval" @ 3217: I16,
    "IntervalOriginal" @ 3219: I16,
    "Samples" @ 3221: I16,
    "SamplesOriginal" @ 3223: I16,
    "Format" @ 3225: I16,
    "EnsembleFold" @ 3227: I16,
    "SortingCode" @ 3229: I16,
    "VerticalSum" @ 3231: I16,
    "SweepFrequencyStart" @ 3233: I16,
    "SweepFrequencyEnd" @ 3235: I16,
    "SweepLength" @ 3237: I16,
    "Sweep" @ 3239: I16,
    "SweepChannel" @ 3241: I16,
    "SweepTaperStart" @ 3243: I16,
    "SweepTaperEnd" @ 3245: I16,
    "Taper" @ 3247: I16,
    "CorrelatedTraces" @ 3249: I16,
    "BinaryGainRecovery" @ 3251: I16,
    "AmplitudeRecovery" @ 3253: I16,
    "MeasurementSystem" @ 3255: I16,
    "ImpulseSignalPolarity" @ 3257: I16,
    "VibratoryPolarity" @ 3259: I16,
    "SEGYRevision" @ 3501: I16,
    "TraceFlag" @ 3503: I16,
    "ExtendedHeaders" @ 3505: I16,
];

/// Decode every field of `fields` from a header block into a name → value map
pub fn decode_fields(block: &[u8], origin: u16, fields: &[HeaderField]) -> BTreeMap<String, i32> {
    fields
        .iter()
        .filter_map(|f| f.read(block, origin).map(|v| (f.name.to_string(), v)))
        .collect()
}

/// Decode a textual header as best-effort ASCII
///
/// EBCDIC headers are transcoded first. Bytes with no ASCII meaning are
/// dropped rather than treated as an error.
pub fn decode_text_header(raw: &[u8]) -> String {
    let bytes: Vec<u8> = if is_ebcdic(raw) {
        raw.iter().filter_map(|&b| ebcdic_to_ascii(b)).collect()
    } else {
        raw.iter().copied().filter(u8::is_ascii).collect()
    };
    // Every byte is ASCII at this point
    bytes.into_iter().map(char::from).collect()
}

/// Textual headers conventionally open with 'C' (0xC3 in EBCDIC); fall back to
/// counting high-bit bytes for headers that do not.
fn is_ebcdic(raw: &[u8]) -> bool {
    match raw.first().copied() {
        Some(b'C') => false,
        Some(0xC3) => true,
        _ => raw.iter().filter(|b| **b >= 0x80).count() * 2 > raw.len(),
    }
}

/// Global and per-trace headers of a SEG-Y file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBundle {
    /// Free-text survey description
    pub textual_header: String,
    /// Binary header fields by name
    pub binary_header: BTreeMap<String, i32>,
    /// Header fields of the requested trace by name
    pub trace_header: BTreeMap<String, i32>,
}

/// Outcome of a header lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeaderLookup {
    /// SEG-Y input: the file's headers
    Headers(HeaderBundle),
    /// `.npy` input carries no SEG-Y headers
    NotApplicable,
    /// Extension is not one the loader recognizes
    Unsupported,
}

impl HeaderLookup {
    pub fn headers(&self) -> Option<&HeaderBundle> {
        match self {
            HeaderLookup::Headers(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Human-readable explanation for the sentinel variants
    pub fn message(&self) -> &'static str {
        match self {
            HeaderLookup::Headers(_) => "SEG-Y headers available.",
            HeaderLookup::NotApplicable => "No SEG-Y headers available for .npy files.",
            HeaderLookup::Unsupported => {
                "Unsupported file type. Only .sgy, .segy, and .npy are supported."
            }
        }
    }
}
