//! SEG-Y trace access
//!
//! Random access to the headers and samples of a big-endian SEG-Y file. The
//! file handle lives as long as the [`SegyFile`] and is released when it is
//! dropped, so every load and header read scopes its own handle.

use crate::error::{Result, SeismicError};
use crate::header::{
    decode_fields, decode_text_header, HeaderBundle, HeaderField, BINARY_HEADER_FIELDS,
    BINARY_HEADER_SIZE, BINARY_HEADER_START, BIN_EXTENDED_HEADERS, BIN_FORMAT, BIN_INTERVAL,
    BIN_SAMPLES, TEXT_HEADER_SIZE, TRACE_HEADER_FIELDS, TRACE_HEADER_SIZE, TRACE_SAMPLE_COUNT,
};
use crate::types::SampleFormat;
use crate::utils::ibm_to_ieee;
use bytes::Buf;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Trace-level read access used by the volume builders
pub trait TraceSource {
    /// Number of traces in the source
    fn trace_count(&self) -> usize;

    /// Number of samples the source declares for each trace
    fn samples_per_trace(&self) -> usize;

    /// Read one integer field from a trace header
    fn header_field(&mut self, trace: usize, field: HeaderField) -> Result<i32>;

    /// Read the samples of a trace, converted to f32
    fn read_trace(&mut self, trace: usize) -> Result<Vec<f32>>;
}

/// An open SEG-Y file
#[derive(Debug)]
pub struct SegyFile {
    file: File,
    text_header: Vec<u8>,
    binary_header: Vec<u8>,
    sample_format: SampleFormat,
    samples_per_trace: usize,
    data_start: u64,
    trace_count: usize,
}

impl SegyFile {
    /// Open a SEG-Y file and read its file headers
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let file_len = file.metadata()?.len();

        let preamble = (TEXT_HEADER_SIZE + BINARY_HEADER_SIZE) as u64;
        if file_len < preamble {
            return Err(SeismicError::InvalidFormat(format!(
                "file is {} bytes, shorter than the {} byte file header",
                file_len, preamble
            )));
        }

        let mut text_header = vec![0u8; TEXT_HEADER_SIZE];
        file.read_exact(&mut text_header)?;
        let mut binary_header = vec![0u8; BINARY_HEADER_SIZE];
        file.read_exact(&mut binary_header)?;

        let bin = |field: HeaderField| field.read(&binary_header, BINARY_HEADER_START).unwrap_or(0);

        let sample_format = SampleFormat::from_code(bin(BIN_FORMAT) as i16)?;

        let extended = bin(BIN_EXTENDED_HEADERS);
        if extended < 0 {
            return Err(SeismicError::InvalidFormat(format!(
                "unsupported extended textual header count {}",
                extended
            )));
        }
        let data_start = preamble + extended as u64 * TEXT_HEADER_SIZE as u64;
        if file_len < data_start {
            return Err(SeismicError::InvalidFormat(format!(
                "{} extended textual headers run past the end of the file",
                extended
            )));
        }

        let remaining = file_len - data_start;
        // Sample counts are unsigned 16-bit values stored in signed fields
        let mut samples_per_trace = bin(BIN_SAMPLES) as u16 as usize;
        if samples_per_trace == 0 && remaining >= TRACE_HEADER_SIZE as u64 {
            let mut first = vec![0u8; TRACE_HEADER_SIZE];
            file.seek(SeekFrom::Start(data_start))?;
            file.read_exact(&mut first)?;
            samples_per_trace = TRACE_SAMPLE_COUNT.read(&first, 1).unwrap_or(0) as u16 as usize;
        }

        let trace_count = if remaining == 0 {
            0
        } else {
            if samples_per_trace == 0 {
                return Err(SeismicError::InvalidFormat(
                    "neither binary nor trace header gives a sample count".to_string(),
                ));
            }
            let trace_size =
                (TRACE_HEADER_SIZE + samples_per_trace * sample_format.size_in_bytes()) as u64;
            if remaining % trace_size != 0 {
                return Err(SeismicError::InvalidFormat(format!(
                    "trace data of {} bytes is not a multiple of the {} byte trace size",
                    remaining, trace_size
                )));
            }
            (remaining / trace_size) as usize
        };

        log::debug!(
            "Opened SEG-Y: {} traces x {} samples ({}), data at byte {}",
            trace_count,
            samples_per_trace,
            sample_format,
            data_start
        );

        Ok(Self {
            file,
            text_header,
            binary_header,
            sample_format,
            samples_per_trace,
            data_start,
            trace_count,
        })
    }

    /// Encoding of the trace samples
    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    /// Sample interval in microseconds, as declared by the binary header
    pub fn sample_interval_us(&self) -> i32 {
        BIN_INTERVAL
            .read(&self.binary_header, BINARY_HEADER_START)
            .unwrap_or(0)
    }

    /// Textual header as best-effort ASCII
    pub fn text_header(&self) -> String {
        decode_text_header(&self.text_header)
    }

    /// Binary header fields by name
    pub fn binary_header(&self) -> BTreeMap<String, i32> {
        decode_fields(&self.binary_header, BINARY_HEADER_START, BINARY_HEADER_FIELDS)
    }

    /// All named fields of one trace header
    pub fn trace_header(&mut self, trace: usize) -> Result<BTreeMap<String, i32>> {
        let block = self.read_trace_header(trace)?;
        Ok(decode_fields(&block, 1, TRACE_HEADER_FIELDS))
    }

    /// Textual, binary, and trace headers together
    pub fn headers(&mut self, trace: usize) -> Result<HeaderBundle> {
        let trace_header = self.trace_header(trace)?;
        Ok(HeaderBundle {
            textual_header: self.text_header(),
            binary_header: self.binary_header(),
            trace_header,
        })
    }

    fn trace_offset(&self, trace: usize) -> Result<u64> {
        if trace >= self.trace_count {
            return Err(SeismicError::IndexOutOfRange {
                index: trace,
                len: self.trace_count,
            });
        }
        let trace_size =
            TRACE_HEADER_SIZE + self.samples_per_trace * self.sample_format.size_in_bytes();
        Ok(self.data_start + trace as u64 * trace_size as u64)
    }

    fn read_trace_header(&mut self, trace: usize) -> Result<Vec<u8>> {
        let offset = self.trace_offset(trace)?;
        let mut block = vec![0u8; TRACE_HEADER_SIZE];
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut block)?;
        Ok(block)
    }
}

impl TraceSource for SegyFile {
    fn trace_count(&self) -> usize {
        self.trace_count
    }

    fn samples_per_trace(&self) -> usize {
        self.samples_per_trace
    }

    fn header_field(&mut self, trace: usize, field: HeaderField) -> Result<i32> {
        let block = self.read_trace_header(trace)?;
        field.read(&block, 1).ok_or_else(|| {
            SeismicError::InvalidFormat(format!(
                "field {} at byte {} lies outside the trace header",
                field.name, field.byte
            ))
        })
    }

    fn read_trace(&mut self, trace: usize) -> Result<Vec<f32>> {
        let offset = self.trace_offset(trace)? + TRACE_HEADER_SIZE as u64;
        let mut raw = vec![0u8; self.samples_per_trace * self.sample_format.size_in_bytes()];
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut raw)?;
        Ok(decode_samples(&raw, self.sample_format))
    }
}

/// Convert big-endian sample bytes to f32
pub fn decode_samples(raw: &[u8], format: SampleFormat) -> Vec<f32> {
    let count = raw.len() / format.size_in_bytes();
    let mut buf = raw;
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let value = match format {
            SampleFormat::IbmFloat => ibm_to_ieee(buf.get_u32()),
            SampleFormat::Int32 => buf.get_i32() as f32,
            SampleFormat::Int16 => buf.get_i16() as f32,
            SampleFormat::IeeeFloat => buf.get_f32(),
            SampleFormat::Int8 => buf.get_i8() as f32,
        };
        samples.push(value);
    }

    samples
}
