//! Synthetic SEG-Y files for integration tests

#![allow(dead_code)]

use npyz::{AutoSerialize, Order, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A trace to write: inline, crossline, samples
pub type Trace = (i32, i32, Vec<f32>);

/// Describes a small SEG-Y file to write to disk
pub struct SyntheticSegy {
    pub text: Vec<u8>,
    pub format: i16,
    pub samples: usize,
    /// 1-based byte positions of the line numbers in each trace header
    pub inline_byte: usize,
    pub crossline_byte: usize,
    pub traces: Vec<Trace>,
}

impl SyntheticSegy {
    pub fn new(samples: usize, traces: Vec<Trace>) -> Self {
        let mut text = vec![b' '; 3200];
        let card = b"C 1 SYNTHETIC SURVEY";
        text[..card.len()].copy_from_slice(card);
        Self {
            text,
            format: 5,
            samples,
            inline_byte: 189,
            crossline_byte: 193,
            traces,
        }
    }

    /// A complete grid, sorted by inline when `inline_sorted`
    pub fn grid(inlines: &[i32], crosslines: &[i32], samples: usize, inline_sorted: bool) -> Self {
        let mut traces = Vec::new();
        let mut push = |il: i32, xl: i32| {
            let values = (0..samples)
                .map(|d| amplitude(il, xl, d))
                .collect();
            traces.push((il, xl, values));
        };
        if inline_sorted {
            for &il in inlines {
                for &xl in crosslines {
                    push(il, xl);
                }
            }
        } else {
            for &xl in crosslines {
                for &il in inlines {
                    push(il, xl);
                }
            }
        }
        Self::new(samples, traces)
    }

    pub fn with_format(mut self, format: i16) -> Self {
        self.format = format;
        self
    }

    pub fn with_line_bytes(mut self, inline_byte: usize, crossline_byte: usize) -> Self {
        self.inline_byte = inline_byte;
        self.crossline_byte = crossline_byte;
        self
    }

    pub fn with_ebcdic_text(mut self, card: &str) -> Self {
        self.text = vec![0x40; 3200];
        for (slot, ch) in self.text.iter_mut().zip(card.bytes()) {
            *slot = ascii_to_ebcdic(ch);
        }
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.text.clone();

        let mut bin = vec![0u8; 400];
        bin[16..18].copy_from_slice(&2000i16.to_be_bytes());
        bin[20..22].copy_from_slice(&(self.samples as i16).to_be_bytes());
        bin[24..26].copy_from_slice(&self.format.to_be_bytes());
        bin[300..302].copy_from_slice(&0x0100i16.to_be_bytes());
        bytes.extend(bin);

        for (seq, (il, xl, values)) in self.traces.iter().enumerate() {
            let mut header = vec![0u8; 240];
            header[0..4].copy_from_slice(&(seq as i32 + 1).to_be_bytes());
            let il_at = self.inline_byte - 1;
            let xl_at = self.crossline_byte - 1;
            header[il_at..il_at + 4].copy_from_slice(&il.to_be_bytes());
            header[xl_at..xl_at + 4].copy_from_slice(&xl.to_be_bytes());
            header[114..116].copy_from_slice(&(values.len() as i16).to_be_bytes());
            bytes.extend(header);

            for &v in values {
                match self.format {
                    1 => bytes.extend(ieee_to_ibm(v).to_be_bytes()),
                    2 => bytes.extend((v as i32).to_be_bytes()),
                    3 => bytes.extend((v as i16).to_be_bytes()),
                    5 => bytes.extend(v.to_be_bytes()),
                    8 => bytes.push(v as i8 as u8),
                    other => panic!("no encoder for format {other}"),
                }
            }
        }

        bytes
    }

    pub fn write_to(&self, path: &Path) {
        let mut file = File::create(path).unwrap();
        file.write_all(&self.to_bytes()).unwrap();
    }

    /// Write into `dir` under `name` and return the path
    pub fn write_in(&self, dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        self.write_to(&path);
        path
    }
}

/// Deterministic amplitude for a grid cell and depth sample
pub fn amplitude(il: i32, xl: i32, d: usize) -> f32 {
    ((il * 31 + xl * 7) % 50) as f32 - 25.0 + d as f32 * 0.5
}

/// Encode an f32 as IBM hexadecimal float (exact for short binary fractions)
pub fn ieee_to_ibm(value: f32) -> u32 {
    if value == 0.0 {
        return 0;
    }
    let sign = if value < 0.0 { 0x8000_0000 } else { 0 };
    let mut mantissa = value.abs() as f64;
    let mut exponent = 64u32;
    while mantissa >= 1.0 {
        mantissa /= 16.0;
        exponent += 1;
    }
    while mantissa < 1.0 / 16.0 {
        mantissa *= 16.0;
        exponent -= 1;
    }
    let fraction = (mantissa * (1u32 << 24) as f64) as u32;
    sign | (exponent << 24) | fraction
}

fn ascii_to_ebcdic(ch: u8) -> u8 {
    match ch {
        b' ' => 0x40,
        b'0'..=b'9' => 0xF0 + (ch - b'0'),
        b'A'..=b'I' => 0xC1 + (ch - b'A'),
        b'J'..=b'R' => 0xD1 + (ch - b'J'),
        b'S'..=b'Z' => 0xE2 + (ch - b'S'),
        b'a'..=b'i' => 0x81 + (ch - b'a'),
        b'j'..=b'r' => 0x91 + (ch - b'j'),
        b's'..=b'z' => 0xA2 + (ch - b's'),
        b'.' => 0x4B,
        b'-' => 0x60,
        b':' => 0x7A,
        _ => 0x6F,
    }
}

/// Write a `.npy` file through npyz, values given in `order`
pub fn write_npy<T: AutoSerialize>(path: &Path, shape: &[u64], order: Order, values: &[T]) {
    let file = BufWriter::new(File::create(path).unwrap());
    let mut writer = npyz::WriteOptions::new()
        .default_dtype()
        .shape(shape)
        .order(order)
        .writer(file)
        .begin_nd()
        .unwrap();
    for value in values {
        writer.push(value).unwrap();
    }
    writer.finish().unwrap();
}
