//! Utility functions

/// Convert a 4-byte IBM hexadecimal float to IEEE single precision
///
/// IBM floats carry a sign bit, a 7-bit base-16 exponent biased by 64, and a
/// 24-bit fraction with no implicit leading bit.
pub fn ibm_to_ieee(bits: u32) -> f32 {
    let fraction = bits & 0x00ff_ffff;
    if fraction == 0 {
        return 0.0;
    }

    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let mantissa = fraction as f64 / (1u32 << 24) as f64;

    (sign * mantissa * 16f64.powi(exponent)) as f32
}

/// Map one EBCDIC (code page 037) byte to ASCII
///
/// Returns `None` for control and national characters with no printable
/// ASCII counterpart.
pub fn ebcdic_to_ascii(byte: u8) -> Option<u8> {
    let ascii = match byte {
        0x00 => 0x00,
        0x25 => b'\n',
        0x40 => b' ',
        0x4B => b'.',
        0x4C => b'<',
        0x4D => b'(',
        0x4E => b'+',
        0x4F => b'|',
        0x50 => b'&',
        0x5A => b'!',
        0x5B => b'$',
        0x5C => b'*',
        0x5D => b')',
        0x5E => b';',
        0x60 => b'-',
        0x61 => b'/',
        0x6B => b',',
        0x6C => b'%',
        0x6D => b'_',
        0x6E => b'>',
        0x6F => b'?',
        0x79 => b'`',
        0x7A => b':',
        0x7B => b'#',
        0x7C => b'@',
        0x7D => b'\'',
        0x7E => b'=',
        0x7F => b'"',
        0x81..=0x89 => b'a' + (byte - 0x81),
        0x91..=0x99 => b'j' + (byte - 0x91),
        0xA2..=0xA9 => b's' + (byte - 0xA2),
        0xC1..=0xC9 => b'A' + (byte - 0xC1),
        0xD1..=0xD9 => b'J' + (byte - 0xD1),
        0xE2..=0xE9 => b'S' + (byte - 0xE2),
        0xF0..=0xF9 => b'0' + (byte - 0xF0),
        _ => return None,
    };
    Some(ascii)
}

/// Memory footprint with binary prefixes, e.g. `"1.5 MiB"`
pub fn format_size(bytes: usize) -> String {
    const PREFIXES: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }
    let mut scaled = bytes as f64 / 1024.0;
    let mut prefix = PREFIXES[0];
    for &next in &PREFIXES[1..] {
        if scaled < 1024.0 {
            break;
        }
        scaled /= 1024.0;
        prefix = next;
    }
    format!("{:.1} {}", scaled, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ibm_to_ieee() {
        assert_eq!(ibm_to_ieee(0x4110_0000), 1.0);
        assert_eq!(ibm_to_ieee(0x4080_0000), 0.5);
        assert_eq!(ibm_to_ieee(0xC276_A000), -118.625);
        assert_eq!(ibm_to_ieee(0x0000_0000), 0.0);
        assert_eq!(ibm_to_ieee(0x8000_0000), 0.0);
    }

    #[test]
    fn test_ebcdic_to_ascii() {
        let ebcdic = [0xC3, 0xF0, 0xF1, 0x40, 0xC3, 0x93, 0x85, 0x81, 0x95];
        let ascii: Vec<u8> = ebcdic.iter().filter_map(|&b| ebcdic_to_ascii(b)).collect();
        assert_eq!(ascii, b"C01 Clean");
        assert_eq!(ebcdic_to_ascii(0xFF), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1536), "1.5 KiB");
        // 64 x 64 x 256 f32 samples
        assert_eq!(format_size(64 * 64 * 256 * 4), "4.0 MiB");
        assert_eq!(format_size(3 << 40), "3.0 TiB");
        assert_eq!(format_size(5000 << 40), "5000.0 TiB");
    }
}
