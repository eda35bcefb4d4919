//! Data codeword construction for byte mode
//!
//! Bit layout: mode indicator `0100`, 8-bit byte count, the payload bytes,
//! up to four terminator zeros, zero fill to a byte boundary, then the
//! alternating `0xEC`/`0x11` pad codewords.

use log::trace;

use super::tables::{HEADER_BITS, byte_capacity, data_codewords};
use crate::models::{ECLevel, Version};

const MODE_BYTE: u32 = 0b0100;
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Append-only big-endian bit buffer
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn push_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Smallest version whose byte-mode capacity holds `byte_len` bytes
pub fn select_version(byte_len: usize, ec_level: ECLevel) -> Option<Version> {
    Version::all().find(|&v| byte_capacity(v, ec_level) >= byte_len)
}

/// Build the data codewords for `data` at the given version and level.
///
/// Returns `None` if the payload does not fit.
pub fn encode_data(data: &[u8], version: Version, ec_level: ECLevel) -> Option<Vec<u8>> {
    if data.len() > byte_capacity(version, ec_level) {
        return None;
    }
    let capacity_bits = data_codewords(version, ec_level) * 8;

    let mut buffer = BitBuffer::with_capacity(capacity_bits);
    buffer.push_bits(MODE_BYTE, 4);
    buffer.push_bits(data.len() as u32, HEADER_BITS - 4);
    for &byte in data {
        buffer.push_bits(byte as u32, 8);
    }

    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.push_bits(0, terminator);
    buffer.push_bits(0, (8 - buffer.len() % 8) % 8);

    let mut codewords = buffer.to_bytes();
    let target = capacity_bits / 8;
    let pad_count = target - codewords.len();
    codewords.extend(PAD_CODEWORDS.iter().cycle().take(pad_count));

    trace!(
        "encode_data: {} payload bytes -> {} codewords ({} pad)",
        data.len(),
        codewords.len(),
        pad_count
    );
    Some(codewords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_bit_buffer() {
        let mut buffer = BitBuffer::new();
        assert!(buffer.is_empty());
        buffer.push_bits(0b0100, 4);
        buffer.push_bits(0x05, 8);
        assert_eq!(buffer.len(), 12);
        assert_eq!(buffer.to_bytes(), vec![0x40, 0x50]);
    }

    #[test]
    fn test_select_version() {
        assert_eq!(select_version(5, ECLevel::M), Some(v(1)));
        assert_eq!(select_version(14, ECLevel::M), Some(v(1)));
        assert_eq!(select_version(15, ECLevel::M), Some(v(2)));
        assert_eq!(select_version(0, ECLevel::H), Some(v(1)));
        assert_eq!(select_version(134, ECLevel::L), Some(v(6)));
        assert_eq!(select_version(135, ECLevel::L), None);
        assert_eq!(select_version(59, ECLevel::H), None);
    }

    #[test]
    fn test_encode_hello() {
        let codewords = encode_data(b"HELLO", v(1), ECLevel::M).unwrap();
        assert_eq!(
            codewords,
            vec![
                0x40, 0x54, 0x84, 0x54, 0xC4, 0xC4, 0xF0, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
                0xEC, 0x11, 0xEC
            ]
        );
    }

    #[test]
    fn test_encode_full_capacity_truncates_terminator() {
        // 17 bytes at 1-L fill 148 of 152 bits; the 4-bit terminator closes it exactly
        let data = [0xFFu8; 17];
        let codewords = encode_data(&data, v(1), ECLevel::L).unwrap();
        assert_eq!(codewords.len(), 19);
        assert_eq!(codewords[0], 0x41);
        assert_eq!(codewords[18], 0xF0);
    }

    #[test]
    fn test_encode_rejects_overflow() {
        assert!(encode_data(&[0u8; 15], v(1), ECLevel::M).is_none());
    }

    #[test]
    fn test_codeword_count_matches_table() {
        for version in Version::all() {
            for level in ECLevel::ALL {
                let cap = byte_capacity(version, level);
                let codewords = encode_data(&vec![b'a'; cap], version, level).unwrap();
                assert_eq!(codewords.len(), data_codewords(version, level));
            }
        }
    }
}
