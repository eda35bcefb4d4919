/// Format information encoding: 5 data bits (EC level + mask) protected by BCH(15,5)
use crate::models::{BitMatrix, ECLevel, MaskPattern};

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const GENERATOR: u16 = 0b101_0011_0111;
const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

/// 15-bit format word for the given level and mask, already XOR-masked
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u16) << 3) | mask.index() as u16;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * GENERATOR);
    }
    ((data << 10) | (rem & 0x3FF)) ^ FORMAT_MASK
}

/// Decode a format word read from a matrix to the nearest valid codeword.
///
/// BCH(15,5) has minimum distance 7, so up to 3 bit errors are corrected.
pub fn decode_format_bits(bits: u16) -> Option<(ECLevel, MaskPattern)> {
    let mut best: Option<(u32, ECLevel, MaskPattern)> = None;
    for level in ECLevel::ALL {
        for mask in MaskPattern::ALL {
            let distance = (format_bits(level, mask) ^ bits).count_ones();
            if best.is_none_or(|(d, _, _)| distance < d) {
                best = Some((distance, level, mask));
            }
        }
    }
    best.filter(|(d, _, _)| *d <= 3)
        .map(|(_, level, mask)| (level, mask))
}

/// (x, y) module of each format bit (index 0 = least significant) for both copies.
///
/// Copy 0 wraps the top-left finder; copy 1 is split between the top-right
/// (bits 0-7, row 8) and bottom-left (bits 8-14, column 8) finders.
pub fn format_bit_positions(size: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, pos) in first.iter_mut().enumerate() {
        *pos = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    for (i, pos) in second.iter_mut().enumerate() {
        *pos = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
    }
    [first, second]
}

/// Write both copies of the format word into the matrix
pub fn draw_format_bits(modules: &mut BitMatrix, bits: u16) {
    for copy in format_bit_positions(modules.width()) {
        for (i, (x, y)) in copy.into_iter().enumerate() {
            modules.set(x, y, (bits >> i) & 1 == 1);
        }
    }
}

/// Read one copy (0 or 1) of the format word back out of a matrix
pub fn read_format_bits(modules: &BitMatrix, copy: usize) -> u16 {
    format_bit_positions(modules.width())[copy.min(1)]
        .iter()
        .enumerate()
        .fold(0u16, |acc, (i, &(x, y))| acc | ((modules.get(x, y) as u16) << i))
}
