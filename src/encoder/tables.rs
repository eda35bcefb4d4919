use crate::models::{ECLevel, Version};

/// Reed-Solomon block layout for one (version, level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    pub num_blocks: usize,
    pub ecc_per_block: usize,
}

// Tables from the QR Code specification (Model 2), versions 1-6.
// Index: [version - 1]
pub const TOTAL_CODEWORDS: [usize; 6] = [26, 44, 70, 100, 134, 172];

// Index: [ec_level][version - 1]
const ECC_CODEWORDS_PER_BLOCK: [[usize; 6]; 4] = [
    [7, 10, 15, 20, 26, 18],  // Low
    [10, 16, 26, 18, 24, 16], // Medium
    [13, 22, 18, 26, 18, 24], // Quartile
    [17, 28, 22, 16, 22, 28], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[usize; 6]; 4] = [
    [1, 1, 1, 1, 1, 2], // Low
    [1, 1, 1, 2, 2, 4], // Medium
    [1, 1, 2, 2, 4, 4], // Quartile
    [1, 1, 2, 4, 4, 4], // High
];

// Alignment pattern centre coordinates; version 1 has none.
const ALIGNMENT_COORDINATES: [&[usize]; 6] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
];

// Modules left over once every codeword is placed.
const REMAINDER_BITS: [usize; 6] = [0, 7, 7, 7, 7, 7];

// Mode indicator (4 bits) plus byte-mode character count (8 bits) for versions 1-9
pub const HEADER_BITS: usize = 12;

pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[ec_level.index()][version.index()],
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[ec_level.index()][version.index()],
    }
}

pub fn total_codewords(version: Version) -> usize {
    TOTAL_CODEWORDS[version.index()]
}

/// Data codewords left after error correction is reserved
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    let info = ec_block_info(version, ec_level);
    total_codewords(version) - info.num_blocks * info.ecc_per_block
}

/// Maximum input length in bytes for byte mode
pub fn byte_capacity(version: Version, ec_level: ECLevel) -> usize {
    (data_codewords(version, ec_level) * 8 - HEADER_BITS) / 8
}

pub fn alignment_pattern_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_COORDINATES[version.index()]
}

pub fn remainder_bits(version: Version) -> usize {
    REMAINDER_BITS[version.index()]
}
