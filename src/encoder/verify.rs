//! Read-back of encoded symbols
//!
//! Walks a finished matrix the way a reader would: format bits, unmasking,
//! zigzag extraction, block de-interleaving, syndrome check and byte-mode
//! parsing. Used to check that what the encoder emits is decodable.

use log::debug;

use super::format::{decode_format_bits, read_format_bits};
use super::function_mask::FunctionPatterns;
use super::galois::Gf256;
use super::mask::apply_mask;
use super::placement::read_data_bits;
use super::tables::{data_codewords, ec_block_info};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Contents recovered from a matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadBack {
    pub payload: Vec<u8>,
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
}

impl ReadBack {
    /// Payload as UTF-8 text, if valid
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Decode a matrix produced by the encoder. Returns `None` if any stage fails,
/// including a non-zero Reed-Solomon syndrome in any block.
pub fn read_back(modules: &BitMatrix) -> Option<ReadBack> {
    let version = Version::from_size(modules.width())?;
    let (ec_level, mask) = decode_format_bits(read_format_bits(modules, 0))
        .or_else(|| decode_format_bits(read_format_bits(modules, 1)))?;

    let func = FunctionPatterns::new(version);
    let mut unmasked = modules.clone();
    apply_mask(&mut unmasked, mask, &func);
    let codewords = read_data_bits(&unmasked, &func);

    let data = deinterleave_and_check(&codewords, version, ec_level)?;
    let payload = parse_byte_segment(&data)?;
    debug!(
        "read back {} bytes from version {} level {} mask {}",
        payload.len(),
        version,
        ec_level,
        mask.index()
    );
    Some(ReadBack {
        payload,
        version,
        ec_level,
        mask,
    })
}

fn deinterleave_and_check(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Option<Vec<u8>> {
    let info = ec_block_info(version, ec_level);
    let num_data = data_codewords(version, ec_level);
    let short_len = num_data / info.num_blocks;
    let num_short = info.num_blocks - num_data % info.num_blocks;

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|_| Vec::with_capacity(short_len + 1 + info.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < short_len || b >= num_short {
                block.push(stream.next()?);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(stream.next()?);
        }
    }

    let mut data = Vec::with_capacity(num_data);
    for block in &blocks {
        let clean =
            (0..info.ecc_per_block).all(|i| Gf256::poly_eval(block, Gf256::exp(i)) == 0);
        if !clean {
            return None;
        }
        data.extend_from_slice(&block[..block.len() - info.ecc_per_block]);
    }
    Some(data)
}

fn parse_byte_segment(data: &[u8]) -> Option<Vec<u8>> {
    let bit = |i: usize| -> Option<u8> { data.get(i / 8).map(|b| (b >> (7 - i % 8)) & 1) };
    let read = |start: usize, count: usize| -> Option<u32> {
        (start..start + count).try_fold(0u32, |acc, i| Some((acc << 1) | bit(i)? as u32))
    };

    if read(0, 4)? != 0b0100 {
        return None;
    }
    let count = read(4, 8)? as usize;
    (0..count).map(|k| read(12 + k * 8, 8).map(|b| b as u8)).collect()
}
