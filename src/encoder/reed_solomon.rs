/// Reed-Solomon error correction encoding for QR codes
use super::galois::Gf256;
use super::tables::{ec_block_info, total_codewords};
use crate::models::{ECLevel, Version};

/// Generator polynomial prod(x - alpha^i) for i in 0..ecc_count.
///
/// Coefficients are in descending degree order, leading coefficient 1.
pub fn generator_polynomial(ecc_count: usize) -> Vec<u8> {
    (0..ecc_count).fold(vec![1u8], |g, i| Gf256::poly_mul(&g, &[1, Gf256::exp(i)]))
}

/// Error correction codewords for one block
pub fn compute_ec_codewords(data_block: &[u8], ecc_count: usize) -> Vec<u8> {
    Gf256::poly_rem(data_block, &generator_polynomial(ecc_count))
}

/// Split data codewords into blocks, shorter blocks first
pub fn split_blocks(data: &[u8], num_blocks: usize) -> Vec<&[u8]> {
    if num_blocks == 0 {
        return Vec::new();
    }
    let short_len = data.len() / num_blocks;
    let num_long = data.len() % num_blocks;
    let num_short = num_blocks - num_long;

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut offset = 0;
    for i in 0..num_blocks {
        let len = if i < num_short { short_len } else { short_len + 1 };
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }
    blocks
}

/// Round-robin interleave: index 0 of every block, then index 1, and so on
fn interleave_into<T: AsRef<[u8]>>(blocks: &[T], out: &mut Vec<u8>) {
    let max_len = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    for i in 0..max_len {
        for block in blocks {
            if let Some(&byte) = block.as_ref().get(i) {
                out.push(byte);
            }
        }
    }
}

/// Compute per-block error correction and return the final codeword sequence
/// (interleaved data followed by interleaved error correction).
pub fn interleave_blocks(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let generator = generator_polynomial(info.ecc_per_block);

    let data_blocks = split_blocks(data, info.num_blocks);
    let ec_blocks: Vec<Vec<u8>> = data_blocks
        .iter()
        .map(|block| Gf256::poly_rem(block, &generator))
        .collect();

    let mut out = Vec::with_capacity(total_codewords(version));
    interleave_into(&data_blocks, &mut out);
    interleave_into(&ec_blocks, &mut out);
    out
}
