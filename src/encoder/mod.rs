//! QR code encoding modules
//!
//! The encoder is a single pass over these stages:
//! - Codeword building (byte mode, terminator, padding)
//! - Reed-Solomon error correction and block interleaving
//! - Function pattern layout and zigzag data placement
//! - Mask trial with penalty scoring and format information

/// Data codeword construction and version selection
pub mod codewords;
/// Environment-driven tuning knobs
pub mod config;
/// Format information (EC level + mask) with BCH(15,5)
pub mod format;
/// Function pattern layout (finder/separator/alignment/timing/format/dark module)
pub mod function_mask;
/// GF(256) arithmetic
pub mod galois;
/// Mask patterns, penalty rules and mask selection
pub mod mask;
/// Zigzag codeword placement
pub mod placement;
/// Reed-Solomon error correction encoding
pub mod reed_solomon;
/// QR specification tables for versions 1-6
pub mod tables;
/// Read-back of encoded matrices
pub mod verify;

use log::debug;

use crate::models::{ECLevel, Version};
use function_mask::FunctionPatterns;
use mask::{MaskSelection, select_best_mask};

/// Run the full pipeline for a payload at a fixed version.
///
/// Returns `None` if the payload does not fit `version` at `ec_level`.
pub fn encode_with_version(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Option<MaskSelection> {
    let data_codewords = codewords::encode_data(data, version, ec_level)?;
    let final_codewords = reed_solomon::interleave_blocks(&data_codewords, version, ec_level);
    debug!(
        "version {} level {}: {} data + {} ec codewords",
        version,
        ec_level,
        data_codewords.len(),
        final_codewords.len() - data_codewords.len()
    );

    let func = FunctionPatterns::new(version);
    let mut modules = func.modules().clone();
    placement::place_data_bits(&mut modules, &func, &final_codewords);

    Some(select_best_mask(&modules, &func, ec_level))
}
