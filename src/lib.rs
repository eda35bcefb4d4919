//! RustQR encoder - byte-mode QR code generation in pure Rust
//!
//! Turns text or bytes into a square module matrix for versions 1-6 at any
//! error correction level. Encoding is a pure function: no shared mutable
//! state, so it is safe to call from many threads at once.
//!
//! ```
//! use rust_qr_encode::{ECLevel, encode};
//!
//! let qr = encode("HELLO", ECLevel::M).unwrap();
//! assert_eq!(qr.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding pipeline (codewords, error correction, placement, masking)
#[allow(missing_docs)]
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrCode, BitMatrix, Version, etc.)
pub mod models;
/// Raster and terminal rendering
pub mod render;

pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};

use log::{debug, warn};
use rayon::prelude::*;

use encoder::codewords::select_version;
use encoder::tables::byte_capacity;

/// Side length of the over-capacity placeholder
pub const PLACEHOLDER_SIZE: usize = 21;

/// Encode UTF-8 text
///
/// # Arguments
/// * `text` - Text to encode; multi-byte characters count as several bytes
/// * `ec_level` - Error correction level
///
/// # Returns
/// The encoded symbol, or [`EncodeError::DataTooLong`] if no version up to 6 fits.
/// Empty text yields a 1x1 light matrix with no version.
pub fn encode(text: &str, ec_level: ECLevel) -> Result<QrCode, EncodeError> {
    encode_bytes(text.as_bytes(), ec_level)
}

/// Encode raw bytes in byte mode
pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<QrCode, EncodeError> {
    if data.is_empty() {
        return Ok(empty_symbol(ec_level));
    }

    let too_long = || EncodeError::DataTooLong {
        len: data.len(),
        max: byte_capacity(Version::MAX, ec_level),
    };
    let version = select_version(data.len(), ec_level).ok_or_else(too_long)?;
    debug!(
        "encoding {} bytes at level {}: version {}",
        data.len(),
        ec_level,
        version
    );

    let selection =
        encoder::encode_with_version(data, version, ec_level).ok_or_else(too_long)?;
    Ok(QrCode {
        modules: selection.modules,
        version: Some(version),
        error_correction: ec_level,
        mask_pattern: Some(selection.mask),
    })
}

/// Encode, substituting the placeholder matrix when the input is too long.
///
/// Always returns something renderable. The placeholder is deliberately not a
/// valid symbol; use [`encode`] when the caller needs to know.
pub fn encode_or_placeholder(text: &str, ec_level: ECLevel) -> QrCode {
    match encode(text, ec_level) {
        Ok(qr) => qr,
        Err(err) => {
            warn!("{err}; rendering placeholder instead");
            QrCode {
                modules: placeholder_matrix(),
                version: None,
                error_correction: ec_level,
                mask_pattern: None,
            }
        }
    }
}

/// Encode many inputs on the rayon pool; results keep the input order
pub fn encode_batch<S: AsRef<str> + Sync>(
    texts: &[S],
    ec_level: ECLevel,
) -> Vec<Result<QrCode, EncodeError>> {
    texts
        .par_iter()
        .map(|text| encode(text.as_ref(), ec_level))
        .collect()
}

/// 21x21 diagonal cross (both diagonals dark)
pub fn placeholder_matrix() -> BitMatrix {
    let mut modules = BitMatrix::square(PLACEHOLDER_SIZE);
    for i in 0..PLACEHOLDER_SIZE {
        modules.set(i, i, true);
        modules.set(PLACEHOLDER_SIZE - 1 - i, i, true);
    }
    modules
}

fn empty_symbol(ec_level: ECLevel) -> QrCode {
    QrCode {
        modules: BitMatrix::square(1),
        version: None,
        error_correction: ec_level,
        mask_pattern: None,
    }
}
