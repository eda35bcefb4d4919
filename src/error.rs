//! Error types for QR encoding

use thiserror::Error;

/// Errors that can occur while encoding a QR code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Input does not fit in any supported version at the requested level
    #[error("Input of {len} bytes exceeds the {max}-byte capacity of version 6")]
    DataTooLong {
        /// Input length in bytes
        len: usize,
        /// Largest byte count that fits at the requested level
        max: usize,
    },

    /// Version number outside 1-6
    #[error("Unsupported QR version {0} (expected 1-6)")]
    InvalidVersion(u8),

    /// Unrecognised error correction level name
    #[error("Unknown error correction level {0:?} (expected L, M, Q or H)")]
    InvalidEcLevel(String),
}
