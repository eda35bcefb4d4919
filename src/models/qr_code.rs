use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::error::EncodeError;

/// QR code version (1-6 are supported by the encoder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest supported version
    pub const MIN: Version = Version(1);
    /// Largest supported version
    pub const MAX: Version = Version(6);

    /// Create a version, returning `None` outside 1-6
    pub fn new(number: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&number)
            .then_some(Self(number))
    }

    /// All supported versions in ascending order
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Recover the version from a matrix side length
    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Self::new)
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u8> for Version {
    type Error = EncodeError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(EncodeError::InvalidVersion(number))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels, lowest redundancy first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit indicator carried in the format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for ECLevel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ECLevel::L),
            "M" | "MEDIUM" => Ok(ECLevel::M),
            "Q" | "QUARTILE" => Ok(ECLevel::Q),
            "H" | "HIGH" => Ok(ECLevel::H),
            _ => Err(EncodeError::InvalidEcLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

type MaskFn = fn(usize, usize) -> bool;

// Indexed by pattern number; i = row, j = column.
const MASK_FUNCTIONS: [MaskFn; 8] = [
    |i, j| (i + j) % 2 == 0,
    |i, _| i % 2 == 0,
    |_, j| j % 3 == 0,
    |i, j| (i + j) % 3 == 0,
    |i, j| (i / 2 + j / 3) % 2 == 0,
    |i, j| (i * j) % 2 + (i * j) % 3 == 0,
    |i, j| ((i * j) % 2 + (i * j) % 3) % 2 == 0,
    |i, j| ((i + j) % 2 + (i * j) % 3) % 2 == 0,
];

impl MaskPattern {
    /// All patterns in trial order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Pattern number 0-7
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Check if module at (row i, column j) should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        MASK_FUNCTIONS[*self as usize](i, j)
    }
}

/// Encoded QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    /// Module matrix (true = dark, false = light)
    pub modules: BitMatrix,
    /// Version, `None` for the empty-input and placeholder matrices
    pub version: Option<Version>,
    /// Error correction level requested by the caller
    pub error_correction: ECLevel,
    /// Mask pattern committed by the mask selector
    pub mask_pattern: Option<MaskPattern>,
}

impl QrCode {
    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether the module at (row, col) is dark
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Row-major 0/1 matrix (1 = dark)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.modules.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 41);
        assert!(Version::new(0).is_none());
        assert!(Version::new(7).is_none());
    }

    #[test]
    fn test_version_from_size() {
        for v in Version::all() {
            assert_eq!(Version::from_size(v.size()), Some(v));
        }
        assert_eq!(Version::from_size(22), None);
        assert_eq!(Version::from_size(45), None);
        assert_eq!(Version::from_size(1), None);
    }

    #[test]
    fn test_ec_level_format_bits() {
        let mut bits: Vec<u8> = ECLevel::ALL.iter().map(|l| l.format_bits()).collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), 4);
        assert_eq!(ECLevel::M.format_bits(), 0b00);
        assert_eq!(ECLevel::L.format_bits(), 0b01);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("m".parse::<ECLevel>().unwrap(), ECLevel::M);
        assert_eq!(" High ".parse::<ECLevel>().unwrap(), ECLevel::H);
        assert!("X".parse::<ECLevel>().is_err());
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));

        assert!(MaskPattern::Pattern1.is_masked(2, 1));
        assert!(!MaskPattern::Pattern1.is_masked(1, 2));
        assert!(MaskPattern::Pattern2.is_masked(1, 3));
        assert!(!MaskPattern::Pattern2.is_masked(3, 1));
    }

    #[test]
    fn test_mask_from_bits() {
        for (i, mask) in MaskPattern::ALL.iter().enumerate() {
            assert_eq!(MaskPattern::from_bits(i as u8), *mask);
            assert_eq!(mask.index(), i as u8);
        }
    }
}
