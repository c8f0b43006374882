use crate::error::{EncodeError, Result};
use std::fmt;
use std::str::FromStr;

/// QR Code Model 2 version (1-40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version (21x21 modules)
    pub const MIN: Version = Version(1);
    /// Largest version (177x177 modules)
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1-40
    pub fn new(number: u8) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EncodeError::InvalidVersion(number))
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Character-count field width group: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub fn count_bits_group(&self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Whether the symbol carries version information blocks (7+)
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Versions from `self` through `last`, inclusive
    pub fn range_to(self, last: Version) -> impl Iterator<Item = Version> {
        (self.0..=last.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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
    /// All levels, weakest first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Table index (L=0 .. H=3)
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Two-bit value stored in format information (01=L, 00=M, 11=Q, 10=H)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Get error correction level from its format information bits
    pub fn from_format_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0b01 => Some(ECLevel::L),
            0b00 => Some(ECLevel::M),
            0b11 => Some(ECLevel::Q),
            0b10 => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Next stronger level, if any
    pub fn stronger(&self) -> Option<Self> {
        match self {
            ECLevel::L => Some(ECLevel::M),
            ECLevel::M => Some(ECLevel::Q),
            ECLevel::Q => Some(ECLevel::H),
            ECLevel::H => None,
        }
    }
}

impl FromStr for ECLevel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ECLevel::L),
            "M" | "MEDIUM" => Ok(ECLevel::M),
            "Q" | "QUARTILE" => Ok(ECLevel::Q),
            "H" | "HIGH" => Ok(ECLevel::H),
            _ => Err(EncodeError::InvalidEcLevel(s.to_string())),
        }
    }
}

/// Mask pattern (0-7), conditions over (i = row, j = column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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

impl MaskPattern {
    /// All eight patterns in id order
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

    /// Get mask pattern from its 3-bit id
    pub fn from_bits(bits: u8) -> Result<Self> {
        Self::ALL
            .get(bits as usize)
            .copied()
            .ok_or(EncodeError::InvalidMask(bits))
    }

    /// 3-bit id stored in format information
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if module at (i, j) should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}
