//! QR code encoding modules
//!
//! Everything between a payload and a finished symbol:
//! - Mode segmentation and version selection
//! - Codeword assembly and Reed-Solomon error correction
//! - Function patterns, data placement and masking

/// Append-only bit sequence
pub mod bit_buffer;
/// Codeword assembler (padding, block split, interleaving)
pub mod codewords;
/// Environment tunables for mask evaluation
pub mod config;
/// Format information (EC level + mask, BCH(15,5))
pub mod format;
/// Finder, timing and alignment patterns plus reserved areas
pub mod function_patterns;
/// GF(256) arithmetic
pub mod gf256;
/// Mask application and penalty scoring
pub mod mask;
/// Data mode packers (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Zigzag data placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction codewords
pub mod reed_solomon;
/// Segments and modes
pub mod segment;
/// Optimal segmentation and version selection
pub mod segmenter;
/// ISO/IEC 18004 tables (capacities, EC blocks, alignment positions)
pub mod tables;
/// Version information (versions 7-40, BCH(18,6))
pub mod version_info;

use crate::error::{EncodeError, Result};
use crate::models::{MaskPattern, Version};

/// Per-call encoder settings.
///
/// ```
/// use rust_qrgen::encoder::EncodeOptions;
/// use rust_qrgen::MaskPattern;
///
/// let options = EncodeOptions::new()
///     .min_version(2)
///     .mask(MaskPattern::Pattern4)
///     .boost_ec(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    min_version: u8,
    max_version: u8,
    mask: Option<MaskPattern>,
    boost_ec: bool,
    kanji: bool,
    eci: Option<u32>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            min_version: Version::MIN.number(),
            max_version: Version::MAX.number(),
            mask: None,
            boost_ec: false,
            kanji: false,
            eci: None,
        }
    }
}

impl EncodeOptions {
    /// Default options: versions 1-40, automatic mask, no boosting
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest version to consider
    pub fn min_version(mut self, version: u8) -> Self {
        self.min_version = version;
        self
    }

    /// Largest version to consider
    pub fn max_version(mut self, version: u8) -> Self {
        self.max_version = version;
        self
    }

    /// Use this mask instead of the lowest-penalty one
    pub fn mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Raise the EC level as far as the chosen version still allows
    pub fn boost_ec(mut self, enabled: bool) -> Self {
        self.boost_ec = enabled;
        self
    }

    /// Allow Kanji mode for Shift-JIS double-byte characters
    pub fn kanji(mut self, enabled: bool) -> Self {
        self.kanji = enabled;
        self
    }

    /// Prefix the stream with an ECI designator
    pub fn eci(mut self, assignment: u32) -> Self {
        self.eci = Some(assignment);
        self
    }

    /// Mask set with [`EncodeOptions::mask`], if any
    pub fn forced_mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Whether EC boosting is on
    pub fn boost_ec_enabled(&self) -> bool {
        self.boost_ec
    }

    /// Whether Kanji mode may be chosen
    pub fn kanji_enabled(&self) -> bool {
        self.kanji
    }

    /// ECI assignment number, if any
    pub fn eci_assignment(&self) -> Option<u32> {
        self.eci
    }

    /// Checked version range
    pub fn version_range(&self) -> Result<(Version, Version)> {
        let min = Version::new(self.min_version)?;
        let max = Version::new(self.max_version)?;
        if min > max {
            return Err(EncodeError::InvalidVersionRange {
                min: self.min_version,
                max: self.max_version,
            });
        }
        Ok((min, max))
    }

    /// Reject out-of-range settings before any work is done
    pub fn validate(&self) -> Result<()> {
        self.version_range()?;
        if let Some(eci) = self.eci {
            if eci > 999_999 {
                return Err(EncodeError::InvalidEci(eci));
            }
        }
        Ok(())
    }
}
