use super::{BitMatrix, ECLevel, MaskPattern, ModuleMatrix, Version};
use crate::encoder::segment::SegmentInfo;
use std::fmt;

/// Finished QR symbol: version, level, mask and the final module grid.
///
/// Built once by the encoder and read-only afterwards. Renderers only need
/// [`Symbol::side`] and [`Symbol::is_dark`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    penalty: u32,
    segments: Vec<SegmentInfo>,
    modules: BitMatrix,
}

impl Symbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        penalty: u32,
        segments: Vec<SegmentInfo>,
        matrix: &ModuleMatrix,
    ) -> Self {
        Self {
            version,
            ec_level,
            mask,
            penalty,
            segments,
            modules: matrix.to_bit_matrix(),
        }
    }

    /// Side length in modules (17 + 4 * version)
    pub fn side(&self) -> usize {
        self.modules.width()
    }

    /// Whether the module at (row, col) is dark; out-of-bounds reads are light
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level written in the format information
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data region
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Total penalty score of the applied mask
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Mode and character count of each encoded segment, in order
    pub fn segments(&self) -> &[SegmentInfo] {
        &self.segments
    }

    /// Packed module grid (x = column, y = row)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Module rows, top to bottom
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.side())
            .map(|row| (0..self.side()).map(|col| self.is_dark(row, col)).collect())
            .collect()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.side() {
            for col in 0..self.side() {
                let c = if self.is_dark(row, col) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
