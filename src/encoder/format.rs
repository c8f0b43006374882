//! Format information: 5 data bits (EC level + mask) protected by BCH(15,5)

use crate::models::{ECLevel, MaskPattern, ModuleMatrix};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u32 = 0x5412;

/// EC level and mask id as written around the finder patterns
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Applied mask
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Format information for a level and mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// 15-bit masked BCH codeword
    pub fn bits(&self) -> u16 {
        let data = u32::from(self.ec_level.format_bits()) << 3 | u32::from(self.mask_pattern.id());
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
        }
        ((data << 10 | rem) ^ FORMAT_MASK) as u16
    }

    /// Write both copies into the reserved format areas (bit 0 = least significant)
    pub fn draw(&self, matrix: &mut ModuleMatrix) {
        let bits = self.bits();
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = matrix.size();

        // Around the top-left finder
        for i in 0..6 {
            matrix.set_function(i, 8, bit(i));
        }
        matrix.set_function(7, 8, bit(6));
        matrix.set_function(8, 8, bit(7));
        matrix.set_function(8, 7, bit(8));
        for i in 9..15 {
            matrix.set_function(8, 14 - i, bit(i));
        }

        // Split between the top-right and bottom-left finders
        for i in 0..8 {
            matrix.set_function(8, size - 1 - i, bit(i));
        }
        for i in 8..15 {
            matrix.set_function(size - 15 + i, 8, bit(i));
        }
        matrix.set_function(size - 8, 8, true);
    }
}
