//! Version information for versions 7-40: 6 data bits protected by BCH(18,6)

use super::function_patterns::version_info_positions;
use crate::models::{ModuleMatrix, Version};

const VERSION_GENERATOR: u32 = 0x1F25;

/// Version information blocks for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// 18-bit BCH codeword for `version`
    pub fn bits(version: Version) -> u32 {
        let v = u32::from(version.number());
        let mut rem = v;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
        }
        v << 12 | rem
    }

    /// Write both copies; no-op below version 7
    pub fn draw(version: Version, matrix: &mut ModuleMatrix) {
        if !version.has_version_info() {
            return;
        }
        let bits = Self::bits(version);
        for (i, (row, col)) in version_info_positions(matrix.size()).enumerate() {
            let dark = (bits >> i) & 1 != 0;
            matrix.set_function(row, col, dark);
            matrix.set_function(col, row, dark);
        }
    }
}
