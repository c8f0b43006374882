use crate::models::{ECLevel, Version};

/// Error correction block structure for one version and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Number of Reed-Solomon blocks
    pub num_blocks: usize,
    /// EC codewords in every block
    pub ecc_per_block: usize,
}

// ISO/IEC 18004 Model 2 tables.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Alignment pattern centre coordinates per version (same list for rows and columns)
const ALIGNMENT_PATTERN_POSITIONS: [&[u8]; 41] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Block count and EC codewords per block
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let (idx, v) = (ec_level.ordinal(), version.number() as usize);
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize,
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[idx][v] as usize,
    }
}

/// Alignment pattern center coordinates; empty for version 1
pub fn alignment_pattern_positions(version: Version) -> &'static [u8] {
    ALIGNMENT_PATTERN_POSITIONS[version.number() as usize]
}

/// Modules available for codewords and remainder bits, after all function
/// patterns, format and version information are excluded
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Total codewords (data + error correction)
pub fn total_codewords(version: Version) -> usize {
    raw_data_modules(version) / 8
}

/// Data codewords available at the given level
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    let info = ec_block_info(version, ec_level);
    total_codewords(version) - info.ecc_per_block * info.num_blocks
}

/// Data capacity in bits
pub fn data_capacity_bits(version: Version, ec_level: ECLevel) -> usize {
    data_codewords(version, ec_level) * 8
}

/// Trailing modules left after the last whole codeword (0, 3, 4 or 7)
pub fn remainder_bits(version: Version) -> usize {
    raw_data_modules(version) % 8
}
