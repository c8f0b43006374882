//! Reference decoder used by the integration tests.
//!
//! Reads a symbol back from its module grid alone: format information, function
//! module map, unmasking, zigzag extraction, de-interleaving, RS syndrome check
//! and segment parsing. Alignment positions and field arithmetic are recomputed
//! here rather than borrowed from the encoder.

#![allow(dead_code)]

use rust_qrgen::encoder::tables::ec_block_info;
use rust_qrgen::{ECLevel, MaskPattern, Symbol, Version};

/// What the reference decoder recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub version: u8,
    pub ec_level: ECLevel,
    pub mask: u8,
    pub data: Vec<u8>,
    pub eci: Option<u32>,
    pub modes: Vec<u8>,
}

pub fn decode_symbol(symbol: &Symbol) -> Result<Decoded, String> {
    decode_grid(&symbol.to_rows())
}

pub fn decode_grid(grid: &[Vec<bool>]) -> Result<Decoded, String> {
    let size = grid.len();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad side {size}"));
    }
    let version = ((size - 17) / 4) as u8;

    let (ec_level, mask) = read_format(grid)?;
    if version >= 7 {
        let bits = read_version_bits(grid);
        if bits != version_word(version) {
            return Err(format!("version info {bits:#x} does not match v{version}"));
        }
    }

    let function = function_map(version);
    let mask_pattern = MaskPattern::from_bits(mask).map_err(|e| e.to_string())?;
    let bits = extract_bits(grid, &function, mask_pattern);
    let codewords: Vec<u8> = bits
        .chunks_exact(8)
        .map(|c| c.iter().fold(0u8, |acc, &b| acc << 1 | b as u8))
        .collect();

    let version_t = Version::new(version).map_err(|e| e.to_string())?;
    let data_codewords = deinterleave_and_check(&codewords, version_t, ec_level)?;
    let (data, eci, modes) = decode_payload(&data_codewords, version)?;
    Ok(Decoded {
        version,
        ec_level,
        mask,
        data,
        eci,
        modes,
    })
}

// ---------------------------------------------------------------------------
// Format and version information

pub fn format_word(ec_bits: u8, mask: u8) -> u16 {
    let data = (u32::from(ec_bits) << 3) | u32::from(mask);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    (((data << 10) | rem) ^ 0x5412) as u16
}

pub fn version_word(version: u8) -> u32 {
    let mut rem = u32::from(version);
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (u32::from(version) << 12) | rem
}

fn read_format(grid: &[Vec<bool>]) -> Result<(ECLevel, u8), String> {
    let size = grid.len();
    let at = |r: usize, c: usize| grid[r][c] as u16;

    let mut first = 0u16;
    for i in 0..6 {
        first |= at(i, 8) << i;
    }
    first |= at(7, 8) << 6;
    first |= at(8, 8) << 7;
    first |= at(8, 7) << 8;
    for i in 9..15 {
        first |= at(8, 14 - i) << i;
    }

    let mut second = 0u16;
    for i in 0..8 {
        second |= at(8, size - 1 - i) << i;
    }
    for i in 8..15 {
        second |= at(size - 15 + i, 8) << i;
    }

    if first != second {
        return Err(format!("format copies differ: {first:015b} vs {second:015b}"));
    }
    if !grid[size - 8][8] {
        return Err("dark module is light".into());
    }
    for ec_bits in 0..4u8 {
        for mask in 0..8u8 {
            if format_word(ec_bits, mask) == first {
                let ec = ECLevel::from_format_bits(ec_bits).ok_or("bad ec bits")?;
                return Ok((ec, mask));
            }
        }
    }
    Err(format!("no format word matches {first:015b}"))
}

fn read_version_bits(grid: &[Vec<bool>]) -> u32 {
    let size = grid.len();
    let mut top_right = 0u32;
    let mut bottom_left = 0u32;
    for i in 0..18 {
        let (a, b) = (size - 11 + i % 3, i / 3);
        top_right |= (grid[b][a] as u32) << i;
        bottom_left |= (grid[a][b] as u32) << i;
    }
    if top_right == bottom_left {
        top_right
    } else {
        u32::MAX
    }
}

// ---------------------------------------------------------------------------
// Function modules and bit extraction

pub fn alignment_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let v = version as usize;
    let count = v / 7 + 2;
    let step = if v == 32 {
        26
    } else {
        (v * 4 + count * 2 + 1) / (count * 2 - 2) * 2
    };
    let size = 17 + 4 * v;
    let mut positions = vec![6];
    for i in (0..count - 1).rev() {
        positions.push(size - 7 - i * step);
    }
    positions
}

/// true = function module; indexed [row][col]
pub fn function_map(version: u8) -> Vec<Vec<bool>> {
    let size = 17 + 4 * version as usize;
    let mut map = vec![vec![false; size]; size];
    let mark = |r: usize, c: usize, map: &mut Vec<Vec<bool>>| {
        if r < size && c < size {
            map[r][c] = true;
        }
    };

    // Finders + separators + format areas
    for r in 0..9 {
        for c in 0..9 {
            mark(r, c, &mut map);
        }
    }
    for r in 0..9 {
        for c in size - 8..size {
            mark(r, c, &mut map);
        }
    }
    for r in size - 8..size {
        for c in 0..9 {
            mark(r, c, &mut map);
        }
    }
    for i in 0..size {
        mark(6, i, &mut map);
        mark(i, 6, &mut map);
    }

    let align = alignment_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &ar) in align.iter().enumerate() {
        for (j, &ac) in align.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for r in ar - 2..=ar + 2 {
                for c in ac - 2..=ac + 2 {
                    mark(r, c, &mut map);
                }
            }
        }
    }

    if version >= 7 {
        for r in 0..6 {
            for c in size - 11..size - 8 {
                mark(r, c, &mut map);
                mark(c, r, &mut map);
            }
        }
    }
    map
}

fn extract_bits(grid: &[Vec<bool>], function: &[Vec<bool>], mask: MaskPattern) -> Vec<bool> {
    let size = grid.len();
    let mut bits = Vec::new();
    let mut upward = true;
    let mut col = size as i32 - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        for step in 0..size {
            let row = if upward { size - 1 - step } else { step };
            for c in [col as usize, col as usize - 1] {
                if !function[row][c] {
                    bits.push(grid[row][c] ^ mask.is_masked(row, c));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    bits
}

// ---------------------------------------------------------------------------
// Blocks and Reed-Solomon check

fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1D;
        }
        b >>= 1;
    }
    product
}

/// All syndromes S_i = c(alpha^i), i < ecc, must vanish for a valid block
fn syndromes_vanish(block: &[u8], ecc: usize) -> bool {
    let mut alpha_i = 1u8;
    for _ in 0..ecc {
        let value = block.iter().fold(0u8, |acc, &c| gf_mul(acc, alpha_i) ^ c);
        if value != 0 {
            return false;
        }
        alpha_i = gf_mul(alpha_i, 2);
    }
    true
}

fn deinterleave_and_check(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, String> {
    let info = ec_block_info(version, ec_level);
    let total = codewords.len();
    let data_total = total - info.num_blocks * info.ecc_per_block;
    let num_long = data_total % info.num_blocks;
    let num_short = info.num_blocks - num_long;
    let short_len = data_total / info.num_blocks;

    let mut blocks: Vec<Vec<u8>> = vec![Vec::new(); info.num_blocks];
    let mut idx = 0;
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            let len = if b < num_short { short_len } else { short_len + 1 };
            if i < len {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(codewords[idx]);
            idx += 1;
        }
    }

    let mut data = Vec::with_capacity(data_total);
    for (b, block) in blocks.iter().enumerate() {
        if !syndromes_vanish(block, info.ecc_per_block) {
            return Err(format!("block {b} fails RS check"));
        }
        data.extend_from_slice(&block[..block.len() - info.ecc_per_block]);
    }
    Ok(data)
}

// ---------------------------------------------------------------------------
// Segment parsing

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    fn read_bits(&mut self, n: usize) -> Result<u32, String> {
        if self.idx + n > self.bits.len() {
            return Err("stream ends mid-field".into());
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Ok(val)
    }
}

fn char_count_bits(mode: u8, version: u8) -> usize {
    let group = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        1 => [10, 12, 14][group],
        2 => [9, 11, 13][group],
        4 => [8, 16, 16][group],
        8 => [8, 10, 12][group],
        _ => 0,
    }
}

type Payload = (Vec<u8>, Option<u32>, Vec<u8>);

fn decode_payload(data_codewords: &[u8], version: u8) -> Result<Payload, String> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();
    let mut reader = BitReader::new(&bits);
    let mut data = Vec::new();
    let mut eci = None;
    let mut modes = Vec::new();

    while reader.remaining() >= 4 {
        let mode = reader.read_bits(4)? as u8;
        if mode == 0 {
            break;
        }
        modes.push(mode);
        let count = reader.read_bits(char_count_bits(mode, version))? as usize;
        match mode {
            1 => {
                let mut left = count;
                while left > 0 {
                    let digits = left.min(3);
                    let value = reader.read_bits(digits * 3 + 1)?;
                    let text = format!("{value:0width$}", width = digits);
                    if text.len() != digits {
                        return Err(format!("numeric group {value} overflows"));
                    }
                    data.extend_from_slice(text.as_bytes());
                    left -= digits;
                }
            }
            2 => {
                let mut left = count;
                while left > 0 {
                    if left >= 2 {
                        let value = reader.read_bits(11)? as usize;
                        if value >= 45 * 45 {
                            return Err("alphanumeric pair out of range".into());
                        }
                        data.push(ALPHANUMERIC[value / 45]);
                        data.push(ALPHANUMERIC[value % 45]);
                        left -= 2;
                    } else {
                        let value = reader.read_bits(6)? as usize;
                        data.push(*ALPHANUMERIC.get(value).ok_or("alphanumeric out of range")?);
                        left -= 1;
                    }
                }
            }
            4 => {
                for _ in 0..count {
                    data.push(reader.read_bits(8)? as u8);
                }
            }
            7 => {
                let mut value = reader.read_bits(8)?;
                if value & 0x80 != 0 {
                    if value & 0x40 == 0 {
                        value = ((value & 0x3F) << 8) | reader.read_bits(8)?;
                    } else {
                        value = ((value & 0x1F) << 16) | reader.read_bits(16)?;
                    }
                }
                eci = Some(value);
            }
            8 => {
                for _ in 0..count {
                    let val = reader.read_bits(13)?;
                    let mut code = ((val / 0xC0) << 8) | (val % 0xC0);
                    code += if code < 0x1F00 { 0x8140 } else { 0xC140 };
                    data.push((code >> 8) as u8);
                    data.push((code & 0xFF) as u8);
                }
            }
            other => return Err(format!("unknown mode {other:04b}")),
        }
    }

    // Everything after the terminator must be zero bits then 0xEC/0x11 filler
    let consumed_bytes = reader.idx.div_ceil(8);
    if bits[reader.idx..consumed_bytes * 8].iter().any(|&b| b) {
        return Err("non-zero bit padding".into());
    }
    for (i, &byte) in data_codewords[consumed_bytes.min(data_codewords.len())..]
        .iter()
        .enumerate()
    {
        let expected = if i % 2 == 0 { 0xEC } else { 0x11 };
        if byte != expected {
            return Err(format!("pad byte {i} is {byte:#04x}"));
        }
    }
    Ok((data, eci, modes))
}
