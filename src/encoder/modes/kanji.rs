//! Kanji mode encoder (Mode 1000)
//! Shift-JIS double-byte characters in 0x8140-0x9FFC and 0xE040-0xEBBF, 13 bits each

use crate::encoder::bit_buffer::BitBuffer;

/// Kanji mode packer
pub struct KanjiEncoder;

impl KanjiEncoder {
    /// Compacted 13-bit value of the Shift-JIS pair (hi, lo), if it is Kanji-encodable
    pub fn value_of(hi: u8, lo: u8) -> Option<u32> {
        if !(0x40..=0xFC).contains(&lo) || lo == 0x7F {
            return None;
        }
        let code = u32::from(hi) << 8 | u32::from(lo);
        let offset = match code {
            0x8140..=0x9FFC => code - 0x8140,
            0xE040..=0xEBBF => code - 0xC140,
            _ => return None,
        };
        Some((offset >> 8) * 0xC0 + (offset & 0xFF))
    }

    /// Whether `pair` is one Shift-JIS Kanji character
    pub fn is_encodable(pair: &[u8]) -> bool {
        matches!(pair, [hi, lo] if Self::value_of(*hi, *lo).is_some())
    }

    /// Data bits needed for `count` characters
    pub fn bit_length(count: usize) -> usize {
        count * 13
    }

    /// Append the characters in `data` (an even number of bytes). Callers guarantee
    /// every pair is encodable.
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for pair in data.chunks_exact(2) {
            let value = Self::value_of(pair[0], pair[1]).unwrap_or(0);
            out.append_bits(value, 13);
        }
    }
}
