//! Alphanumeric mode encoder (Mode 0010)
//! Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
//! Pairs = 11 bits, single = 6 bits

use crate::encoder::bit_buffer::BitBuffer;

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Alphanumeric mode packer
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Index of `byte` in the 45-character set
    pub fn value_of(byte: u8) -> Option<u32> {
        ALPHANUMERIC_CHARSET
            .iter()
            .position(|&c| c == byte)
            .map(|i| i as u32)
    }

    /// Whether `byte` is in the 45-character set
    pub fn is_encodable(byte: u8) -> bool {
        Self::value_of(byte).is_some()
    }

    /// Data bits needed for `count` characters
    pub fn bit_length(count: usize) -> usize {
        count / 2 * 11 + count % 2 * 6
    }

    /// Append the characters in `data`. Callers guarantee every byte is in the set.
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for pair in data.chunks(2) {
            let value = pair
                .iter()
                .fold(0u32, |acc, &c| acc * 45 + Self::value_of(c).unwrap_or(0));
            out.append_bits(value, if pair.len() == 2 { 11 } else { 6 });
        }
    }
}
