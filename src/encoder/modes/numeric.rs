//! Numeric mode encoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::encoder::bit_buffer::BitBuffer;

/// Numeric mode packer
pub struct NumericEncoder;

impl NumericEncoder {
    /// Whether `byte` is an ASCII digit
    pub fn is_encodable(byte: u8) -> bool {
        byte.is_ascii_digit()
    }

    /// Data bits needed for `count` digits
    pub fn bit_length(count: usize) -> usize {
        count / 3 * 10
            + match count % 3 {
                0 => 0,
                1 => 4,
                _ => 7,
            }
    }

    /// Append the digits in `data`. Callers guarantee every byte is a digit.
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for group in data.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            out.append_bits(value, group.len() as u8 * 3 + 1);
        }
    }
}
