//! Byte mode encoder (Mode 0100) for 8-bit data

use crate::encoder::bit_buffer::BitBuffer;

/// Byte mode packer
pub struct ByteEncoder;

impl ByteEncoder {
    /// Data bits for `count` bytes
    pub fn bit_length(count: usize) -> usize {
        count * 8
    }

    /// Append each byte as 8 bits
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for &byte in data {
            out.append_bits(u32::from(byte), 8);
        }
    }
}
