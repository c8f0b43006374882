/// Append-only bit sequence, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether no bits have been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, high bit first (count <= 32)
    pub fn append_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append every bit of `other`
    pub fn extend_from(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Bits in write order
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes, MSB first. A trailing partial byte is zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits_msb_first() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b0100, 4);
        buf.append_bits(2, 8);
        assert_eq!(buf.len(), 12);
        assert_eq!(
            buf.bits()[..4].to_vec(),
            vec![false, true, false, false]
        );
        assert_eq!(buf.to_bytes(), vec![0b0100_0000, 0b0010_0000]);
    }

    #[test]
    fn test_zero_width_append() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_extend_from() {
        let mut a = BitBuffer::new();
        a.append_bits(0b101, 3);
        let mut b = BitBuffer::with_capacity(8);
        b.append_bits(0b11111, 5);
        a.extend_from(&b);
        assert_eq!(a.to_bytes(), vec![0b1011_1111]);
    }
}
