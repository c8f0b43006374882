//! Codeword assembly: bit stream, terminator, padding, block split, RS, interleave

use super::bit_buffer::BitBuffer;
use super::reed_solomon::ReedSolomonEncoder;
use super::segment::Segment;
use super::tables;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, Version};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Data codewords for `segments`: terminator, bit padding and 0xEC/0x11 filler
/// up to the data capacity of `version` at `ec_level`.
pub fn data_codewords(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>> {
    let capacity_bits = tables::data_capacity_bits(version, ec_level);
    let mut bits = BitBuffer::with_capacity(capacity_bits);
    for seg in segments {
        if !seg.count_fits(version) {
            return Err(EncodeError::PayloadTooLarge {
                required_bits: seg.bit_length(version),
                capacity_bits,
                ec_level,
            });
        }
        seg.write_to(version, &mut bits);
    }
    if bits.len() > capacity_bits {
        return Err(EncodeError::PayloadTooLarge {
            required_bits: bits.len(),
            capacity_bits,
            ec_level,
        });
    }

    let terminator = (capacity_bits - bits.len()).min(4);
    bits.append_bits(0, terminator as u8);
    let partial = bits.len() % 8;
    if partial != 0 {
        bits.append_bits(0, (8 - partial) as u8);
    }

    let mut codewords = bits.to_bytes();
    let capacity = capacity_bits / 8;
    codewords.extend(PAD_BYTES.iter().cycle().take(capacity - codewords.len()));
    Ok(codewords)
}

/// Split data codewords into blocks, append RS codewords and interleave.
///
/// Short blocks come first; long blocks carry one extra data codeword.
pub fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let expected = tables::data_codewords(version, ec_level);
    if data.len() != expected {
        return Err(EncodeError::CapacityMismatch {
            expected: expected * 8,
            actual: data.len() * 8,
        });
    }

    let info = tables::ec_block_info(version, ec_level);
    let total = tables::total_codewords(version);
    let num_short = info.num_blocks - total % info.num_blocks;
    let short_len = total / info.num_blocks;
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_len - info.ecc_per_block + usize::from(i >= num_short);
        let block = &data[offset..offset + len];
        offset += len;
        blocks.push((block, rs.encode(block)));
    }

    let max_data = short_len - info.ecc_per_block + 1;
    let mut result = Vec::with_capacity(total);
    for col in 0..max_data {
        result.extend(blocks.iter().filter_map(|(block, _)| block.get(col)));
    }
    for col in 0..info.ecc_per_block {
        result.extend(blocks.iter().map(|(_, ecc)| ecc[col]));
    }
    Ok(result)
}

/// Full codeword stream for `segments` at `version` and `ec_level`
pub fn assemble(segments: &[Segment], version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let data = data_codewords(segments, version, ec_level)?;
    add_ec_and_interleave(&data, version, ec_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_hello_world_data_codewords() {
        let segs = [Segment::alphanumeric(b"HELLO WORLD").unwrap()];
        let data = data_codewords(&segs, v(1), ECLevel::Q).unwrap();
        assert_eq!(
            data,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236]
        );
    }

    #[test]
    fn test_numeric_data_codewords() {
        let segs = [Segment::numeric(b"01234567").unwrap()];
        let data = data_codewords(&segs, v(1), ECLevel::M).unwrap();
        assert_eq!(
            data,
            vec![16, 32, 12, 86, 97, 128, 236, 17, 236, 17, 236, 17, 236, 17, 236, 17]
        );
    }

    #[test]
    fn test_single_block_stream() {
        let segs = [Segment::alphanumeric(b"HELLO WORLD").unwrap()];
        let stream = assemble(&segs, v(1), ECLevel::Q).unwrap();
        assert_eq!(stream.len(), 26);
        assert_eq!(
            &stream[13..],
            &[168, 72, 22, 82, 217, 54, 156, 0, 46, 15, 180, 122, 16]
        );
    }

    #[test]
    fn test_terminator_truncated_at_capacity() {
        // 17 bytes at 1-L: 4 + 8 + 136 = 148 bits of 152, room for the full terminator
        let segs = [Segment::bytes(&[0xAA; 17])];
        let data = data_codewords(&segs, v(1), ECLevel::L).unwrap();
        assert_eq!(data.len(), 19);
        assert_eq!(data[18], 0xA0);

        // 17 digits at 1-H: 4 + 10 + 57 = 71 of 72 bits, terminator clipped to 1 bit
        let segs = [Segment::numeric(&[b'0'; 17]).unwrap()];
        let data = data_codewords(&segs, v(1), ECLevel::H).unwrap();
        assert_eq!(data.len(), 9);
        assert_eq!(&data[..2], &[0x10, 0x44]);
        assert!(data[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_interleave_uneven_blocks() {
        // 5-Q: 2 blocks of 15 and 2 blocks of 16 data codewords, 18 ECC each
        let data: Vec<u8> = (0..62).collect();
        let stream = add_ec_and_interleave(&data, v(5), ECLevel::Q).unwrap();
        assert_eq!(stream.len(), 134);
        assert_eq!(&stream[..4], &[0, 15, 30, 46]);
        // Column 15 only exists in the long blocks
        assert_eq!(&stream[60..62], &[45, 61]);
        let first_block_ecc = ReedSolomonEncoder::new(18).encode(&data[..15]);
        assert_eq!(stream[62], first_block_ecc[0]);
        assert_eq!(stream[66], first_block_ecc[1]);
    }

    #[test]
    fn test_wrong_data_length_is_mismatch() {
        assert!(matches!(
            add_ec_and_interleave(&[0u8; 10], v(1), ECLevel::L),
            Err(EncodeError::CapacityMismatch { .. })
        ));
    }
}
