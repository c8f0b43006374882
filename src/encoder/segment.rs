use super::bit_buffer::BitBuffer;
use super::modes::alphanumeric::AlphanumericEncoder;
use super::modes::byte::ByteEncoder;
use super::modes::kanji::KanjiEncoder;
use super::modes::numeric::NumericEncoder;
use crate::error::{EncodeError, Result};
use crate::models::Version;
use std::fmt;

/// Segment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Digits 0-9, three per 10 bits
    Numeric,
    /// 45-character set, two per 11 bits
    Alphanumeric,
    /// Raw octets
    Byte,
    /// Shift-JIS double-byte characters, 13 bits each
    Kanji,
    /// Extended Channel Interpretation designator
    Eci,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Eci => 0b0111,
        }
    }

    /// Width of the character count field for `version`
    pub fn count_bits(&self, version: Version) -> u8 {
        let group = version.count_bits_group();
        match self {
            Mode::Numeric => [10, 12, 14][group],
            Mode::Alphanumeric => [9, 11, 13][group],
            Mode::Byte => [8, 16, 16][group],
            Mode::Kanji => [8, 10, 12][group],
            Mode::Eci => 0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Kanji => "kanji",
            Mode::Eci => "eci",
        };
        f.write_str(name)
    }
}

/// One encoded run of the payload: mode, character count and packed data bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

/// Mode and length of an encoded segment, kept on the finished symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentInfo {
    /// Segment mode
    pub mode: Mode,
    /// Characters in the segment (Kanji pairs count once)
    pub char_count: usize,
}

impl Segment {
    /// Numeric segment; `None` if any byte is not an ASCII digit
    pub fn numeric(digits: &[u8]) -> Option<Self> {
        if !digits.iter().all(|&b| NumericEncoder::is_encodable(b)) {
            return None;
        }
        let mut data = BitBuffer::with_capacity(NumericEncoder::bit_length(digits.len()));
        NumericEncoder::encode(digits, &mut data);
        Some(Self {
            mode: Mode::Numeric,
            char_count: digits.len(),
            data,
        })
    }

    /// Alphanumeric segment; `None` if any byte is outside the 45-character set
    pub fn alphanumeric(text: &[u8]) -> Option<Self> {
        if !text.iter().all(|&b| AlphanumericEncoder::is_encodable(b)) {
            return None;
        }
        let mut data = BitBuffer::with_capacity(AlphanumericEncoder::bit_length(text.len()));
        AlphanumericEncoder::encode(text, &mut data);
        Some(Self {
            mode: Mode::Alphanumeric,
            char_count: text.len(),
            data,
        })
    }

    /// Byte segment; accepts any input
    pub fn bytes(bytes: &[u8]) -> Self {
        let mut data = BitBuffer::with_capacity(ByteEncoder::bit_length(bytes.len()));
        ByteEncoder::encode(bytes, &mut data);
        Self {
            mode: Mode::Byte,
            char_count: bytes.len(),
            data,
        }
    }

    /// Kanji segment from Shift-JIS pairs; `None` for odd length or a non-Kanji pair
    pub fn kanji(sjis: &[u8]) -> Option<Self> {
        if sjis.len() % 2 != 0 || !sjis.chunks(2).all(KanjiEncoder::is_encodable) {
            return None;
        }
        let count = sjis.len() / 2;
        let mut data = BitBuffer::with_capacity(KanjiEncoder::bit_length(count));
        KanjiEncoder::encode(sjis, &mut data);
        Some(Self {
            mode: Mode::Kanji,
            char_count: count,
            data,
        })
    }

    /// ECI designator segment (assignment number 0-999999)
    pub fn eci(assignment: u32) -> Result<Self> {
        let mut data = BitBuffer::with_capacity(24);
        match assignment {
            0..=0x7F => data.append_bits(assignment, 8),
            0x80..=0x3FFF => data.append_bits(0b10 << 14 | assignment, 16),
            0x4000..=999_999 => data.append_bits(0b110 << 21 | assignment, 24),
            _ => return Err(EncodeError::InvalidEci(assignment)),
        }
        Ok(Self {
            mode: Mode::Eci,
            char_count: 0,
            data,
        })
    }

    /// Segment mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Value written to the character count field
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Packed data bits, without indicator or count
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Mode and count, without the data bits
    pub fn info(&self) -> SegmentInfo {
        SegmentInfo {
            mode: self.mode,
            char_count: self.char_count,
        }
    }

    /// Mode indicator + count field + data bits at `version`
    pub fn bit_length(&self, version: Version) -> usize {
        4 + self.mode.count_bits(version) as usize + self.data.len()
    }

    /// Whether the character count fits the count field at `version`
    pub fn count_fits(&self, version: Version) -> bool {
        (self.char_count as u64) < 1u64 << self.mode.count_bits(version)
    }

    /// Append mode indicator, count field and data to `out`
    pub fn write_to(&self, version: Version, out: &mut BitBuffer) {
        out.append_bits(self.mode.indicator(), 4);
        out.append_bits(self.char_count as u32, self.mode.count_bits(version));
        out.extend_from(&self.data);
    }
}

/// Total stream length of `segments` at `version`; `None` if a count overflows its field
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .map(|seg| seg.count_fits(version).then(|| seg.bit_length(version)))
        .sum()
}
