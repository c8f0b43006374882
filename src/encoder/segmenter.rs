//! Optimal mode segmentation and version selection
//!
//! Segmentation is a shortest-path search over byte positions. Costs are kept in
//! sixths of a bit so numeric (10/3 bits per digit) and alphanumeric (11/2 bits per
//! character) runs compare exactly against byte and Kanji runs.

use super::modes::alphanumeric::AlphanumericEncoder;
use super::modes::kanji::KanjiEncoder;
use super::modes::numeric::NumericEncoder;
use super::segment::{Mode, Segment, total_bits};
use super::tables;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, Version};
use tracing::debug;

const MODES: [Mode; 4] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];
const UNREACHABLE: u32 = u32::MAX / 2;

/// Cost of one character in sixths of a bit
fn char_cost(mode: Mode) -> u32 {
    match mode {
        Mode::Numeric => 20,
        Mode::Alphanumeric => 33,
        Mode::Byte => 48,
        Mode::Kanji => 78,
        Mode::Eci => UNREACHABLE,
    }
}

/// Bytes consumed by one character starting at `pos`, if `mode` can encode it
fn char_width(mode: Mode, data: &[u8], pos: usize) -> Option<usize> {
    let byte = data[pos];
    match mode {
        Mode::Numeric => NumericEncoder::is_encodable(byte).then_some(1),
        Mode::Alphanumeric => AlphanumericEncoder::is_encodable(byte).then_some(1),
        Mode::Byte => Some(1),
        Mode::Kanji => data
            .get(pos..pos + 2)
            .filter(|pair| KanjiEncoder::is_encodable(pair))
            .map(|_| 2),
        Mode::Eci => None,
    }
}

fn ceil_to_bit(cost: u32) -> u32 {
    cost.div_ceil(6) * 6
}

/// Minimum-length segmentation of `data` for the count field widths of `version`.
///
/// Kanji runs are only considered when `kanji` is set.
pub fn optimal_segments(data: &[u8], version: Version, kanji: bool) -> Vec<Segment> {
    if data.is_empty() {
        return Vec::new();
    }
    let modes: &[Mode] = if kanji { &MODES } else { &MODES[..3] };
    let n = data.len();
    let head: Vec<u32> = modes
        .iter()
        .map(|m| (4 + m.count_bits(version) as u32) * 6)
        .collect();

    // extended[m][i]: cheapest cost for data[..i] whose last character was added in mode m
    // best[m][i]: same, or reached by switching into m at i
    let mut extended = vec![vec![UNREACHABLE; n + 1]; modes.len()];
    let mut best = vec![vec![UNREACHABLE; n + 1]; modes.len()];
    let mut switched_from: Vec<Vec<Option<usize>>> = vec![vec![None; n + 1]; modes.len()];
    for (m, &h) in head.iter().enumerate() {
        extended[m][0] = h;
    }

    for i in 0..=n {
        for m in 0..modes.len() {
            best[m][i] = extended[m][i];
            for p in 0..modes.len() {
                if p == m || extended[p][i] >= UNREACHABLE {
                    continue;
                }
                let cost = ceil_to_bit(extended[p][i]) + head[m];
                if cost < best[m][i] {
                    best[m][i] = cost;
                    switched_from[m][i] = Some(p);
                }
            }
        }
        if i == n {
            break;
        }
        for (m, &mode) in modes.iter().enumerate() {
            if best[m][i] >= UNREACHABLE {
                continue;
            }
            if let Some(width) = char_width(mode, data, i) {
                let cost = best[m][i] + char_cost(mode);
                if cost < extended[m][i + width] {
                    extended[m][i + width] = cost;
                }
            }
        }
    }

    // Trace back from the cheapest final state, labelling each byte with its mode
    let mut current = (0..modes.len())
        .min_by_key(|&m| (ceil_to_bit(extended[m][n]), m))
        .unwrap_or(2);
    let mut byte_modes = vec![Mode::Byte; n];
    let mut pos = n;
    while pos > 0 {
        let mode = modes[current];
        let width = match mode {
            Mode::Kanji => 2,
            _ => 1,
        };
        for slot in &mut byte_modes[pos - width..pos] {
            *slot = mode;
        }
        pos -= width;
        if let Some(prev) = switched_from[current][pos] {
            current = prev;
        }
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=n {
        if end == n || byte_modes[end] != byte_modes[start] {
            segments.extend(make_segment(byte_modes[start], &data[start..end]));
            start = end;
        }
    }
    segments
}

fn make_segment(mode: Mode, run: &[u8]) -> Option<Segment> {
    match mode {
        Mode::Numeric => Segment::numeric(run),
        Mode::Alphanumeric => Segment::alphanumeric(run),
        Mode::Kanji => Segment::kanji(run),
        _ => Some(Segment::bytes(run)),
    }
}

/// Outcome of segmentation: the smallest fitting version and the segments for it
#[derive(Debug, Clone)]
pub struct SegmentPlan {
    /// Smallest version in range whose capacity holds the segments
    pub version: Version,
    /// Level to encode at (raised past the requested one when boosting)
    pub ec_level: ECLevel,
    /// Segments in stream order, ECI designator first
    pub segments: Vec<Segment>,
    /// Header plus payload bits of all segments
    pub data_bits: usize,
}

/// Parameters for [`plan`]
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest {
    /// Requested error correction level
    pub ec_level: ECLevel,
    /// Smallest version to try
    pub min_version: Version,
    /// Largest version to try
    pub max_version: Version,
    /// Raise the level while the chosen version still fits
    pub boost_ec: bool,
    /// Consider Kanji runs
    pub kanji: bool,
    /// ECI assignment to prefix, if any
    pub eci: Option<u32>,
}

/// Segment `data` and choose the smallest version in range that holds it.
pub fn plan(data: &[u8], request: &PlanRequest) -> Result<SegmentPlan> {
    let eci = request.eci.map(Segment::eci).transpose()?;
    let mut group = None;
    let mut segments = Vec::new();
    let mut required_bits = 0;

    for version in request.min_version.range_to(request.max_version) {
        if group != Some(version.count_bits_group()) {
            group = Some(version.count_bits_group());
            segments = eci.iter().cloned().collect();
            segments.extend(optimal_segments(data, version, request.kanji));
        }
        let Some(bits) = total_bits(&segments, version) else {
            required_bits = segments.iter().map(|s| s.bit_length(version)).sum();
            continue;
        };
        required_bits = bits;
        if bits > tables::data_capacity_bits(version, request.ec_level) {
            continue;
        }

        let mut ec_level = request.ec_level;
        if request.boost_ec {
            while let Some(stronger) = ec_level.stronger() {
                if bits > tables::data_capacity_bits(version, stronger) {
                    break;
                }
                ec_level = stronger;
            }
        }
        debug!(
            version = version.number(),
            ?ec_level,
            segments = segments.len(),
            data_bits = bits,
            "segmentation planned"
        );
        return Ok(SegmentPlan {
            version,
            ec_level,
            segments,
            data_bits: bits,
        });
    }

    Err(EncodeError::PayloadTooLarge {
        required_bits,
        capacity_bits: tables::data_capacity_bits(request.max_version, request.ec_level),
        ec_level: request.ec_level,
    })
}
