//! Main QR code encoder - wires everything together

use super::EncodeOptions;
use super::codewords;
use super::function_patterns::build_function_patterns;
use super::mask::{self, MaskCandidate};
use super::placement::place_codewords;
use super::segmenter::{self, PlanRequest, SegmentPlan};
use super::tables;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, ModuleMatrix, Symbol};
use tracing::debug;

/// Main QR encoder that turns a payload into a finished symbol
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `payload` at `ec_level` (or stronger, with boosting enabled)
    pub fn encode(payload: &[u8], ec_level: ECLevel, options: &EncodeOptions) -> Result<Symbol> {
        let (plan, base) = Self::unmasked(payload, ec_level, options)?;
        let (version, ec_level) = (plan.version, plan.ec_level);

        let MaskCandidate {
            mask,
            penalty,
            matrix,
        } = match options.forced_mask() {
            Some(forced) => mask::build_candidate(&base, forced, version, ec_level),
            None => mask::choose_mask(&base, version, ec_level),
        };
        debug!(
            version = version.number(),
            ?ec_level,
            mask = mask.id(),
            penalty,
            "symbol encoded"
        );

        let segments = plan.segments.iter().map(|s| s.info()).collect();
        Ok(Symbol::new(version, ec_level, mask, penalty, segments, &matrix))
    }

    /// All eight mask candidates for `payload`, in mask id order
    pub fn mask_candidates(
        payload: &[u8],
        ec_level: ECLevel,
        options: &EncodeOptions,
    ) -> Result<Vec<MaskCandidate>> {
        let (plan, base) = Self::unmasked(payload, ec_level, options)?;
        Ok(mask::evaluate_masks(&base, plan.version, plan.ec_level))
    }

    /// Segment, assemble and place: everything up to masking
    pub fn unmasked(
        payload: &[u8],
        ec_level: ECLevel,
        options: &EncodeOptions,
    ) -> Result<(SegmentPlan, ModuleMatrix)> {
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        options.validate()?;
        let (min_version, max_version) = options.version_range()?;

        // Segment and pick the smallest version that fits
        let plan = segmenter::plan(
            payload,
            &PlanRequest {
                ec_level,
                min_version,
                max_version,
                boost_ec: options.boost_ec_enabled(),
                kanji: options.kanji_enabled(),
                eci: options.eci_assignment(),
            },
        )?;

        // Data + EC codewords, interleaved
        let stream = codewords::assemble(&plan.segments, plan.version, plan.ec_level)?;

        let mut base = build_function_patterns(plan.version);
        place_codewords(&mut base, &stream, tables::remainder_bits(plan.version))?;
        Ok((plan, base))
    }
}
