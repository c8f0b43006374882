//! Mask application, penalty scoring and selection
//!
//! Each candidate gets its own format (and version) information drawn before it
//! is scored, so the penalty reflects the symbol exactly as it will be emitted.

use super::config;
use super::format::FormatInfo;
use super::version_info::VersionInfo;
use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};
use rayon::prelude::*;
use tracing::trace;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// A fully drawn symbol matrix for one mask, with its penalty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskCandidate {
    /// Applied mask
    pub mask: MaskPattern,
    /// Sum of the four penalty rules
    pub penalty: u32,
    /// Masked matrix with format and version information drawn
    pub matrix: ModuleMatrix,
}

/// XOR the mask into every data module; function and reserved modules are untouched
pub fn apply_mask(matrix: &mut ModuleMatrix, mask: MaskPattern) {
    let size = matrix.size();
    for row in 0..size {
        for col in 0..size {
            if mask.is_masked(row, col) {
                matrix.flip_data(row, col);
            }
        }
    }
}

/// Mask, draw format/version information and score one candidate
pub fn build_candidate(
    base: &ModuleMatrix,
    mask: MaskPattern,
    version: Version,
    ec_level: ECLevel,
) -> MaskCandidate {
    let mut matrix = base.clone();
    apply_mask(&mut matrix, mask);
    FormatInfo::new(ec_level, mask).draw(&mut matrix);
    VersionInfo::draw(version, &mut matrix);
    let penalty = penalty_score(&matrix);
    trace!(mask = mask.id(), penalty, "mask candidate scored");
    MaskCandidate {
        mask,
        penalty,
        matrix,
    }
}

/// All eight candidates in mask id order
pub fn evaluate_masks(base: &ModuleMatrix, version: Version, ec_level: ECLevel) -> Vec<MaskCandidate> {
    if config::parallel_masks() && version.number() >= config::parallel_min_version() {
        MaskPattern::ALL
            .par_iter()
            .map(|&mask| build_candidate(base, mask, version, ec_level))
            .collect()
    } else {
        MaskPattern::ALL
            .iter()
            .map(|&mask| build_candidate(base, mask, version, ec_level))
            .collect()
    }
}

/// Lowest penalty wins; ties go to the lowest mask id
pub fn select_best(candidates: Vec<MaskCandidate>) -> Option<MaskCandidate> {
    candidates
        .into_iter()
        .min_by_key(|c| (c.penalty, c.mask.id()))
}

/// Score all eight masks and keep the best
pub fn choose_mask(base: &ModuleMatrix, version: Version, ec_level: ECLevel) -> MaskCandidate {
    select_best(evaluate_masks(base, version, ec_level))
        .unwrap_or_else(|| build_candidate(base, MaskPattern::Pattern0, version, ec_level))
}

/// Total penalty (rules 1-4)
pub fn penalty_score(matrix: &ModuleMatrix) -> u32 {
    let lines = lines(matrix);
    penalty_runs(&lines)
        + penalty_blocks(matrix)
        + penalty_finder_like(&lines)
        + penalty_balance(matrix)
}

/// Every row followed by every column, as dark/light sequences
fn lines(matrix: &ModuleMatrix) -> Vec<Vec<bool>> {
    let size = matrix.size();
    let rows = (0..size).map(|r| (0..size).map(|c| matrix.is_dark(r, c)).collect());
    let cols = (0..size).map(|c| (0..size).map(|r| matrix.is_dark(r, c)).collect());
    rows.chain(cols).collect()
}

/// Rule 1: 3 + (len - 5) for every same-colour run of 5 or more
fn penalty_runs(lines: &[Vec<bool>]) -> u32 {
    let mut penalty = 0;
    for line in lines {
        for run in line.chunk_by(|a, b| a == b) {
            if run.len() >= 5 {
                penalty += PENALTY_N1 + (run.len() - 5) as u32;
            }
        }
    }
    penalty
}

/// Rule 2: 3 for every 2x2 block of one colour (overlapping blocks all count)
fn penalty_blocks(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size();
    let mut penalty = 0;
    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let dark = matrix.is_dark(row, col);
            if matrix.is_dark(row, col + 1) == dark
                && matrix.is_dark(row + 1, col) == dark
                && matrix.is_dark(row + 1, col + 1) == dark
            {
                penalty += PENALTY_N2;
            }
        }
    }
    penalty
}

/// Rule 3: 40 for every 1:1:3:1:1 pattern with four light modules on either side.
/// Modules beyond the symbol edge count as light.
///
/// Follows the ZXing reading: only the unit-width `1011101` window matches and a
/// window with light space on both sides scores once. qrcodegen scales the ratio
/// and scores each side, so its automatic mask choice can differ.
fn penalty_finder_like(lines: &[Vec<bool>]) -> u32 {
    let mut penalty = 0;
    for line in lines {
        let n = line.len();
        let is_light = |from: isize, to: isize| {
            (from.max(0) as usize..to.min(n as isize) as usize).all(|i| !line[i])
        };
        for start in 0..n.saturating_sub(6) {
            if line[start..start + 7] != FINDER_LIKE {
                continue;
            }
            let s = start as isize;
            if is_light(s - 4, s) || is_light(s + 7, s + 11) {
                penalty += PENALTY_N3;
            }
        }
    }
    penalty
}

/// Rule 4: 10 per full 5% step the dark ratio deviates from 50%
fn penalty_balance(matrix: &ModuleMatrix) -> u32 {
    let total = matrix.size() * matrix.size();
    let dark = matrix.dark_count();
    let deviation = (dark * 20).abs_diff(total * 10);
    let k = (deviation + total - 1) / total;
    k.saturating_sub(1) as u32 * PENALTY_N4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::build_function_patterns;
    use crate::models::Module;

    fn grid(rows: &[&str]) -> ModuleMatrix {
        let mut m = ModuleMatrix::new(rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                m.set_data(r, c, ch == '#');
            }
        }
        m
    }

    #[test]
    fn test_apply_mask_only_touches_data() {
        let base = build_function_patterns(Version::MIN);
        let mut filled = base.clone();
        let size = filled.size();
        for r in 0..size {
            for c in 0..size {
                filled.set_data(r, c, false);
            }
        }
        let mut masked = filled.clone();
        apply_mask(&mut masked, MaskPattern::Pattern1);
        for r in 0..size {
            for c in 0..size {
                match filled.get(r, c) {
                    Module::Data(_) => assert_eq!(masked.is_dark(r, c), r % 2 == 0),
                    other => assert_eq!(masked.get(r, c), other),
                }
            }
        }
    }

    #[test]
    fn test_runs_penalty() {
        let lines = vec![
            vec![true; 5],
            vec![false, false, false, false],
            vec![true, true, true, true, true, true, true, false, false, false, false, false],
        ];
        // 3 + (3 + 2) + 3
        assert_eq!(penalty_runs(&lines), 11);
    }

    #[test]
    fn test_blocks_penalty() {
        let m = grid(&["##..", "##..", "....", "...."]);
        // One dark block, five overlapping light blocks
        assert_eq!(penalty_blocks(&m), 18);
    }

    #[test]
    fn test_finder_like_penalty() {
        let with_border = vec![
            false, false, false, false, true, false, true, true, true, false, true,
        ];
        assert_eq!(penalty_finder_like(&[with_border]), 40);

        // At the edge: the missing border outside the symbol counts as light
        let at_edge = vec![true, false, true, true, true, false, true, true, true];
        assert_eq!(penalty_finder_like(&[at_edge]), 40);

        let no_border = vec![
            true, false, false, true, true, false, true, true, true, false, true, true, false,
            true, true, false,
        ];
        assert_eq!(penalty_finder_like(&[no_border]), 0);

        // Light on both sides still counts once
        let both = vec![
            false, false, false, false, true, false, true, true, true, false, true, false,
            false, false, false,
        ];
        assert_eq!(penalty_finder_like(&[both]), 40);
    }

    #[test]
    fn test_balance_penalty() {
        // 5x5 all light: 0% dark -> deviation 50% -> 9 steps
        let light = grid(&[".....", ".....", ".....", ".....", "....."]);
        assert_eq!(penalty_balance(&light), 90);
        // 13 of 25 dark = 52%
        let near_half = grid(&["#####", "#####", "###..", ".....", "....."]);
        assert_eq!(penalty_balance(&near_half), 0);
        // 15 of 25 = 60%: deviation exactly 10% -> 1 step
        let sixty = grid(&["#####", "#####", "#####", ".....", "....."]);
        assert_eq!(penalty_balance(&sixty), 10);
    }

    #[test]
    fn test_select_lowest_penalty_then_lowest_id() {
        let m = ModuleMatrix::new(21);
        let candidate = |mask, penalty| MaskCandidate {
            mask,
            penalty,
            matrix: m.clone(),
        };
        let best = select_best(vec![
            candidate(MaskPattern::Pattern5, 300),
            candidate(MaskPattern::Pattern2, 200),
            candidate(MaskPattern::Pattern7, 200),
            candidate(MaskPattern::Pattern0, 250),
        ])
        .unwrap();
        assert_eq!(best.mask, MaskPattern::Pattern2);
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_candidates_in_id_order_and_consistent() {
        let base = build_function_patterns(Version::new(7).unwrap());
        let candidates = evaluate_masks(&base, Version::new(7).unwrap(), ECLevel::Q);
        assert_eq!(candidates.len(), 8);
        for (i, c) in candidates.iter().enumerate() {
            assert_eq!(c.mask.id() as usize, i);
            assert_eq!(c.penalty, penalty_score(&c.matrix));
            assert_eq!(c.matrix.count(|m| m == Module::Reserved), 0);
        }
    }
}
