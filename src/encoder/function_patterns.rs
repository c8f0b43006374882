use super::tables::alignment_pattern_positions;
use crate::models::{ModuleMatrix, Version};

/// Function pattern template for a version: finders, separators, timing and
/// alignment patterns drawn, format/version areas reserved, dark module set.
pub fn build_function_patterns(version: Version) -> ModuleMatrix {
    let size = version.size();
    let mut matrix = ModuleMatrix::new(size);

    // Finder patterns + separators
    draw_finder(&mut matrix, 0, 0);
    draw_finder(&mut matrix, 0, size - 7);
    draw_finder(&mut matrix, size - 7, 0);

    // Timing patterns (row 6 and column 6) between the separators
    for i in 8..size - 8 {
        matrix.set_function(6, i, i % 2 == 0);
        matrix.set_function(i, 6, i % 2 == 0);
    }

    // Alignment patterns
    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &row) in align.iter().enumerate() {
        for (j, &col) in align.iter().enumerate() {
            // Skip the three finder corners
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            draw_alignment(&mut matrix, row as usize, col as usize);
        }
    }

    reserve_format_areas(&mut matrix);
    // Dark module
    matrix.set_function(size - 8, 8, true);

    if version.has_version_info() {
        for (row, col) in version_info_positions(size) {
            matrix.reserve(row, col);
            matrix.reserve(col, row);
        }
    }
    matrix
}

/// 7x7 finder with centre at (top + 3, left + 3) and its light separator ring
fn draw_finder(matrix: &mut ModuleMatrix, top: usize, left: usize) {
    let size = matrix.size() as isize;
    let (cy, cx) = (top as isize + 3, left as isize + 3);
    for dy in -4..=4isize {
        for dx in -4..=4isize {
            let (r, c) = (cy + dy, cx + dx);
            if r < 0 || c < 0 || r >= size || c >= size {
                continue;
            }
            let dist = dy.abs().max(dx.abs());
            matrix.set_function(r as usize, c as usize, dist != 2 && dist != 4);
        }
    }
}

fn draw_alignment(matrix: &mut ModuleMatrix, row: usize, col: usize) {
    for dy in -2..=2isize {
        for dx in -2..=2isize {
            let dark = dy.abs().max(dx.abs()) != 1;
            matrix.set_function(
                (row as isize + dy) as usize,
                (col as isize + dx) as usize,
                dark,
            );
        }
    }
}

/// Reserve both copies of the 15-bit format information
fn reserve_format_areas(matrix: &mut ModuleMatrix) {
    let size = matrix.size();
    for i in 0..9 {
        matrix.reserve(8, i);
        matrix.reserve(i, 8);
    }
    for i in 0..8 {
        matrix.reserve(8, size - 1 - i);
    }
    for i in 0..7 {
        matrix.reserve(size - 1 - i, 8);
    }
}

/// (row, col) of the 18 version bits in the top-right block, bit 0 first.
/// The bottom-left copy is the transpose.
pub fn version_info_positions(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..18).map(move |i| (i / 3, size - 11 + i % 3))
}
