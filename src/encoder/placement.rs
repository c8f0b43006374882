//! Data module placement following the zigzag column-pair traversal

use super::bit_buffer::BitBuffer;
use crate::error::{EncodeError, Result};
use crate::models::{Module, ModuleMatrix};

/// Modules visited by the zigzag traversal that are still free, in placement order.
///
/// Column pairs run right to left from the bottom-right corner, skipping the
/// vertical timing column; direction alternates up and down.
pub fn data_positions(matrix: &ModuleMatrix) -> Vec<(usize, usize)> {
    let size = matrix.size();
    let mut positions = Vec::with_capacity(size * size);
    let mut upward = true;
    let mut col = size as isize - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        for step in 0..size {
            let row = if upward { size - 1 - step } else { step };
            for c in [col as usize, col as usize - 1] {
                if matrix.get(row, c) == Module::Unset {
                    positions.push((row, c));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    positions
}

/// Place `codewords` MSB first into the free modules of `matrix`; the trailing
/// remainder modules are filled light.
///
/// Fails with `CapacityMismatch` unless the codewords plus `remainder_bits`
/// exactly cover the free modules.
pub fn place_codewords(
    matrix: &mut ModuleMatrix,
    codewords: &[u8],
    remainder_bits: usize,
) -> Result<()> {
    let positions = data_positions(matrix);
    let stream_bits = codewords.len() * 8;
    if stream_bits + remainder_bits != positions.len() {
        return Err(EncodeError::CapacityMismatch {
            expected: positions.len(),
            actual: stream_bits + remainder_bits,
        });
    }

    let mut bits = BitBuffer::with_capacity(positions.len());
    for &cw in codewords {
        bits.append_bits(u32::from(cw), 8);
    }
    let stream = bits.bits().iter().copied().chain(std::iter::repeat(false));
    for ((row, col), dark) in positions.into_iter().zip(stream) {
        matrix.set_data(row, col, dark);
    }
    Ok(())
}
