use num_bigint::BigUint;

use crate::{
    automaton::CellState,
    error::{InvalidArgument, Result},
};

/// Writes `number` as exactly `digits` binary digits, most significant first.
///
/// Fails if `number >= 2^digits`.
pub fn binary(number: &BigUint, digits: u64) -> Result<Vec<u8>> {
    if number.bits() > digits {
        return Err(InvalidArgument::BinaryOutOfRange {
            number: number.clone(),
            digits,
        });
    }

    let binary_digits = (0..digits).rev().map(|bit| number.bit(bit) as u8).collect();

    Ok(binary_digits)
}

/// The `n` cells of neighborhood pattern `pattern`, leftmost cell being the most significant digit.
///
/// Same digits as `binary(pattern, n)`, for patterns known to be below `2^n`.
pub fn pattern_cells(pattern: usize, n: u32) -> Vec<CellState> {
    (0..n)
        .rev()
        .map(|bit| CellState::from_digit(((pattern >> bit) & 1) as u8))
        .collect()
}

/// The numeric value of a neighborhood, leftmost cell being the most significant digit.
pub fn pattern_index(cells: &[CellState]) -> usize {
    cells
        .iter()
        .fold(0, |index, cell| (index << 1) | cell.digit() as usize)
}
