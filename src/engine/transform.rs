//! Coordinate transforms that reduce every direction to a left move.

use super::state::{Cells, SIZE};

/// A reversible re-orientation of the grid.
///
/// Each [`Direction`](super::Direction) maps to the transform that turns its
/// leading edge into the left edge. Moving in that direction is then
/// `inverse(move_left(apply(board)))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Identity,
    /// Horizontal mirror: column `c` swaps with column `3 - c`.
    Mirror,
    /// Quarter turn counter-clockwise: the top edge becomes the left edge.
    RotateCcw,
    /// Quarter turn clockwise: the bottom edge becomes the left edge.
    RotateCw,
}

impl Transform {
    /// The transform that undoes `self`.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Transform::Identity => Transform::Identity,
            Transform::Mirror => Transform::Mirror,
            Transform::RotateCcw => Transform::RotateCw,
            Transform::RotateCw => Transform::RotateCcw,
        }
    }

    /// Return a re-oriented copy of `cells`.
    pub(crate) fn apply(self, cells: &Cells) -> Cells {
        if self == Transform::Identity {
            return *cells;
        }
        let mut out = [[0; SIZE]; SIZE];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, slot) in out_row.iter_mut().enumerate() {
                let (src_row, src_col) = self.source(row, col);
                *slot = cells[src_row][src_col];
            }
        }
        out
    }

    /// Where the value landing at `(row, col)` is read from.
    #[inline]
    fn source(self, row: usize, col: usize) -> (usize, usize) {
        const LAST: usize = SIZE - 1;
        match self {
            Transform::Identity => (row, col),
            Transform::Mirror => (row, LAST - col),
            Transform::RotateCcw => (col, LAST - row),
            Transform::RotateCw => (LAST - col, row),
        }
    }
}
