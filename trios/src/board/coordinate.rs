use serde::{Deserialize, Serialize};

use crate::Direction;

/// A position on the board.
///
/// Coordinates are zero-based and ordered row-major, i.e. first by `row`,
/// then by `col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent coordinate in the given direction.
    ///
    /// Returns `None` if it would have a negative component. Bounds on the
    /// other side are checked by the board.
    pub fn neighbor(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.offset();
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
