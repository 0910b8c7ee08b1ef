//! Win detection logic.

use super::super::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning lines as cell index triples: rows, then columns,
/// then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // Rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // Columns
    [0, 4, 8],
    [2, 4, 6], // Diagonals
];

/// A completed winning line, for presentation (e.g. highlighting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line([usize; 3]);

impl Line {
    /// The line's cell indices in row-major order.
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// The line's cells as (row, col) coordinates.
    pub fn coords(&self) -> [(usize, usize); 3] {
        self.0.map(|idx| (idx / 3, idx % 3))
    }
}

/// Returns the line completed by `mark`, if any.
///
/// Lines are scanned in a fixed order (rows, columns, diagonals), though the
/// result is order-independent: a legal board holds at most one completed
/// line per mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<Line> {
    LINES
        .iter()
        .find(|line| {
            line.iter()
                .all(|&idx| board.get(idx) == Some(Cell::Occupied(mark)))
        })
        .map(|&line| Line(line))
}

/// Checks whether `mark` occupies all three cells of at least one line.
#[instrument(skip(board))]
pub fn has_won(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}
