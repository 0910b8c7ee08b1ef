//! Draw detection logic.

use super::super::types::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a draw; the engine always checks the
/// mover's win first, so a full board holding a winning line is never
/// reported as a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::has_won;
    use super::*;
    use crate::game::types::Mark;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && !has_won(board, Mark::O) && !has_won(board, Mark::X)
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(4, Cell::Occupied(Mark::O)).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for idx in 0..9 {
            board.set(idx, Cell::Occupied(Mark::X)).unwrap();
        }
        assert!(is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // O X O / X O O / X O X - full, no three in a row
        let mut board = Board::new();
        for (idx, mark) in [
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
        ]
        .into_iter()
        .enumerate()
        {
            board.set(idx, Cell::Occupied(mark)).unwrap();
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_draw_with_unbalanced_marks() {
        // O X O / X X O / X O X - full, no three in a row
        let mut board = Board::new();
        for (idx, mark) in [
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
        ]
        .into_iter()
        .enumerate()
        {
            board.set(idx, Cell::Occupied(mark)).unwrap();
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        // X takes the top row
        let mut board = Board::new();
        for idx in [0, 1, 2] {
            board.set(idx, Cell::Occupied(Mark::X)).unwrap();
        }
        for idx in [3, 4] {
            board.set(idx, Cell::Occupied(Mark::O)).unwrap();
        }
        assert!(!is_draw(&board));
    }
}
