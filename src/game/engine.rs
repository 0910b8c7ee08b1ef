//! Game engine: move legality and the win/draw state machine.

use super::rules::{Line, is_full, winning_line};
use super::types::{Board, GameState, GameStatus};
use tracing::{debug, instrument};

/// Why a move was rejected.
///
/// Rejection is an ordinary return value, not an error: the move is a no-op
/// and the caller may simply try another cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The row or column is outside 0..3.
    OutOfBounds,
    /// The target cell is already occupied.
    CellOccupied,
    /// The game has already ended.
    GameOver,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::OutOfBounds => write!(f, "coordinates out of bounds"),
            RejectReason::CellOccupied => write!(f, "cell is already occupied"),
            RejectReason::GameOver => write!(f, "game is already over"),
        }
    }
}

/// Result of an attempted move - explicit state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mark was placed. Carries the resulting status and, when the move
    /// won the game, the completed line for presentation.
    Placed {
        /// Status after the move.
        status: GameStatus,
        /// The line completed by this move, if it won.
        winning_line: Option<Line>,
    },
    /// The move was rejected; nothing changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Returns `true` if the move was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected(_))
    }
}

/// Tic-tac-toe game engine.
///
/// Wraps a [`GameState`] and is the only mutation path into it. The state
/// machine is `InProgress -> {InProgress, Won(O), Won(X), Draw}`; `Won` and
/// `Draw` are terminal.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game: empty board, O to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Resets to a fresh game: empty board, O to move, in progress.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Attempts to place the current player's mark at (row, col).
    ///
    /// Rejects without state change when the game is over, the coordinates
    /// are out of range, or the cell is occupied. On success the mover's win
    /// is evaluated first (against the board after the placement), then the
    /// full-board draw; the turn passes to the opponent only if the game is
    /// still in progress.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn attempt_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.state.status().is_terminal() {
            debug!("Move rejected: game over");
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }

        let Some(idx) = Board::index(row, col) else {
            debug!("Move rejected: out of bounds");
            return MoveOutcome::Rejected(RejectReason::OutOfBounds);
        };

        if !self.state.board().is_empty(idx) {
            debug!("Move rejected: cell occupied");
            return MoveOutcome::Rejected(RejectReason::CellOccupied);
        }

        let mover = self.state.current_player();
        self.state.place(idx, mover);

        // Win check takes precedence over draw check.
        if let Some(line) = winning_line(self.state.board(), mover) {
            self.state.set_status(GameStatus::Won(mover));
            debug!(winner = %mover, "Game won");
            return MoveOutcome::Placed {
                status: GameStatus::Won(mover),
                winning_line: Some(line),
            };
        }

        if is_full(self.state.board()) {
            self.state.set_status(GameStatus::Draw);
            debug!("Game drawn");
            return MoveOutcome::Placed {
                status: GameStatus::Draw,
                winning_line: None,
            };
        }

        self.state.toggle_player();
        MoveOutcome::Placed {
            status: GameStatus::InProgress,
            winning_line: None,
        }
    }
}
