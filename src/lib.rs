//! gridmatch - two-player tic-tac-toe with persistent match history and a
//! derived leaderboard.
//!
//! # Architecture
//!
//! - **Game engine**: board state, move legality, win/draw evaluation
//!   ([`Game`], [`GameState`], [`MoveOutcome`])
//! - **Match store**: the persistence seam ([`MatchStore`]) with an embedded
//!   SQLite implementation ([`MatchRepository`]) and an in-memory one
//!   ([`MemoryStore`])
//! - **Match service**: glue that registers players and records finished
//!   games ([`MatchService`])
//!
//! The shipped binary is a thin terminal front-end; any presentation layer
//! can drive the same interfaces.
//!
//! # Example
//!
//! ```
//! use gridmatch::{Game, MatchService, MemoryStore};
//!
//! # fn example() -> Result<(), gridmatch::StorageError> {
//! let service = MatchService::new(MemoryStore::new());
//! let (alice, bob) = service.register_players("Alice", "Bob")?;
//!
//! let mut game = Game::new();
//! // O takes the top row while X plays the middle row.
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     game.attempt_move(row, col);
//! }
//! assert!(game.state().status().is_terminal());
//!
//! service.record_outcome(alice, bob, game.state().status())?;
//! let top = service.leaderboard(10)?;
//! assert_eq!(top[0].name(), "Alice");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod game;
mod match_service;

// Crate-level exports - configuration
pub use config::{ConfigError, DATABASE_ENV, StorageBackend, StorageConfig};

// Crate-level exports - persistence
pub use db::{
    LeaderboardEntry, MIGRATIONS, MatchRecord, MatchRepository, MatchStore, MemoryStore, NewMatch,
    NewPlayer, Player, PlayerId, StorageError,
};

// Crate-level exports - game engine
pub use game::{
    Board, Cell, Game, GameState, GameStatus, LINES, Line, Mark, MoveOutcome, RejectReason,
    has_won, is_full, winning_line,
};

// Crate-level exports - service layer
pub use match_service::MatchService;
