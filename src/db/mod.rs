//! Persistence layer: player registry, append-only match history, and
//! leaderboard aggregation.

mod error;
mod memory;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use models::{LeaderboardEntry, MatchRecord, NewMatch, NewPlayer, Player};
pub use repository::{MIGRATIONS, MatchRepository};
pub use store::{MatchStore, PlayerId};
