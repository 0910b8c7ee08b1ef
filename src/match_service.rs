//! Match recording business logic layer.

use tracing::{debug, info, instrument};

use crate::db::{LeaderboardEntry, MatchStore, PlayerId, StorageError};
use crate::game::{GameStatus, Mark};

/// Service layer between a finished game and a [`MatchStore`].
///
/// Resolves both participants at match start and maps a terminal
/// [`GameStatus`] to the stored winner. Generic over the store so the same
/// logic drives the SQLite and in-memory backends.
#[derive(Debug, Clone)]
pub struct MatchService<S> {
    store: S,
}

impl<S: MatchStore> MatchService<S> {
    /// Creates a new service backed by the given store.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating MatchService");
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves both participants by name, registering first-time players.
    #[instrument(skip(self))]
    pub fn register_players(
        &self,
        o_name: &str,
        x_name: &str,
    ) -> Result<(PlayerId, PlayerId), StorageError> {
        debug!(o_name = %o_name, x_name = %x_name, "Registering players");
        let player_o = self.store.resolve_player(o_name)?;
        let player_x = self.store.resolve_player(x_name)?;
        Ok((player_o, player_x))
    }

    /// Records a finished game for the two participants.
    ///
    /// `Won(O)` and `Won(X)` map to the corresponding player id, `Draw` to
    /// no winner. The game state itself is untouched, so the caller may
    /// retry with the same arguments if the write fails.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the game is still in progress or the
    /// store write fails.
    #[instrument(skip(self))]
    pub fn record_outcome(
        &self,
        player_o: PlayerId,
        player_x: PlayerId,
        status: &GameStatus,
    ) -> Result<(), StorageError> {
        let winner = match status {
            GameStatus::Won(Mark::O) => Some(player_o),
            GameStatus::Won(Mark::X) => Some(player_x),
            GameStatus::Draw => None,
            GameStatus::InProgress => {
                return Err(StorageError::new("Cannot record an unfinished match"));
            }
        };

        debug!(player_o, player_x, winner = ?winner, "Recording outcome");
        self.store.record_match(player_o, player_x, winner)?;
        info!(winner = ?winner, "Outcome recorded");
        Ok(())
    }

    /// Returns a fresh leaderboard snapshot of up to `limit` entries.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError> {
        debug!(limit, "Fetching leaderboard");
        self.store.leaderboard(limit)
    }
}
