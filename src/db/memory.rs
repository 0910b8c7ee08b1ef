//! In-memory match store.

use std::sync::Mutex;

use tracing::{debug, info, instrument};

use crate::db::store::{MatchStore, PlayerId, rank};
use crate::db::{LeaderboardEntry, StorageError};

#[derive(Debug, Default)]
struct Inner {
    /// (id, name) pairs; ids are assigned sequentially from 1.
    players: Vec<(PlayerId, String)>,
    matches: Vec<StoredMatch>,
}

#[derive(Debug, Clone, Copy)]
struct StoredMatch {
    player_o_id: PlayerId,
    player_x_id: PlayerId,
    winner_id: Option<PlayerId>,
}

impl StoredMatch {
    fn involves(&self, player: PlayerId) -> bool {
        self.player_o_id == player || self.player_x_id == player
    }
}

/// In-memory [`MatchStore`] for tests and persistence-free play.
///
/// Records keep insertion order; the mutex serializes writes so the trait's
/// atomicity contract holds when the store is shared. Timestamps are a
/// durable-backend concern and are not kept here.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating MemoryStore");
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::new("Store mutex poisoned"))
    }
}

impl MatchStore for MemoryStore {
    #[instrument(skip(self))]
    fn resolve_player(&self, name: &str) -> Result<PlayerId, StorageError> {
        let mut inner = self.lock()?;

        if let Some((id, _)) = inner.players.iter().find(|(_, n)| n == name) {
            debug!(player_id = id, "Existing player found");
            return Ok(*id);
        }

        let id = inner.players.len() as PlayerId + 1;
        inner.players.push((id, name.to_string()));
        info!(player_id = id, name = %name, "Player resolved");
        Ok(id)
    }

    #[instrument(skip(self))]
    fn record_match(
        &self,
        player_o: PlayerId,
        player_x: PlayerId,
        winner: Option<PlayerId>,
    ) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        inner.matches.push(StoredMatch {
            player_o_id: player_o,
            player_x_id: player_x,
            winner_id: winner,
        });
        info!(player_o, player_x, winner = ?winner, "Match recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let inner = self.lock()?;

        let entries = inner
            .players
            .iter()
            .map(|(id, name)| {
                let wins = inner
                    .matches
                    .iter()
                    .filter(|m| m.winner_id == Some(*id))
                    .count() as i32;
                let draws = inner
                    .matches
                    .iter()
                    .filter(|m| m.involves(*id) && m.winner_id.is_none())
                    .count() as i32;
                LeaderboardEntry::new(name.clone(), wins, draws)
            })
            .collect();

        Ok(rank(entries, limit))
    }
}
