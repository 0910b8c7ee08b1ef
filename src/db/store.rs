//! The storage seam: `MatchStore` trait and the shared ranking rule.

use crate::db::{LeaderboardEntry, StorageError};

/// Unique identifier for a registered player.
pub type PlayerId = i32;

/// Persistence contract for recording match outcomes and ranking players.
///
/// The core depends only on this trait; backends behind it are
/// interchangeable. The crate ships [`MatchRepository`](crate::MatchRepository)
/// (embedded SQLite) and [`MemoryStore`](crate::MemoryStore) (in-memory, for
/// tests and persistence-free play).
pub trait MatchStore {
    /// Returns the id for `name`, creating the player on first sight.
    ///
    /// Name equality is exact-string (case sensitive, no trimming). The
    /// find-or-insert is atomic with respect to concurrent callers passing
    /// the same name; both observe the same id.
    fn resolve_player(&self, name: &str) -> Result<PlayerId, StorageError>;

    /// Appends an immutable match record with the current timestamp.
    ///
    /// `winner = None` records a draw. Ids are expected to come from
    /// [`resolve_player`](Self::resolve_player); no further validation is
    /// performed. Safe to retry with the same arguments after a failure;
    /// without idempotency keys a retry after a partial failure may record
    /// the match twice, which is accepted.
    fn record_match(
        &self,
        player_o: PlayerId,
        player_x: PlayerId,
        winner: Option<PlayerId>,
    ) -> Result<(), StorageError>;

    /// Returns up to `limit` leaderboard entries.
    ///
    /// Every registered player is eligible, including those with no
    /// recorded matches. Ordering: wins descending, then draws descending,
    /// then name ascending - deterministic for identical data.
    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError>;
}

impl<S: MatchStore + ?Sized> MatchStore for Box<S> {
    fn resolve_player(&self, name: &str) -> Result<PlayerId, StorageError> {
        (**self).resolve_player(name)
    }

    fn record_match(
        &self,
        player_o: PlayerId,
        player_x: PlayerId,
        winner: Option<PlayerId>,
    ) -> Result<(), StorageError> {
        (**self).record_match(player_o, player_x, winner)
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError> {
        (**self).leaderboard(limit)
    }
}

/// Sorts entries by the leaderboard ordering and truncates to `limit`.
///
/// Lives here so every [`MatchStore`] implementation ranks identically.
pub(crate) fn rank(mut entries: Vec<LeaderboardEntry>, limit: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.wins()
            .cmp(a.wins())
            .then_with(|| b.draws().cmp(a.draws()))
            .then_with(|| a.name().cmp(b.name()))
    });
    entries.truncate(limit);
    entries
}
