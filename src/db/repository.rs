//! SQLite-backed match repository.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::store::{MatchStore, PlayerId, rank};
use crate::db::{LeaderboardEntry, MatchRecord, NewMatch, NewPlayer, Player, StorageError, schema};

/// Embedded schema migrations, applied by [`MatchRepository::run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Match repository backed by an embedded SQLite database.
///
/// Writes are single statements, so each `resolve_player` find-or-insert and
/// each `record_match` append is atomic with respect to readers.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db_path: String,
}

impl MatchRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating MatchRepository");
        Self { db_path }
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database is unreachable or a
    /// migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), StorageError> {
        debug!("Applying pending migrations");
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Gets a player by exact display name. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_player(&self, name: &str) -> Result<Option<Player>, StorageError> {
        debug!(name = %name, "Looking up player by name");
        let mut conn = self.connection()?;
        self.find_player_on(&mut conn, name)
    }

    fn find_player_on(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Player>, StorageError> {
        let player = schema::players::table
            .filter(schema::players::name.eq(name))
            .first::<Player>(conn)
            .optional()?;
        Ok(player)
    }

    /// Returns the player named `name`, registering them on first sight.
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` against the unique name
    /// constraint and re-reads, so two callers racing on the same name both
    /// observe the same row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn resolve_player(&self, name: &str) -> Result<Player, StorageError> {
        debug!(name = %name, "Resolving player");
        let mut conn = self.connection()?;

        if let Some(player) = self.find_player_on(&mut conn, name)? {
            debug!(player_id = player.id(), "Existing player found");
            return Ok(player);
        }

        diesel::insert_into(schema::players::table)
            .values(&NewPlayer::new(name.to_string()))
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        // Present whether this call inserted or lost the race.
        let player = self.find_player_on(&mut conn, name)?.ok_or_else(|| {
            StorageError::new(format!("Player '{}' missing after insert", name))
        })?;

        info!(player_id = player.id(), name = %player.name(), "Player resolved");
        Ok(player)
    }

    /// Lists all registered players, ordered by registration time.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        debug!("Listing all players");
        let mut conn = self.connection()?;

        let players = schema::players::table
            .order((
                schema::players::created_at.asc(),
                schema::players::id.asc(),
            ))
            .load::<Player>(&mut conn)?;

        info!(count = players.len(), "Players loaded");
        Ok(players)
    }

    /// Appends a completed match. `winner_id = None` records a draw.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self, new_match), fields(
        player_o = new_match.player_o_id(),
        player_x = new_match.player_x_id(),
        winner = ?new_match.winner_id(),
    ))]
    pub fn record_match(&self, new_match: NewMatch) -> Result<MatchRecord, StorageError> {
        debug!("Recording match");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::matches::table)
            .values(&new_match)
            .returning(MatchRecord::as_returning())
            .get_result(&mut conn)?;

        info!(
            match_id = record.id(),
            winner = ?record.winner_id(),
            "Match recorded"
        );
        Ok(record)
    }

    /// Gets all matches involving a player, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn matches_for_player(&self, player: PlayerId) -> Result<Vec<MatchRecord>, StorageError> {
        debug!(player_id = %player, "Loading match history");
        let mut conn = self.connection()?;

        let records = schema::matches::table
            .filter(
                schema::matches::player_o_id
                    .eq(player)
                    .or(schema::matches::player_x_id.eq(player)),
            )
            .order((
                schema::matches::played_at.desc(),
                schema::matches::id.desc(),
            ))
            .load::<MatchRecord>(&mut conn)?;

        info!(player_id = %player, count = records.len(), "Match history loaded");
        Ok(records)
    }

    /// Computes the leaderboard: every registered player aggregated over all
    /// recorded matches, ranked wins desc, draws desc, name asc.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError> {
        debug!(limit, "Computing leaderboard");
        let mut conn = self.connection()?;

        let players = schema::players::table.load::<Player>(&mut conn)?;
        let matches = schema::matches::table.load::<MatchRecord>(&mut conn)?;

        let entries = players
            .iter()
            .map(|p| {
                let wins = matches
                    .iter()
                    .filter(|m| *m.winner_id() == Some(*p.id()))
                    .count() as i32;
                let draws = matches
                    .iter()
                    .filter(|m| m.involves(*p.id()) && m.is_draw())
                    .count() as i32;
                LeaderboardEntry::new(p.name().clone(), wins, draws)
            })
            .collect();

        let ranked = rank(entries, limit);
        info!(count = ranked.len(), "Leaderboard computed");
        Ok(ranked)
    }
}

impl MatchStore for MatchRepository {
    fn resolve_player(&self, name: &str) -> Result<PlayerId, StorageError> {
        MatchRepository::resolve_player(self, name).map(|p| *p.id())
    }

    fn record_match(
        &self,
        player_o: PlayerId,
        player_x: PlayerId,
        winner: Option<PlayerId>,
    ) -> Result<(), StorageError> {
        MatchRepository::record_match(self, NewMatch::new(player_o, player_x, winner)).map(|_| ())
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StorageError> {
        MatchRepository::leaderboard(self, limit)
    }
}
