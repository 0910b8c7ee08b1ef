//! Database models and derived aggregates.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema;
use crate::db::store::PlayerId;

/// Registered player database model.
///
/// The display name is matched exactly on lookup: case sensitive, no
/// trimming beyond what the caller provides.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct Player {
    id: PlayerId,
    name: String,
    created_at: NaiveDateTime,
}

/// Insertable player model for first-time registration.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    name: String,
}

/// Recorded match database model. Rows are append-only and never updated.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::matches)]
pub struct MatchRecord {
    id: i32,
    player_o_id: PlayerId,
    player_x_id: PlayerId,
    winner_id: Option<PlayerId>,
    played_at: NaiveDateTime,
}

impl MatchRecord {
    /// Whether the given player took part in this match.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_o_id == player || self.player_x_id == player
    }

    /// Whether the match ended in a draw (no recorded winner).
    pub fn is_draw(&self) -> bool {
        self.winner_id.is_none()
    }
}

/// Insertable match model. `winner_id = None` records a draw.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::matches)]
pub struct NewMatch {
    player_o_id: PlayerId,
    player_x_id: PlayerId,
    winner_id: Option<PlayerId>,
}

/// One leaderboard row.
///
/// Derived by aggregating the stored matches at query time, never stored:
/// `wins` counts matches the player won, `draws` counts matches the player
/// took part in that ended without a winner.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize)]
pub struct LeaderboardEntry {
    name: String,
    wins: i32,
    draws: i32,
}
