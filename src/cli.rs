//! Command-line interface for the terminal front-end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gridmatch - two-player tic-tac-toe with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "gridmatch")]
#[command(about = "Two-player tic-tac-toe with persistent match history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML storage config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path (overrides config; created if missing)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match at the terminal
    Play {
        /// Display name for player O (prompted for when omitted)
        #[arg(long)]
        player_o: Option<String>,

        /// Display name for player X (prompted for when omitted)
        #[arg(long)]
        player_x: Option<String>,
    },

    /// Print the leaderboard
    Leaderboard {
        /// Maximum number of entries
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a player's match history
    History {
        /// Player display name (exact match)
        name: String,
    },
}
