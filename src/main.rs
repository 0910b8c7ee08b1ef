//! gridmatch terminal front-end.
//!
//! A thin stdin/stdout presentation layer: every game decision goes through
//! the engine, every persistence decision through the match store.

#![warn(missing_docs)]

mod cli;

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use gridmatch::{
    Game, GameStatus, LeaderboardEntry, Line, Mark, MatchRepository, MatchService, MatchStore,
    MemoryStore, MoveOutcome, PlayerId, StorageBackend, StorageConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = StorageConfig::resolve(cli.db_path.clone(), cli.config.as_deref())?;

    match cli.command {
        Command::Play { player_o, player_x } => run_play(&config, player_o, player_x),
        Command::Leaderboard { limit, json } => run_leaderboard(&config, limit, json),
        Command::History { name } => run_history(&config, name),
    }
}

/// Opens the configured store for a play session.
fn open_store(config: &StorageConfig) -> Result<Box<dyn MatchStore>> {
    match config.backend() {
        StorageBackend::Sqlite => Ok(Box::new(open_repository(config)?)),
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

/// Opens the SQLite repository and applies pending migrations.
fn open_repository(config: &StorageConfig) -> Result<MatchRepository> {
    let repo = MatchRepository::new(config.database().clone());
    repo.run_migrations()
        .context("Database unreachable at startup")?;
    Ok(repo)
}

/// Play one match and record its outcome.
fn run_play(
    config: &StorageConfig,
    player_o: Option<String>,
    player_x: Option<String>,
) -> Result<()> {
    let service = MatchService::new(open_store(config)?);

    let o_name = match player_o {
        Some(name) => name,
        None => prompt("Player O name: ")?,
    };
    let x_name = match player_x {
        Some(name) => name,
        None => prompt("Player X name: ")?,
    };

    let (o_id, x_id) = service.register_players(&o_name, &x_name)?;
    info!(o_id, x_id, "Players registered");

    let mut game = Game::new();
    println!("\n{}\n", game.state().board().display());

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.state().status().is_terminal() {
        let mover = game.state().current_player();
        let name = match mover {
            Mark::O => &o_name,
            Mark::X => &x_name,
        };
        print!("{} ({}) move as `row col` (0-2): ", name, mover);
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("Input closed before the match finished");
        };
        let line = line?;

        let Some((row, col)) = parse_coords(&line) else {
            println!("Could not parse `{}` - enter two numbers, e.g. `0 2`", line.trim());
            continue;
        };

        match game.attempt_move(row, col) {
            MoveOutcome::Rejected(reason) => println!("Move rejected: {}", reason),
            MoveOutcome::Placed {
                status,
                winning_line,
            } => {
                println!("\n{}\n", game.state().board().display());
                announce(&status, name, winning_line.as_ref());
            }
        }
    }

    record_with_retry(&service, o_id, x_id, *game.state().status(), &mut lines)?;

    let top = service.leaderboard(10)?;
    print_leaderboard(&top);
    Ok(())
}

/// Prints the terminal-state announcement.
fn announce(status: &GameStatus, mover_name: &str, winning_line: Option<&Line>) {
    match status {
        GameStatus::Won(mark) => {
            println!("{} ({}) wins!", mover_name, mark);
            if let Some(line) = winning_line {
                let coords: Vec<String> = line
                    .coords()
                    .iter()
                    .map(|(r, c)| format!("({},{})", r, c))
                    .collect();
                println!("Winning line: {}", coords.join(" "));
            }
        }
        GameStatus::Draw => println!("It's a draw!"),
        GameStatus::InProgress => {}
    }
}

/// Records the outcome, offering a retry on storage failure. The finished
/// game state is untouched by a failed write, so retrying is always safe.
fn record_with_retry<S: MatchStore>(
    service: &MatchService<S>,
    o_id: PlayerId,
    x_id: PlayerId,
    status: GameStatus,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<()> {
    loop {
        match service.record_outcome(o_id, x_id, &status) {
            Ok(()) => {
                println!("Match recorded.");
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Failed to record match");
                println!("Could not record the match: {}", e);
                print!("Retry? [y/N]: ");
                std::io::stdout().flush()?;
                match lines.next() {
                    Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => continue,
                    _ => {
                        println!("Match not recorded.");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Print the leaderboard.
fn run_leaderboard(config: &StorageConfig, limit: usize, json: bool) -> Result<()> {
    if *config.backend() == StorageBackend::Memory {
        bail!("The memory backend keeps no data between runs");
    }
    let repo = open_repository(config)?;
    let entries = repo.leaderboard(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_leaderboard(&entries);
    }
    Ok(())
}

/// Print a player's match history, most recent first.
fn run_history(config: &StorageConfig, name: String) -> Result<()> {
    if *config.backend() == StorageBackend::Memory {
        bail!("The memory backend keeps no data between runs");
    }
    let repo = open_repository(config)?;

    let Some(player) = repo.find_player(&name)? else {
        println!("No player named `{}`", name);
        return Ok(());
    };

    let names: std::collections::HashMap<PlayerId, String> = repo
        .list_players()?
        .into_iter()
        .map(|p| (*p.id(), p.name().clone()))
        .collect();

    let records = repo.matches_for_player(*player.id())?;
    if records.is_empty() {
        println!("No matches recorded for {}", name);
        return Ok(());
    }

    println!("{:<20}  {:<10}  {}", "Opponent", "Result", "Played at");
    for record in records {
        let opponent_id = if *record.player_o_id() == *player.id() {
            *record.player_x_id()
        } else {
            *record.player_o_id()
        };
        let opponent = names
            .get(&opponent_id)
            .map(String::as_str)
            .unwrap_or("<unknown>");
        let result = match record.winner_id() {
            None => "Draw",
            Some(id) if *id == *player.id() => "Win",
            Some(_) => "Loss",
        };
        println!("{:<20}  {:<10}  {}", opponent, result, record.played_at());
    }
    Ok(())
}

/// Renders leaderboard entries as a fixed-width table.
fn print_leaderboard(entries: &[LeaderboardEntry]) {
    if entries.is_empty() {
        println!("No matches yet!");
        return;
    }
    println!("{:<20}  {:>4}  {:>5}", "Player", "Wins", "Draws");
    for entry in entries {
        println!(
            "{:<20}  {:>4}  {:>5}",
            entry.name(),
            entry.wins(),
            entry.draws()
        );
    }
}

/// Reads one trimmed line from stdin after printing a prompt.
fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Parses `row col` into coordinates. Range checking is the engine's job.
fn parse_coords(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
