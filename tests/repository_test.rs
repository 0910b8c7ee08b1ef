//! Tests for the SQLite match repository.

use tempfile::NamedTempFile;

use gridmatch::{MatchRepository, MatchStore, NewMatch, PlayerId};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, MatchRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = MatchRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn resolve(repo: &MatchRepository, name: &str) -> PlayerId {
    *repo.resolve_player(name).expect("Resolve failed").id()
}

#[test]
fn test_resolve_player_creates_on_first_sight() {
    let (_db, repo) = setup_test_db();
    let player = repo.resolve_player("Alice").expect("Resolve failed");
    assert_eq!(player.name(), "Alice");
    assert!(*player.id() > 0);
}

#[test]
fn test_resolve_player_is_idempotent() {
    let (_db, repo) = setup_test_db();
    let first = resolve(&repo, "Alice");
    let second = resolve(&repo, "Alice");
    assert_eq!(first, second);
}

#[test]
fn test_resolve_player_distinct_names_distinct_ids() {
    let (_db, repo) = setup_test_db();
    let alice = resolve(&repo, "Alice");
    let bob = resolve(&repo, "Bob");
    assert_ne!(alice, bob);
}

#[test]
fn test_resolve_player_is_case_sensitive() {
    let (_db, repo) = setup_test_db();
    let lower = resolve(&repo, "alice");
    let upper = resolve(&repo, "Alice");
    assert_ne!(lower, upper);
}

#[test]
fn test_find_player_found_and_not_found() {
    let (_db, repo) = setup_test_db();
    resolve(&repo, "Carol");

    let found = repo.find_player("Carol").expect("Query failed");
    assert_eq!(found.expect("Carol should exist").name(), "Carol");

    let missing = repo.find_player("NoSuchPlayer").expect("Query failed");
    assert!(missing.is_none());
}

#[test]
fn test_list_players_ordered_by_registration() {
    let (_db, repo) = setup_test_db();
    for name in ["Alpha", "Beta", "Gamma"] {
        resolve(&repo, name);
    }

    let players = repo.list_players().expect("List failed");
    let names: Vec<&str> = players.iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_record_match_with_winner() {
    let (_db, repo) = setup_test_db();
    let alice = resolve(&repo, "Alice");
    let bob = resolve(&repo, "Bob");

    let record = repo
        .record_match(NewMatch::new(alice, bob, Some(alice)))
        .expect("Record failed");

    assert_eq!(*record.player_o_id(), alice);
    assert_eq!(*record.player_x_id(), bob);
    assert_eq!(*record.winner_id(), Some(alice));
    assert!(!record.is_draw());
}

#[test]
fn test_record_match_draw() {
    let (_db, repo) = setup_test_db();
    let alice = resolve(&repo, "Alice");
    let bob = resolve(&repo, "Bob");

    let record = repo
        .record_match(NewMatch::new(alice, bob, None))
        .expect("Record failed");

    assert!(record.is_draw());
}

#[test]
fn test_matches_for_player_covers_both_seats() {
    let (_db, repo) = setup_test_db();
    let alice = resolve(&repo, "Alice");
    let bob = resolve(&repo, "Bob");
    let carol = resolve(&repo, "Carol");

    repo.record_match(NewMatch::new(alice, bob, Some(alice)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(bob, alice, None))
        .expect("Record failed");
    repo.record_match(NewMatch::new(bob, carol, Some(carol)))
        .expect("Record failed");

    let history = repo.matches_for_player(alice).expect("History failed");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|m| m.involves(alice)));

    let carol_history = repo.matches_for_player(carol).expect("History failed");
    assert_eq!(carol_history.len(), 1);
}

#[test]
fn test_leaderboard_aggregates_wins_and_draws() {
    let (_db, repo) = setup_test_db();
    let a = resolve(&repo, "A");
    let b = resolve(&repo, "B");

    // A beats B twice, then they draw.
    repo.record_match(NewMatch::new(a, b, Some(a)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(a, b, Some(a)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(a, b, None))
        .expect("Record failed");

    let board = repo.leaderboard(10).expect("Leaderboard failed");
    assert_eq!(board.len(), 2);

    assert_eq!(board[0].name(), "A");
    assert_eq!(*board[0].wins(), 2);
    assert_eq!(*board[0].draws(), 1);

    assert_eq!(board[1].name(), "B");
    assert_eq!(*board[1].wins(), 0);
    assert_eq!(*board[1].draws(), 1);
}

#[test]
fn test_leaderboard_orders_by_wins_then_draws_then_name() {
    let (_db, repo) = setup_test_db();
    let dana = resolve(&repo, "Dana");
    let carl = resolve(&repo, "Carl");
    let abby = resolve(&repo, "Abby");
    let bert = resolve(&repo, "Bert");

    // Carl: 1 win 1 draw. Dana: 1 win. Bert: 1 draw. Abby: nothing.
    repo.record_match(NewMatch::new(dana, abby, Some(dana)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(carl, bert, Some(carl)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(carl, bert, None))
        .expect("Record failed");

    let board = repo.leaderboard(10).expect("Leaderboard failed");
    let names: Vec<&str> = board.iter().map(|e| e.name().as_str()).collect();

    // Wins rank first; draws break the Carl/Dana and Bert/Abby ties.
    assert_eq!(names, ["Carl", "Dana", "Bert", "Abby"]);
}

#[test]
fn test_leaderboard_ties_break_by_name_ascending() {
    let (_db, repo) = setup_test_db();
    for name in ["Zoe", "Mia", "Ann"] {
        resolve(&repo, name);
    }

    let board = repo.leaderboard(10).expect("Leaderboard failed");
    let names: Vec<&str> = board.iter().map(|e| e.name().as_str()).collect();
    assert_eq!(names, ["Ann", "Mia", "Zoe"]);
}

#[test]
fn test_leaderboard_includes_players_without_matches() {
    let (_db, repo) = setup_test_db();
    resolve(&repo, "Idle");

    let board = repo.leaderboard(10).expect("Leaderboard failed");
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name(), "Idle");
    assert_eq!(*board[0].wins(), 0);
    assert_eq!(*board[0].draws(), 0);
}

#[test]
fn test_leaderboard_respects_limit() {
    let (_db, repo) = setup_test_db();
    for name in ["P1", "P2", "P3", "P4", "P5"] {
        resolve(&repo, name);
    }

    let board = repo.leaderboard(3).expect("Leaderboard failed");
    assert_eq!(board.len(), 3);
}

#[test]
fn test_match_store_trait_object() {
    let (_db, repo) = setup_test_db();
    let store: &dyn MatchStore = &repo;

    let alice = store.resolve_player("Alice").expect("Resolve failed");
    let bob = store.resolve_player("Bob").expect("Resolve failed");
    store
        .record_match(alice, bob, Some(bob))
        .expect("Record failed");

    let board = store.leaderboard(10).expect("Leaderboard failed");
    assert_eq!(board[0].name(), "Bob");
    assert_eq!(*board[0].wins(), 1);
}

#[test]
fn test_retry_after_failure_appends_again() {
    // Retrying record_match with the same arguments is an append, not an
    // upsert; duplicate rows are the documented accepted risk.
    let (_db, repo) = setup_test_db();
    let a = resolve(&repo, "A");
    let b = resolve(&repo, "B");

    repo.record_match(NewMatch::new(a, b, Some(a)))
        .expect("Record failed");
    repo.record_match(NewMatch::new(a, b, Some(a)))
        .expect("Record failed");

    let board = repo.leaderboard(10).expect("Leaderboard failed");
    assert_eq!(*board[0].wins(), 2);
}
