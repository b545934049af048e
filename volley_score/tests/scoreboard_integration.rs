/// Integration tests for the scoreboard host
///
/// These tests run the scoreboard against in-memory and on-disk stores and
/// check what it persists around each command.
use serial_test::serial;
use std::path::PathBuf;

use volley_score::{
    Command, MatchError, MatchEvent, MatchPhase, Side,
    game::engine::{ResetMatch, SetMatchFormat, SetTeamName},
    history::MatchHistory,
    session::{Scoreboard, ScoreboardConfig},
    storage::{
        FileStore, GAME_STATE_KEY, KeyValueStore, MATCH_FORMAT_KEY, MATCH_HISTORY_KEY,
        MemoryStore, StorageError, StorageResult,
    },
};

/// Store whose writes always fail.
#[derive(Debug, Default)]
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn remove(&mut self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

fn board() -> Scoreboard<MemoryStore> {
    Scoreboard::open(MemoryStore::new(), ScoreboardConfig::default())
}

fn win_set<S: KeyValueStore>(board: &mut Scoreboard<S>, side: Side) {
    let target = board.state().points_to_win();
    for _ in 0..target {
        board.handle(Command::add_point(side)).unwrap();
    }
}

#[test]
fn test_every_command_is_saved() {
    let mut board = board();
    board.handle(Command::add_point(Side::A)).unwrap();
    board.handle(Command::add_point(Side::B)).unwrap();

    let json = board.store().get(GAME_STATE_KEY).unwrap().unwrap();
    assert!(json.contains("\"scoreA\":1"));
    assert!(json.contains("\"scoreB\":1"));
    assert!(json.contains("\"servingSide\":\"B\""));
    assert!(json.contains("\"rotationB\":[6,1,2,3,4,5]"));
}

#[test]
fn test_rejected_command_changes_nothing() {
    let mut board = board();
    board.handle(Command::request_timeout(Side::A)).unwrap();
    board.handle(Command::request_timeout(Side::A)).unwrap();
    let before = board.state().clone();

    let result = board.handle(Command::request_timeout(Side::A));
    assert_eq!(result, Err(MatchError::NoTimeoutsAvailable { side: Side::A }));
    assert_eq!(board.state(), &before);
}

#[test]
fn test_persistence_failure_keeps_new_state() {
    let mut board = Scoreboard::open(BrokenStore, ScoreboardConfig::default());
    let events = board.handle(Command::add_point(Side::B)).unwrap();
    assert!(events.is_empty());
    assert_eq!(board.state().score_b, 1);

    win_set(&mut board, Side::A);
    win_set(&mut board, Side::A);
    win_set(&mut board, Side::A);
    assert_eq!(board.state().phase(), MatchPhase::MatchComplete);
}

#[test]
fn test_completed_match_goes_to_history() {
    let mut board = Scoreboard::open(
        MemoryStore::new(),
        ScoreboardConfig {
            default_sets_to_win: 2,
            ..ScoreboardConfig::default()
        },
    );
    board
        .handle(
            SetTeamName {
                side: Side::B,
                name: "Sharks".to_string(),
            }
            .into(),
        )
        .unwrap();
    win_set(&mut board, Side::B);
    board.toggle_clock();
    board.tick(90);
    win_set(&mut board, Side::B);

    assert!(!board.clock().is_running());
    let history = board.history().unwrap();
    assert_eq!(history.len(), 1);
    let record = history.iter().next().unwrap();
    assert_eq!(record.winner_name.as_str(), "Sharks");
    assert_eq!((record.sets_a, record.sets_b), (0, 2));
    assert_eq!(record.set_scores.len(), 2);

    let id = record.id;
    board.delete_match(id).unwrap();
    assert!(board.history().unwrap().is_empty());
}

#[test]
fn test_reset_saves_format_and_restarts_clock() {
    let mut board = board();
    board.toggle_clock();
    board.tick(300);
    board.handle(Command::add_point(Side::A)).unwrap();

    let events = board
        .handle(
            ResetMatch {
                sets_to_win: Some(2),
                keep_names: false,
            }
            .into(),
        )
        .unwrap();
    assert_eq!(events, vec![MatchEvent::MatchReset { sets_to_win: 2 }]);
    assert_eq!(board.clock().elapsed_seconds(), 0);
    assert!(!board.clock().is_running());

    let format = board.store().get(MATCH_FORMAT_KEY).unwrap().unwrap();
    assert_eq!(format, r#"{"setsToWin":2}"#);
    let json = board.store().get(GAME_STATE_KEY).unwrap().unwrap();
    assert!(json.contains("\"scoreA\":0"));
}

#[test]
fn test_format_change_before_first_point() {
    let mut board = board();
    let events = board.handle(SetMatchFormat { sets_to_win: 2 }.into()).unwrap();
    assert_eq!(events, vec![MatchEvent::FormatChanged { sets_to_win: 2 }]);

    let reopened = Scoreboard::open(board.into_store(), ScoreboardConfig::default());
    assert_eq!(reopened.state().sets_to_win, 2);
}

#[test]
fn test_reopen_restores_match() {
    let mut board = board();
    win_set(&mut board, Side::A);
    board.handle(Command::add_point(Side::B)).unwrap();
    board.handle(Command::request_timeout(Side::A)).unwrap();
    let saved = board.state().clone();

    let reopened = Scoreboard::open(board.into_store(), ScoreboardConfig::default());
    assert_eq!(reopened.state(), &saved);
    assert!(!reopened.countdown().is_active());
}

#[test]
fn test_corrupt_history_is_reported_and_can_be_cleared() {
    let mut store = MemoryStore::new();
    store.set(MATCH_HISTORY_KEY, "{broken").unwrap();
    let mut board = Scoreboard::open(store, ScoreboardConfig::default());
    assert!(board.history().is_err());

    board.clear_history().unwrap();
    assert!(board.history().unwrap().is_empty());
    assert_eq!(board.into_store().get(MATCH_HISTORY_KEY).unwrap(), None);
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("volley_score_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
#[serial]
fn test_file_store_round_trip_across_sessions() {
    let dir = scratch_dir("sessions");
    let config = ScoreboardConfig {
        default_sets_to_win: 2,
        ..ScoreboardConfig::default()
    };

    let mut board = Scoreboard::open(FileStore::open(&dir).unwrap(), config.clone());
    win_set(&mut board, Side::A);
    win_set(&mut board, Side::A);
    drop(board);

    let board = Scoreboard::open(FileStore::open(&dir).unwrap(), config);
    assert_eq!(board.state().phase(), MatchPhase::MatchComplete);
    assert_eq!(board.state().score_a, 25);
    let history = MatchHistory::load(board.store()).unwrap();
    assert_eq!(history.len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
