//! The leaderboard: where the results of the won games are kept.
//!
//! The game never depends on the leaderboard working. A store that fails to save a result gets logged and ignored,
//! and the game ends as usual.

use crate::GameSession;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;

/// How many results are listed by default.
pub const DEFAULT_TOP_LIMIT: usize = 50;

/// The format the results' dates are displayed in.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("couldn't access the leaderboard: {0}")]
    Io(#[from] io::Error),
    #[error("the leaderboard is corrupted: {0}")]
    Json(#[from] serde_json::Error),
}

/// The result of a single finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_name: String,
    /// The time the game took, in seconds, rounded to hundredths.
    pub elapsed_secs: f64,
    pub won: bool,
    pub difficulty: String,
    /// The moment the result has been recorded.
    pub timestamp: DateTime<Local>,
}

impl GameRecord {
    pub fn new(
        player_name: impl Into<String>,
        elapsed: Duration,
        won: bool,
        difficulty: impl Into<String>,
    ) -> Self {
        GameRecord {
            player_name: player_name.into(),
            elapsed_secs: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            won,
            difficulty: difficulty.into(),
            timestamp: Local::now(),
        }
    }
}

/// A place to keep the results in.
pub trait Leaderboard {
    /// Stores a single result.
    fn submit(&mut self, record: GameRecord) -> Result<(), LeaderboardError>;

    /// Returns the stored results, fastest first, optionally capped to the first `limit` ones.
    fn top(&self, limit: Option<usize>) -> Result<Vec<GameRecord>, LeaderboardError>;
}

/// Orders the records fastest first (the earlier one goes first on a tie) and cuts the list down to `limit`.
fn rank(mut records: Vec<GameRecord>, limit: Option<usize>) -> Vec<GameRecord> {
    records.sort_by(|a, b| {
        a.elapsed_secs
            .total_cmp(&b.elapsed_secs)
            .then(a.timestamp.cmp(&b.timestamp))
    });

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    records
}

/// A leaderboard that lives as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    records: Vec<GameRecord>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        MemoryLeaderboard::default()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit(&mut self, record: GameRecord) -> Result<(), LeaderboardError> {
        self.records.push(record);
        Ok(())
    }

    fn top(&self, limit: Option<usize>) -> Result<Vec<GameRecord>, LeaderboardError> {
        Ok(rank(self.records.clone(), limit))
    }
}

/// A leaderboard kept in a JSON file as an array of records. A missing file is an empty leaderboard.
///
/// The file is never rewritten in place: the new contents go to a sibling `.tmp` file first, which then replaces the
/// old one, so an interrupted write leaves the previous records intact.
#[derive(Debug)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
}

impl JsonFileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileLeaderboard { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<GameRecord>, LeaderboardError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().map(OsString::from).unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl Leaderboard for JsonFileLeaderboard {
    fn submit(&mut self, record: GameRecord) -> Result<(), LeaderboardError> {
        let mut records = self.load()?;
        records.push(record);

        let temporary_path = self.temporary_path();
        fs::write(&temporary_path, serde_json::to_string_pretty(&records)?)?;
        fs::rename(&temporary_path, &self.path)?;
        Ok(())
    }

    fn top(&self, limit: Option<usize>) -> Result<Vec<GameRecord>, LeaderboardError> {
        Ok(rank(self.load()?, limit))
    }
}

/// Hands the result of a won game over to the leaderboard.
///
/// Only victories are recorded. Returns whether the result has been stored; a failing store is logged and otherwise
/// ignored.
pub fn submit_victory(leaderboard: &mut dyn Leaderboard, session: &GameSession, player_name: &str) -> bool {
    let Some(record) = session.finished_record(player_name) else {
        return false;
    };

    match leaderboard.submit(record) {
        Ok(()) => {
            tracing::info!(player_name, "the leaderboard has been updated");
            true
        }
        Err(error) => {
            tracing::warn!(%error, "couldn't update the leaderboard, the result is lost");
            false
        }
    }
}
