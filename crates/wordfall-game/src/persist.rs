//! Score persistence: the single best score plus an ordered top-N
//! leaderboard, read at startup and written on game-over.
//!
//! The trait is the narrow boundary; gameplay never depends on a particular
//! backend. [`MemoryScoreStore`] backs tests and the headless example,
//! [`JsonFileScoreStore`] persists to a JSON file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How many leaderboard entries are kept.
pub const LEADERBOARD_SIZE: usize = 10;

/// Errors from the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Filesystem failure.
    #[error("score store io error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored data could not be parsed.
    #[error("score store corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Final score.
    pub score: u64,
    /// Seconds since the Unix epoch when the run ended.
    pub timestamp: u64,
}

/// Key-value persistence boundary for scores.
pub trait ScoreStore {
    /// Best score on record, 0 when none.
    fn best_score(&self) -> u64;

    /// Record a new best score.
    fn save_best(&mut self, score: u64) -> Result<(), PersistError>;

    /// The ordered top-N leaderboard, best first.
    fn leaderboard(&self) -> Vec<LeaderboardEntry>;

    /// Submit a finished run; the store orders and truncates to top-N and
    /// stamps the timestamp.
    fn submit(&mut self, name: &str, score: u64) -> Result<(), PersistError>;
}

/// Insert a row keeping the board sorted (best first, earlier entry wins
/// ties) and truncated to [`LEADERBOARD_SIZE`].
fn insert_ranked(board: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    let at = board
        .iter()
        .position(|e| e.score < entry.score)
        .unwrap_or(board.len());
    board.insert(at, entry);
    board.truncate(LEADERBOARD_SIZE);
}

// ---------------------------------------------------------------------------
// MemoryScoreStore
// ---------------------------------------------------------------------------

/// In-memory backend with a deterministic timestamp counter.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: u64,
    board: Vec<LeaderboardEntry>,
    clock: u64,
}

impl MemoryScoreStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best_score(&self) -> u64 {
        self.best
    }

    fn save_best(&mut self, score: u64) -> Result<(), PersistError> {
        self.best = self.best.max(score);
        Ok(())
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.board.clone()
    }

    fn submit(&mut self, name: &str, score: u64) -> Result<(), PersistError> {
        self.clock += 1;
        insert_ranked(
            &mut self.board,
            LeaderboardEntry {
                name: name.to_owned(),
                score,
                timestamp: self.clock,
            },
        );
        self.best = self.best.max(score);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileScoreStore
// ---------------------------------------------------------------------------

/// On-disk state, one JSON document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    best: u64,
    board: Vec<LeaderboardEntry>,
}

/// JSON-file backend. Reads once at construction; every mutation rewrites the
/// file.
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    state: ScoreFile,
}

impl JsonFileScoreStore {
    /// Open (or start fresh at) `path`.
    ///
    /// A missing file is an empty store; a corrupt file is an error so the
    /// caller can decide whether to discard it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => ScoreFile::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, state })
    }

    fn flush(&self) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn best_score(&self) -> u64 {
        self.state.best
    }

    fn save_best(&mut self, score: u64) -> Result<(), PersistError> {
        self.state.best = self.state.best.max(score);
        self.flush()
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.state.board.clone()
    }

    fn submit(&mut self, name: &str, score: u64) -> Result<(), PersistError> {
        insert_ranked(
            &mut self.state.board,
            LeaderboardEntry {
                name: name.to_owned(),
                score,
                timestamp: Self::now(),
            },
        );
        self.state.best = self.state.best.max(score);
        self.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_only_moves_up() {
        let mut store = MemoryScoreStore::new();
        store.save_best(500).unwrap();
        store.save_best(200).unwrap();
        assert_eq!(store.best_score(), 500);
    }

    #[test]
    fn leaderboard_ordered_best_first() {
        let mut store = MemoryScoreStore::new();
        store.submit("A", 100).unwrap();
        store.submit("B", 300).unwrap();
        store.submit("C", 200).unwrap();
        let scores: Vec<u64> = store.leaderboard().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[test]
    fn leaderboard_truncates_to_top_n() {
        let mut store = MemoryScoreStore::new();
        for i in 0..20u64 {
            store.submit("X", i * 10).unwrap();
        }
        let board = store.leaderboard();
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        assert_eq!(board[0].score, 190);
        assert_eq!(board.last().unwrap().score, 100);
    }

    #[test]
    fn ties_keep_earlier_entry_first() {
        let mut store = MemoryScoreStore::new();
        store.submit("FIRST", 100).unwrap();
        store.submit("SECOND", 100).unwrap();
        let board = store.leaderboard();
        assert_eq!(board[0].name, "FIRST");
        assert!(board[0].timestamp < board[1].timestamp);
    }

    #[test]
    fn submit_updates_best() {
        let mut store = MemoryScoreStore::new();
        store.submit("A", 750).unwrap();
        assert_eq!(store.best_score(), 750);
    }

    #[test]
    fn json_store_roundtrips() {
        let dir = std::env::temp_dir().join("wordfall-score-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("scores.json");
        let _ = std::fs::remove_file(&path);

        {
            let mut store = JsonFileScoreStore::open(&path).unwrap();
            store.submit("AGENT", 4200).unwrap();
        }
        let store = JsonFileScoreStore::open(&path).unwrap();
        assert_eq!(store.best_score(), 4200);
        assert_eq!(store.leaderboard()[0].name, "AGENT");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_empty_store() {
        let path = std::env::temp_dir().join("wordfall-score-missing.json");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileScoreStore::open(&path).unwrap();
        assert_eq!(store.best_score(), 0);
        assert!(store.leaderboard().is_empty());
    }
}
