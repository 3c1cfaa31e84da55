//! High-score file
//!
//! Keeps the best score across sessions in a small JSON document. The file is
//! optional: a missing file simply means nothing has been recorded yet.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScoresError;
use crate::metrics::GameMetrics;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    /// Best score ever reached
    pub best: u32,
    /// Rounds finished across every recorded session
    pub rounds_played: u64,
    /// When `best` was last raised, in seconds since the Unix epoch
    pub updated_at_unix: Option<u64>,
}

impl HighScores {
    /// Load the score file, treating a missing file as an empty record
    pub fn load_or_default(path: &Path) -> Result<Self, ScoresError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(?path, "no score file yet");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ScoresError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| ScoresError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fold a finished session into the record; returns true on a new best
    pub fn record(&mut self, metrics: &GameMetrics) -> bool {
        self.rounds_played += u64::from(metrics.rounds_played);

        if metrics.high_score > self.best {
            info!(previous = self.best, best = metrics.high_score, "new high score");
            self.best = metrics.high_score;
            self.updated_at_unix = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs());
            return true;
        }
        false
    }

    /// Load the file, fold the session in and write it back.
    ///
    /// A file that exists but cannot be read or parsed is left untouched and
    /// the error is returned.
    pub fn update_file(path: &Path, metrics: &GameMetrics) -> Result<(Self, bool), ScoresError> {
        let mut scores = Self::load_or_default(path)?;
        let new_best = scores.record(metrics);
        scores.save(path)?;
        Ok((scores, new_best))
    }

    /// Write the record, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<(), ScoresError> {
        let io_err = |source: std::io::Error| ScoresError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ScoresError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RoundEnd;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_record() {
        let dir = TempDir::new().unwrap();
        let scores = HighScores::load_or_default(&dir.path().join("scores.json")).unwrap();
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn test_record_keeps_best() {
        let mut scores = HighScores {
            best: 12,
            ..Default::default()
        };

        let mut metrics = GameMetrics::new();
        metrics.on_round_over(7, RoundEnd::Wall);
        assert!(!scores.record(&metrics));
        assert_eq!(scores.best, 12);
        assert_eq!(scores.rounds_played, 1);

        metrics.on_round_over(20, RoundEnd::SelfCollision);
        assert!(scores.record(&metrics));
        assert_eq!(scores.best, 20);
        assert_eq!(scores.rounds_played, 3);
        assert!(scores.updated_at_unix.is_some());
    }

    #[test]
    fn test_save_creates_directories_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let scores = HighScores {
            best: 42,
            rounds_played: 9,
            updated_at_unix: Some(1_700_000_000),
        };
        scores.save(&path).unwrap();

        assert_eq!(HighScores::load_or_default(&path).unwrap(), scores);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let err = HighScores::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ScoresError::Format { .. }));
    }

    #[test]
    fn test_update_file_records_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut metrics = GameMetrics::new();
        metrics.on_round_over(4, RoundEnd::Wall);

        let (scores, new_best) = HighScores::update_file(&path, &metrics).unwrap();
        assert!(new_best);
        assert_eq!(scores.best, 4);
        assert_eq!(HighScores::load_or_default(&path).unwrap(), scores);
    }

    #[test]
    fn test_update_file_leaves_corrupt_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let stored = r#"{"best":500,"rounds_played":12,"updated_at_unix":null,}"#;
        fs::write(&path, stored).unwrap();

        let mut metrics = GameMetrics::new();
        metrics.on_round_over(3, RoundEnd::SelfCollision);

        let err = HighScores::update_file(&path, &metrics).unwrap_err();
        assert!(matches!(err, ScoresError::Format { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), stored);
    }
}
