use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_HIGHSCORE_ENTRIES;

const APP_DIR_NAME: &str = "snake";
const SCORE_FILE_NAME: &str = "highscores.json";

/// One row of the highscore list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub player_name: String,
    pub score: u32,
}

impl HighscoreEntry {
    #[must_use]
    pub fn new(player_name: impl Into<String>, score: u32) -> Self {
        Self {
            player_name: player_name.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("highscore file {} could not be accessed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("highscore file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// Records stay untyped on disk so one bad row does not discard the rest.
#[derive(Debug, Default, Deserialize)]
struct StoredFile {
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct StoredFileRef<'a> {
    entries: &'a [HighscoreEntry],
}

/// Returns the platform-correct highscore file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Bounded, descending list of the best scores, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
    entries: Vec<HighscoreEntry>,
}

impl HighscoreStore {
    /// Creates an empty store that will save to `path`.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Loads the list stored at `path`.
    ///
    /// Never fails: a missing file yields an empty list, and an unreadable or
    /// malformed file is logged and also treated as empty.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => {
                info!("loaded {} highscore entries from {}", entries.len(), path.display());
                entries
            }
            Err(error) => {
                warn!("ignoring highscore file: {error}");
                Vec::new()
            }
        };

        let mut store = Self { path, entries };
        store.normalize();
        store
    }

    /// Returns true when `score` earns a place in the list.
    #[must_use]
    pub fn is_qualifying(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }

        if self.entries.len() < MAX_HIGHSCORE_ENTRIES {
            return true;
        }

        self.entries
            .iter()
            .map(|entry| entry.score)
            .min()
            .is_none_or(|lowest| score > lowest)
    }

    /// Inserts `entry` after every entry with an equal or higher score and
    /// drops whatever falls off the end.
    ///
    /// Returns the entry's rank (0 is best) if it is still in the list.
    pub fn insert(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(self.entries.len());

        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGHSCORE_ENTRIES);

        (index < self.entries.len()).then_some(index)
    }

    /// Writes the full list, replacing any previous file.
    pub fn save(&self) -> Result<(), ScoreError> {
        write_entries(&self.path, &self.entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn normalize(&mut self) {
        // Stable sort keeps file order among equal scores.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGHSCORE_ENTRIES);
    }
}

fn read_entries(path: &Path) -> Result<Vec<HighscoreEntry>, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ScoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: StoredFile = serde_json::from_str(&raw)?;
    let total = file.entries.len();
    let entries: Vec<HighscoreEntry> = file
        .entries
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if entries.len() < total {
        warn!(
            "skipped {} malformed highscore records in {}",
            total - entries.len(),
            path.display()
        );
    }

    Ok(entries)
}

fn write_entries(path: &Path, entries: &[HighscoreEntry]) -> Result<(), ScoreError> {
    let io_error = |source| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    let json = serde_json::to_string_pretty(&StoredFileRef { entries })?;
    fs::write(path, json).map_err(io_error)
}
