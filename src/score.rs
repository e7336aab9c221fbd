use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::StorageError;

const APP_DIR_NAME: &str = "neon-snake";
const HIGH_SCORE_FILE_NAME: &str = "snakeHighScore";

/// Returns the per-user directory holding everything this game persists.
#[must_use]
pub fn app_data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct high score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    app_data_dir().join(HIGH_SCORE_FILE_NAME)
}

/// Best score seen so far, mirrored to a file holding one decimal integer.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Opens the default score file.
    #[must_use]
    pub fn open_default() -> Self {
        Self::open(scores_path())
    }

    /// Loads the stored score; a missing or unreadable file counts as 0.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let best = match read_high_score(&path) {
            Ok(score) => score,
            Err(error) => {
                warn!("ignoring stored high score: {error}");
                0
            }
        };

        Self { path, best }
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists `score` when it beats the stored best.
    ///
    /// Returns whether a new high score was written.
    pub fn record(&mut self, score: u32) -> Result<bool, StorageError> {
        if score <= self.best {
            return Ok(false);
        }

        write_high_score(&self.path, score)?;
        self.best = score;
        Ok(true)
    }
}

/// Reads a high score file. A file that does not exist yet yields 0.
///
/// The whole trimmed content must be a number; trailing junk such as `70abc`
/// is a parse error rather than a partial read.
pub fn read_high_score(path: &Path) -> Result<u32, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    raw.trim()
        .parse::<u32>()
        .map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `score` as a base-10 string, creating parent directories when needed.
pub fn write_high_score(path: &Path, score: u32) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    fs::write(path, score.to_string()).map_err(|e| StorageError::io(path, e))
}
