use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::error::StorageError;
use crate::grid::WallMode;
use crate::score::app_data_dir;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Choices remembered from the last started game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub wall_mode: WallMode,
}

#[must_use]
pub fn settings_path() -> PathBuf {
    app_data_dir().join(SETTINGS_FILE_NAME)
}

impl Settings {
    /// Loads settings; a missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, StorageError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves settings as pretty JSON, creating parent directories when needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(|e| StorageError::io(path, e))
    }
}
