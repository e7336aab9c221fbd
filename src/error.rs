use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures reading or writing the files kept between sessions.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} does not hold a score: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
    #[error("{} is not valid settings JSON: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
