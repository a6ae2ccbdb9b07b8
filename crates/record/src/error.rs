//! Error types for saving and syncing match summaries.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias returning [`RecordError`] failures.
pub type RecordResult<T> = Result<T, RecordError>;

/// Failures that can occur while persisting or transmitting a match.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The match or sync directory could not be created.
    #[error("failed to create directory `{}`", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a summary or payload file failed.
    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The companion payload could not be encoded.
    #[error("failed to encode companion payload for `{file_name}`")]
    Encode {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },
    /// Removing the local summary after a successful sync failed.
    #[error("failed to remove `{}`", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
