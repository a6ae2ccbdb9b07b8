//! Local match storage: one text file per finished match.

use std::fs;
use std::path::PathBuf;

use crate::error::{RecordError, RecordResult};
use crate::summary::MatchSummary;

/// A summary that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMatch {
    pub path: PathBuf,
    pub file_name: String,
    pub content: String,
}

/// Directory that finished matches are written into.
#[derive(Debug, Clone)]
pub struct MatchStore {
    dir: PathBuf,
}

impl MatchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `summary` to `<dir>/<file_name>`, creating the directory if needed.
    ///
    /// A second match finished in the same minute overwrites the first.
    pub fn save(&self, summary: &MatchSummary) -> RecordResult<SavedMatch> {
        fs::create_dir_all(&self.dir).map_err(|source| RecordError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let file_name = summary.file_name();
        let path = self.dir.join(&file_name);
        let content = summary.render();
        fs::write(&path, &content).map_err(|source| RecordError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), ends = summary.rows.len(), "match summary saved");
        Ok(SavedMatch {
            path,
            file_name,
            content,
        })
    }
}
