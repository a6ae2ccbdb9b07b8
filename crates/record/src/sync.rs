//! Best-effort companion-device sync.
//!
//! A saved summary is handed to a [`CompanionLink`] on a detached worker
//! thread. There is exactly one attempt and no acknowledgment; the outcome is
//! only logged. Match state is never affected.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};
use crate::store::SavedMatch;

/// Data item sent to the companion, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub file_name: String,
    pub file_content: String,
}

/// Transport to a companion device.
pub trait CompanionLink: Send + Sync {
    fn send(&self, payload: &SyncPayload) -> RecordResult<()>;
}

/// Companion link that drops JSON payloads into a shared directory
/// (a mounted or synced folder the companion picks up).
#[derive(Debug, Clone)]
pub struct DirectoryLink {
    dir: PathBuf,
}

impl DirectoryLink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn payload_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!("{file_name}.json"))
    }
}

impl CompanionLink for DirectoryLink {
    fn send(&self, payload: &SyncPayload) -> RecordResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| RecordError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(payload).map_err(|source| RecordError::Encode {
            file_name: payload.file_name.clone(),
            source,
        })?;
        let path = self.payload_path(&payload.file_name);
        fs::write(&path, json).map_err(|source| RecordError::Write { path, source })
    }
}

/// Send `saved` to the companion on a background thread.
///
/// Returns the worker handle; callers may drop it (fire-and-forget). The
/// thread yields `true` on a successful send.
pub fn spawn_sync(
    link: Arc<dyn CompanionLink>,
    saved: SavedMatch,
    delete_on_success: bool,
) -> JoinHandle<bool> {
    thread::spawn(move || {
        let payload = SyncPayload {
            file_name: saved.file_name,
            file_content: saved.content,
        };
        tracing::debug!(file = %payload.file_name, "sending match to companion");

        if let Err(err) = link.send(&payload) {
            tracing::error!(file = %payload.file_name, error = %err, "companion sync failed");
            return false;
        }
        tracing::info!(file = %payload.file_name, "companion sync succeeded");

        if delete_on_success {
            if let Err(source) = fs::remove_file(&saved.path) {
                let err = RecordError::Remove {
                    path: saved.path.clone(),
                    source,
                };
                tracing::warn!(error = %err, "could not remove synced summary");
            }
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct FailingLink;

    impl CompanionLink for FailingLink {
        fn send(&self, payload: &SyncPayload) -> RecordResult<()> {
            Err(RecordError::Write {
                path: PathBuf::from(&payload.file_name),
                source: std::io::Error::new(std::io::ErrorKind::Other, "offline"),
            })
        }
    }

    fn saved_in(dir: &Path) -> SavedMatch {
        let path = dir.join("B1200-01-01-2026.txt");
        fs::write(&path, "Bowls Scorer - Singles\n").unwrap();
        SavedMatch {
            path,
            file_name: "B1200-01-01-2026.txt".to_string(),
            content: "Bowls Scorer - Singles\n".to_string(),
        }
    }

    #[test]
    fn directory_link_writes_json_and_deletes_local_file() {
        let local = tempfile::tempdir().unwrap();
        let remote = tempfile::tempdir().unwrap();
        let link = DirectoryLink::new(remote.path());
        let saved = saved_in(local.path());
        let local_path = saved.path.clone();

        assert!(spawn_sync(Arc::new(link.clone()), saved, true).join().unwrap());

        let json = fs::read_to_string(link.payload_path("B1200-01-01-2026.txt")).unwrap();
        let payload: SyncPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.file_name, "B1200-01-01-2026.txt");
        assert_eq!(payload.file_content, "Bowls Scorer - Singles\n");
        assert!(!local_path.exists());
    }

    #[test]
    fn failed_send_keeps_local_file() {
        let local = tempfile::tempdir().unwrap();
        let saved = saved_in(local.path());
        let local_path = saved.path.clone();

        assert!(!spawn_sync(Arc::new(FailingLink), saved, true).join().unwrap());
        assert!(local_path.exists());
    }
}
