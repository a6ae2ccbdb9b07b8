//! Runtime configuration, read from the environment.

use std::path::PathBuf;

use crate::types::LONG_PRESS_MS;

/// Longest accepted hold threshold.
pub const MAX_LONG_PRESS_MS: u32 = 5_000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory finished match summaries are written to.
    pub match_dir: PathBuf,
    /// Companion drop directory; sync is off when unset.
    pub sync_dir: Option<PathBuf>,
    /// Remove the local summary after a successful sync.
    pub sync_delete: bool,
    /// Log file; `None` disables logging.
    pub log_path: Option<PathBuf>,
    pub long_press_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            match_dir: PathBuf::from("matches"),
            sync_dir: None,
            sync_delete: false,
            log_path: Some(PathBuf::from("bowls-scorer.log")),
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let match_dir = lookup("BOWLS_MATCH_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.match_dir);

        let sync_dir = lookup("BOWLS_SYNC_DIR")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let sync_delete = lookup("BOWLS_SYNC_DELETE")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        // Unset means the default file; set but empty turns logging off.
        let log_path = match lookup("BOWLS_LOG_PATH") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
            None => defaults.log_path,
        };

        let long_press_ms = lookup("BOWLS_LONG_PRESS_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .map(|ms| ms.min(MAX_LONG_PRESS_MS))
            .unwrap_or(defaults.long_press_ms);

        Self {
            match_dir,
            sync_dir,
            sync_delete,
            log_path,
            long_press_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(from_pairs(&[]), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = from_pairs(&[
            ("BOWLS_MATCH_DIR", "/tmp/bowls"),
            ("BOWLS_SYNC_DIR", " /mnt/phone "),
            ("BOWLS_SYNC_DELETE", "TRUE"),
            ("BOWLS_LONG_PRESS_MS", "450"),
        ]);
        assert_eq!(cfg.match_dir, PathBuf::from("/tmp/bowls"));
        assert_eq!(cfg.sync_dir, Some(PathBuf::from("/mnt/phone")));
        assert!(cfg.sync_delete);
        assert_eq!(cfg.long_press_ms, 450);
    }

    #[test]
    fn test_empty_log_path_disables_logging() {
        let cfg = from_pairs(&[("BOWLS_LOG_PATH", "")]);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = from_pairs(&[
            ("BOWLS_LONG_PRESS_MS", "soon"),
            ("BOWLS_SYNC_DIR", "  "),
            ("BOWLS_SYNC_DELETE", "maybe"),
        ]);
        assert_eq!(cfg.long_press_ms, LONG_PRESS_MS);
        assert_eq!(cfg.sync_dir, None);
        assert!(!cfg.sync_delete);
    }

    #[test]
    fn test_long_press_is_clamped() {
        let cfg = from_pairs(&[("BOWLS_LONG_PRESS_MS", "4294967295")]);
        assert_eq!(cfg.long_press_ms, MAX_LONG_PRESS_MS);
        // The app derives its release timeout from this value.
        let _ = crate::app::App::new(&cfg);
    }
}
