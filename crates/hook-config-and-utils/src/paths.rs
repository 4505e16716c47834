//! File system paths for the hook.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Directory name for per-session pending records under the base dir.
const SESSIONS_DIR_NAME: &str = "sessions";
/// Credentials file name under the base dir.
const ENV_FILE_NAME: &str = ".env";

/// Manages file system paths for the hook.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for monitor files (~/.claude/monitor)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.claude/monitor`.
    ///
    /// This is the directory the monitor dashboard watches, so the pending
    /// records written here are visible to it.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".claude").join("monitor"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.claude/monitor).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the pending-record directory (~/.claude/monitor/sessions).
    pub fn sessions_dir(&self) -> PathBuf {
        self.base_dir.join(SESSIONS_DIR_NAME)
    }

    /// Get the credentials file path (~/.claude/monitor/.env).
    pub fn env_file(&self) -> PathBuf {
        self.base_dir.join(ENV_FILE_NAME)
    }

    /// Ensure the directories the hook writes into exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(self.sessions_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_with_base_dir() {
        let base = PathBuf::from("/tmp/test-monitor");
        let paths = Paths::with_base_dir(base.clone());

        assert_eq!(paths.base_dir(), &base);
        assert_eq!(paths.sessions_dir(), base.join("sessions"));
        assert_eq!(paths.env_file(), base.join(".env"));
    }

    #[test]
    fn paths_default_under_home() {
        let paths = Paths::new().unwrap();
        let home = dirs::home_dir().unwrap();

        assert_eq!(paths.base_dir(), &home.join(".claude").join("monitor"));
    }

    #[test]
    fn ensure_dirs_creates_sessions_dir() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("monitor"));

        assert!(!paths.sessions_dir().exists());
        paths.ensure_dirs().unwrap();
        assert!(paths.sessions_dir().is_dir());
    }

    #[test]
    fn ensure_dirs_idempotent() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.sessions_dir().exists());
    }
}
