//! Pending permission records for the monitor dashboard.
//!
//! One file per session under the sessions directory, written atomically
//! (temp file + rename) so the dashboard never reads a partial record.
//! Records are advisory: the decision race is authoritative, so callers
//! treat store failures as non-fatal.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;
use tracing::debug;

/// File extension for pending records.
const RECORD_EXTENSION: &str = "permission";

/// Errors from the pending-record store.
#[derive(thiserror::Error, Debug)]
pub enum PendingStoreError {
    #[error("session id is empty or contains a path separator")]
    InvalidSessionId,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias using PendingStoreError.
pub type PendingStoreResult<T> = Result<T, PendingStoreError>;

/// A session awaiting a decision, as shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRecord {
    /// Correlation key; encoded in the file name, not the file body.
    #[serde(skip)]
    pub session_id: String,
    pub tool_name: String,
    pub display: String,
    /// Stringified raw tool parameters.
    pub tool_input: String,
    /// Hook event name at registration time.
    pub timestamp: String,
}

/// File-backed store of pending permission records.
#[derive(Debug, Clone)]
pub struct PendingStore {
    sessions_dir: PathBuf,
}

impl PendingStore {
    /// Create a store rooted at the given sessions directory.
    pub fn new(sessions_dir: PathBuf) -> Self {
        Self { sessions_dir }
    }

    /// Path of the record file for a session.
    pub fn record_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir
            .join(format!("{session_id}.{RECORD_EXTENSION}"))
    }

    /// Write the record for a session, creating the directory on demand.
    pub fn register(&self, record: &PendingRecord) -> PendingStoreResult<()> {
        validate_session_id(&record.session_id)?;

        fs::create_dir_all(&self.sessions_dir)?;
        let path = self.record_path(&record.session_id);
        let content = serde_json::to_string(record)?;
        atomic_write(&path, &content)?;

        debug!(session_id = %record.session_id, "registered pending record");
        Ok(())
    }

    /// Delete the record for a session. Absence is not an error.
    pub fn remove(&self, session_id: &str) -> PendingStoreResult<()> {
        validate_session_id(session_id)?;

        match fs::remove_file(self.record_path(session_id)) {
            Ok(()) => {
                debug!(session_id = %session_id, "removed pending record");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_session_id(session_id: &str) -> PendingStoreResult<()> {
    if session_id.is_empty() || session_id.contains(['/', '\\']) {
        return Err(PendingStoreError::InvalidSessionId);
    }
    Ok(())
}

fn atomic_write(path: &std::path::Path, content: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "record path has no parent"))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "record path has no name"))?;

    let tmp_name = format!(
        ".{}.monitor.tmp.{}",
        file_name,
        std::time::SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    let tmp_path = dir.join(tmp_name);

    let write_result = (|| -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}
