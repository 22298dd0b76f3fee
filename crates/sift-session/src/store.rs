//! SessionStore — concurrency-safe session table with a JSON snapshot mirror.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};
use uuid::Uuid;

use sift_core::errors::SessionError;
use sift_core::session::{Role, Turn};

use crate::session::{Session, SessionSummary};

type SessionTable = HashMap<String, Session>;

/// Durable key/value store of sessions. The write lock is held across every
/// "mutate in-memory, then persist" sequence; persistence failures are
/// logged and the in-memory table stays authoritative.
pub struct SessionStore {
    sessions: RwLock<SessionTable>,
    path: PathBuf,
}

impl SessionStore {
    /// Open a store backed by the given snapshot file. A missing snapshot
    /// starts the store empty; an unreadable or corrupt one does too, with a
    /// warning — never a failure.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = match load_snapshot(&path) {
            Ok(table) => {
                debug!(sessions = table.len(), path = %path.display(), "session snapshot loaded");
                table
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "unreadable session snapshot, starting empty");
                SessionTable::new()
            }
        };
        Self {
            sessions: RwLock::new(sessions),
            path,
        }
    }

    /// Create a session with the given display name (auto-generated when
    /// blank) and return its fresh id.
    pub fn create(&self, name: &str) -> String {
        let session_id = Uuid::new_v4().to_string();
        let display = if name.trim().is_empty() {
            Session::default_name(&session_id)
        } else {
            name.trim().to_string()
        };
        let mut table = self.write_table();
        table.insert(
            session_id.clone(),
            Session::new(session_id.clone(), display),
        );
        self.persist(&table);
        session_id
    }

    /// Append a turn, provisioning the session lazily when the id is unknown.
    pub fn append_turn(&self, session_id: &str, role: Role, content: impl Into<String>) {
        let mut table = self.write_table();
        let session = table.entry(session_id.to_string()).or_insert_with(|| {
            Session::new(session_id.to_string(), Session::default_name(session_id))
        });
        session.push_turn(role, content.into());
        self.persist(&table);
    }

    /// Current turns for a session. Never errors: unknown ids yield an empty
    /// history and provision nothing.
    pub fn history(&self, session_id: &str) -> Vec<Turn> {
        self.read_table()
            .get(session_id)
            .map(|s| s.turns.clone())
            .unwrap_or_default()
    }

    /// Session summaries, most recently updated first.
    pub fn list(&self) -> Vec<SessionSummary> {
        let table = self.read_table();
        let mut rows: Vec<SessionSummary> = table.values().map(Session::summary).collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        rows
    }

    /// Full session record, absent when unknown.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.read_table().get(session_id).cloned()
    }

    /// Remove a session entirely. True iff it existed.
    pub fn clear(&self, session_id: &str) -> bool {
        let mut table = self.write_table();
        let removed = table.remove(session_id).is_some();
        self.persist(&table);
        removed
    }

    pub fn session_count(&self) -> usize {
        self.read_table().len()
    }

    fn persist(&self, table: &SessionTable) {
        if let Err(err) = write_snapshot(&self.path, table) {
            warn!(error = %err, path = %self.path.display(), "session snapshot write failed");
        }
    }

    fn read_table(&self) -> RwLockReadGuard<'_, SessionTable> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, SessionTable> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn load_snapshot(path: &Path) -> Result<SessionTable, SessionError> {
    if !path.exists() {
        return Ok(SessionTable::new());
    }
    let bytes = fs::read(path).map_err(|source| SessionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_snapshot(path: &Path, table: &SessionTable) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    let bytes = serde_json::to_vec_pretty(table)?;
    fs::write(path, bytes).map_err(|source| SessionError::Io {
        path: path.display().to_string(),
        source,
    })
}
