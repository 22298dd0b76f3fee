//! Session entity: named, timestamped, windowed turn history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sift_core::session::{Role, Turn};

/// Maximum retained turns per session; the oldest are evicted first.
pub const MAX_TURNS: usize = 30;

/// One conversation. Owned exclusively by the store; callers receive clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

impl Session {
    pub fn new(session_id: String, name: String) -> Self {
        Self {
            session_id,
            name,
            updated_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    /// Auto-generated display name from the id prefix.
    pub fn default_name(session_id: &str) -> String {
        let prefix: String = session_id.chars().take(8).collect();
        format!("会话-{prefix}")
    }

    /// Append a turn, evict beyond the window, refresh the timestamp.
    pub fn push_turn(&mut self, role: Role, content: String) {
        self.turns.push(Turn::new(role, content));
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(..excess);
        }
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            name: self.name.clone(),
            turn_count: self.turns.len(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing row for session enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub name: String,
    pub turn_count: usize,
    pub updated_at: DateTime<Utc>,
}
