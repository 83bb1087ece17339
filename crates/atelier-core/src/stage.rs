//! Session code stage.
//!
//! A keyed holding area for the single most recent code artifact of each
//! session. Code lives here, outside conversational memory, so that prompts
//! never have to carry stale copies of it.
//!
//! Writes are last-write-wins with no versioning: if a client issues
//! overlapping updates for one session, the later write survives. Stage
//! operations are single reads or writes, never read-modify-write, so no
//! per-session lock is taken.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Injected, session-keyed store for the current code artifact.
#[derive(Debug, Default)]
pub struct CodeStage {
    entries: RwLock<HashMap<String, String>>,
}

impl CodeStage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Stores or overwrites the current code for a session.
    pub async fn update(&self, session_id: &str, code: impl Into<String>) {
        let mut entries = self.entries.write().await;
        entries.insert(session_id.to_string(), code.into());
        tracing::debug!(session_id, "code stage updated");
    }

    /// Returns the staged code for a session, if any.
    pub async fn get(&self, session_id: &str) -> Option<String> {
        self.entries.read().await.get(session_id).cloned()
    }

    /// Removes a session's staged code, e.g. on session teardown.
    pub async fn clear(&self, session_id: &str) {
        let mut entries = self.entries.write().await;
        if entries.remove(session_id).is_some() {
            tracing::debug!(session_id, "code stage cleared");
        }
    }
}
