use serde::{Deserialize, Serialize};

/// Configuration for a note session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g. "note-2026-08-29-standup")
    pub session_id: String,

    /// Recognition locale
    pub locale: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("note-{}", uuid::Uuid::new_v4()),
            locale: "en-US".to_string(),
        }
    }
}
