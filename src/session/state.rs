use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the recognition capability is actively capturing.
///
/// Listening is entered only by an explicit start and left by an explicit
/// stop, an adapter error that ends the engine session, or teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Listening,
}

/// Pending delivery-identity fields, edited alongside the note and reset by
/// clear().
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryIdentity {
    pub from_name: String,
    pub to_email: String,
}

/// Statistics about a note session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether the session is currently listening
    pub state: SessionState,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Total session age in seconds
    pub duration_secs: f64,

    /// Number of recognition increments applied to the buffer
    pub increments_applied: usize,

    /// Current transcript length in characters
    pub transcript_chars: usize,
}
