use chrono::Local;
use serde::{Deserialize, Serialize};

/// Flat key-value payload handed to the delivery capability.
///
/// Ephemeral: assembled at send time, never persisted. The recipient address
/// doubles as the reply-to so answers go back to the person the note was sent
/// to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub from_name: String,
    pub reply_to: String,
    pub message: String,
    pub to_email: String,
    /// Local wall-clock timestamp of the delivery attempt
    pub time: String,
}

impl DeliveryRequest {
    pub fn new(from_name: &str, to_email: &str, message: &str) -> Self {
        Self {
            from_name: from_name.to_string(),
            reply_to: to_email.to_string(),
            message: message.to_string(),
            to_email: to_email.to_string(),
            time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
