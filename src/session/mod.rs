//! Note session management
//!
//! This module provides the `NoteSession` controller that owns:
//! - The transcript buffer and its three mutation channels (recognition
//!   increments, direct edits, clear)
//! - The recognition adapter lifecycle (start/stop/teardown)
//! - The export and delivery operations over the buffer
//! - Session state and statistics

mod config;
mod session;
mod state;

pub use config::SessionConfig;
pub use session::NoteSession;
pub use state::{DeliveryIdentity, SessionState, SessionStats};
