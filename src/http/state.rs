use crate::session::NoteSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The active note session
    pub session: Arc<NoteSession>,
}

impl AppState {
    pub fn new(session: Arc<NoteSession>) -> Self {
        Self { session }
    }
}
