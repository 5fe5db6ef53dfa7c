//! HTTP API server for external control (front-end, shortcuts)
//!
//! This module provides a REST API over the active note session:
//! - POST /note/listen/start | /note/listen/stop - Listening control
//! - GET  /note/transcript - Read the accumulated transcript
//! - PUT  /note/transcript - Replace it with a direct edit
//! - POST /note/clear - Reset transcript and delivery identity
//! - POST /note/export - Save the note as a plain-text file
//! - POST /note/deliver - Email the note
//! - GET  /note/stats - Session statistics
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
