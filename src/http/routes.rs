use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Listening control
        .route("/note/listen/start", post(handlers::start_listening))
        .route("/note/listen/stop", post(handlers::stop_listening))
        // Transcript buffer
        .route(
            "/note/transcript",
            get(handlers::get_transcript).put(handlers::edit_transcript),
        )
        .route("/note/clear", post(handlers::clear_note))
        // Sinks
        .route("/note/export", post(handlers::export_note))
        .route("/note/deliver", post(handlers::deliver_note))
        // Session statistics
        .route("/note/stats", get(handlers::get_stats))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
