use super::state::AppState;
use crate::error::NoteError;
use crate::session::{SessionState, SessionStats};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListenResponse {
    pub session_id: String,
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
    pub state: SessionState,
}

#[derive(Debug, Deserialize)]
pub struct EditTranscriptRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct DeliverRequest {
    pub from_name: String,
    pub to_email: String,
}

#[derive(Debug, Serialize)]
pub struct DeliverResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a session error to the HTTP status it should surface as.
fn error_status(e: &NoteError) -> StatusCode {
    match e {
        NoteError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        NoteError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
        NoteError::CapabilityUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// POST /note/listen/start
pub async fn start_listening(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.start_listening().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ListenResponse {
                session_id: state.session.session_id().to_string(),
                state: state.session.state(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to start listening: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /note/listen/stop
pub async fn stop_listening(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.stop_listening().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ListenResponse {
                session_id: state.session.session_id().to_string(),
                state: state.session.state(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to stop listening: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /note/transcript
pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let transcript = state.session.transcript().await;

    (
        StatusCode::OK,
        Json(TranscriptResponse {
            transcript,
            state: state.session.state(),
        }),
    )
}

/// PUT /note/transcript
/// Direct user edit: replaces the buffer wholesale, no validation
pub async fn edit_transcript(
    State(state): State<AppState>,
    Json(req): Json<EditTranscriptRequest>,
) -> impl IntoResponse {
    state.session.edit_transcript(&req.text).await;

    (
        StatusCode::OK,
        Json(TranscriptResponse {
            transcript: req.text,
            state: state.session.state(),
        }),
    )
}

/// POST /note/clear
pub async fn clear_note(State(state): State<AppState>) -> impl IntoResponse {
    state.session.clear().await;

    (
        StatusCode::OK,
        Json(TranscriptResponse {
            transcript: String::new(),
            state: state.session.state(),
        }),
    )
}

/// POST /note/export
pub async fn export_note(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.export().await {
        Ok(path) => (
            StatusCode::OK,
            Json(ExportResponse {
                path: path.display().to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Export failed: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /note/deliver
pub async fn deliver_note(
    State(state): State<AppState>,
    Json(req): Json<DeliverRequest>,
) -> impl IntoResponse {
    info!("Delivering note to {}", req.to_email);

    match state.session.deliver(&req.from_name, &req.to_email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeliverResponse {
                status: "sent".to_string(),
                message: format!("Note delivered to {}", req.to_email),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Delivery failed: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /note/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<SessionStats> {
    Json(state.session.stats().await)
}
