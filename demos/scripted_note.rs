// Scripted Note Example: end-to-end voice-note session without a microphone
//
// This example demonstrates the complete pipeline:
// 1. A scripted recognition backend plays back interim + final result batches
// 2. The adapter keeps only finalized text and streams increments
// 3. The session controller appends them to the transcript buffer
// 4. The note is exported to voice-note.txt and (mock-)delivered
//
// Usage: cargo run --example scripted_note

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;
use voxnote::{
    DeliveryRequest, DeliveryService, FileExportSink, NoteSession, RecognitionConfig,
    ResultBatch, ScriptedBackend, SessionConfig,
};

/// Delivery stand-in that prints the payload instead of calling EmailJS.
struct ConsoleDelivery;

#[async_trait::async_trait]
impl DeliveryService for ConsoleDelivery {
    async fn send(&self, request: &DeliveryRequest) -> voxnote::Result<()> {
        info!(
            "Would deliver to {} from {}: {:?}",
            request.to_email, request.from_name, request.message
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // A short dictation: interim batches are revised and must be dropped,
    // only finalized entries reach the note
    let batches = vec![
        ResultBatch::interim("remember the"),
        ResultBatch::interim("remember the milk"),
        ResultBatch::finalized("remember the milk"),
        ResultBatch::interim("and call"),
        ResultBatch::finalized("and call the plumber"),
    ];

    let backend = ScriptedBackend::new(batches, RecognitionConfig::default())
        .with_pacing(Duration::from_millis(50));

    let session = Arc::new(NoteSession::new(
        SessionConfig::default(),
        Box::new(backend),
        Arc::new(ConsoleDelivery),
        Arc::new(FileExportSink::new(".", "voice-note.txt")),
    ));

    session.start_listening().await?;

    // Let the script play out
    sleep(Duration::from_millis(500)).await;

    session.stop_listening().await?;

    let transcript = session.transcript().await;
    info!("Transcript: {:?}", transcript);

    let path = session.export().await?;
    info!("Exported to {}", path.display());

    session.deliver("Demo User", "demo@example.com").await?;

    let stats = session.stats().await;
    info!(
        "Session stats: {} increments, {} chars",
        stats.increments_applied, stats.transcript_chars
    );

    session.close().await?;

    Ok(())
}
