// Integration tests for note delivery
//
// These tests verify the deliver-time validation gate (no external call on
// bad input), the payload contract, and success/failure mapping.

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;
use voxnote::{
    DeliveryRequest, DeliveryService, FileExportSink, NoteError, NoteSession, RecognitionConfig,
    ScriptedBackend, SessionConfig,
};

/// Recording mock: counts calls, captures the last payload, optionally fails.
struct RecordingDelivery {
    calls: AtomicUsize,
    last_request: Mutex<Option<DeliveryRequest>>,
    fail_with: Option<String>,
}

impl RecordingDelivery {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            fail_with: None,
        })
    }

    fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            fail_with: Some(reason.to_string()),
        })
    }
}

#[async_trait::async_trait]
impl DeliveryService for RecordingDelivery {
    async fn send(&self, request: &DeliveryRequest) -> voxnote::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().await = Some(request.clone());

        match &self.fail_with {
            Some(reason) => Err(NoteError::DeliveryFailed {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn session_with(delivery: Arc<RecordingDelivery>, export_dir: &TempDir) -> NoteSession {
    let backend = ScriptedBackend::new(Vec::new(), RecognitionConfig::default());

    NoteSession::new(
        SessionConfig::default(),
        Box::new(backend),
        delivery,
        Arc::new(FileExportSink::new(export_dir.path(), "voice-note.txt")),
    )
}

#[tokio::test]
async fn test_deliver_fails_without_sender_name() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let delivery = RecordingDelivery::succeeding();
    let session = session_with(Arc::clone(&delivery), &temp_dir);

    session.apply_increment("hello world ").await;

    let result = session.deliver("", "a@b.com").await;
    assert!(matches!(
        result,
        Err(NoteError::Validation { field: "from_name" })
    ));
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);

    session.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_deliver_fails_without_recipient() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let delivery = RecordingDelivery::succeeding();
    let session = session_with(Arc::clone(&delivery), &temp_dir);

    session.apply_increment("hello world ").await;

    let result = session.deliver("Name", "").await;
    assert!(matches!(
        result,
        Err(NoteError::Validation { field: "to_email" })
    ));
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);

    session.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_deliver_fails_with_empty_transcript() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let delivery = RecordingDelivery::succeeding();
    let session = session_with(Arc::clone(&delivery), &temp_dir);

    let result = session.deliver("Name", "a@b.com").await;
    assert!(matches!(
        result,
        Err(NoteError::Validation {
            field: "transcript"
        })
    ));
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);

    session.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_deliver_submits_verbatim_message() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let delivery = RecordingDelivery::succeeding();
    let session = session_with(Arc::clone(&delivery), &temp_dir);

    session.apply_increment("hello world ").await;

    session.deliver("Ann", "ann@example.com").await?;

    assert_eq!(delivery.calls.load(Ordering::SeqCst), 1);

    let request = delivery.last_request.lock().await.clone().unwrap();
    assert_eq!(request.from_name, "Ann");
    assert_eq!(request.to_email, "ann@example.com");
    assert_eq!(request.reply_to, "ann@example.com");
    assert_eq!(request.message, "hello world ");
    assert!(!request.time.is_empty());

    session.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_deliver_surfaces_capability_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let delivery = RecordingDelivery::failing("smtp relay down");
    let session = session_with(Arc::clone(&delivery), &temp_dir);

    session.apply_increment("hello world ").await;

    let result = session.deliver("Ann", "ann@example.com").await;
    match result {
        Err(NoteError::DeliveryFailed { reason }) => assert_eq!(reason, "smtp relay down"),
        other => panic!("expected DeliveryFailed, got {other:?}"),
    }

    // Exactly one attempt, no automatic retry
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 1);

    session.close().await?;
    Ok(())
}

#[test]
fn test_delivery_request_payload_fields() {
    let request = DeliveryRequest::new("Ann", "ann@example.com", "hello world ");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["from_name"], "Ann");
    assert_eq!(json["reply_to"], "ann@example.com");
    assert_eq!(json["to_email"], "ann@example.com");
    assert_eq!(json["message"], "hello world ");
    assert!(json["time"].is_string());
}

#[test]
fn test_delivery_request_roundtrip() {
    let request = DeliveryRequest::new("Bo", "bo@example.com", "note body");

    let json = serde_json::to_string(&request).unwrap();
    let deserialized: DeliveryRequest = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.from_name, "Bo");
    assert_eq!(deserialized.reply_to, deserialized.to_email);
    assert_eq!(deserialized.message, "note body");
}
