// Unit tests for the recognition adapter layer
//
// These tests verify final-vs-interim filtering, increment ordering,
// lifecycle idempotency, and the capability probe.

use anyhow::Result;
use std::time::Duration;
use tokio::time::timeout;
use voxnote::{
    finalized_text, NoteError, RecognitionAdapter, RecognitionBackendFactory, RecognitionConfig,
    RecognitionResult, RecognitionSource, ResultBatch, ScriptedBackend,
};

fn batch(entries: &[(&str, bool)]) -> ResultBatch {
    ResultBatch {
        results: entries
            .iter()
            .map(|(text, is_final)| RecognitionResult {
                text: text.to_string(),
                is_final: *is_final,
            })
            .collect(),
    }
}

#[test]
fn test_finalized_text_keeps_only_final_entries() {
    let b = batch(&[("hello", true), ("wor", false), ("world", true)]);

    assert_eq!(finalized_text(&b), Some("hello world ".to_string()));
}

#[test]
fn test_finalized_text_discards_all_interim_batch() {
    let b = batch(&[("partial gue", false), ("partial guess", false)]);

    assert_eq!(finalized_text(&b), None);
}

#[test]
fn test_finalized_text_empty_batch() {
    assert_eq!(finalized_text(&ResultBatch::default()), None);
}

#[test]
fn test_finalized_text_appends_trailing_separator() {
    let b = batch(&[("one utterance", true)]);

    assert_eq!(finalized_text(&b), Some("one utterance ".to_string()));
}

#[test]
fn test_factory_native_source_is_capability_unavailable() {
    let result =
        RecognitionBackendFactory::create(RecognitionSource::Native, RecognitionConfig::default());

    match result {
        Err(NoteError::CapabilityUnavailable { .. }) => {}
        Err(other) => panic!("expected CapabilityUnavailable, got {other}"),
        Ok(_) => panic!("native source should not yield a backend in this build"),
    }
}

#[test]
fn test_factory_parse_source() {
    assert!(matches!(
        RecognitionBackendFactory::parse_source("native"),
        Ok(RecognitionSource::Native)
    ));

    match RecognitionBackendFactory::parse_source("file:notes.txt") {
        Ok(RecognitionSource::File(path)) => assert_eq!(path, "notes.txt"),
        other => panic!("expected file source, got {other:?}"),
    }

    assert!(RecognitionBackendFactory::parse_source("carrier-pigeon").is_err());
}

#[tokio::test]
async fn test_adapter_streams_increments_in_order() -> Result<()> {
    let batches = vec![
        ResultBatch::interim("first utt"),
        ResultBatch::finalized("first utterance"),
        ResultBatch::finalized("second utterance"),
        ResultBatch::interim("trailing interim"),
    ];

    let backend =
        ScriptedBackend::new(batches, RecognitionConfig::default()).with_pacing(Duration::from_millis(1));
    let mut adapter = RecognitionAdapter::new(Box::new(backend));

    let mut increments = adapter.increments().unwrap();
    adapter.start().await?;

    let first = timeout(Duration::from_secs(2), increments.recv()).await?;
    let second = timeout(Duration::from_secs(2), increments.recv()).await?;

    assert_eq!(first.as_deref(), Some("first utterance "));
    assert_eq!(second.as_deref(), Some("second utterance "));

    // Teardown closes the increment stream
    adapter.teardown().await?;
    let end = timeout(Duration::from_secs(2), increments.recv()).await?;
    assert!(end.is_none());

    Ok(())
}

#[tokio::test]
async fn test_adapter_start_is_idempotent() -> Result<()> {
    let batches = vec![ResultBatch::finalized("only once")];

    let backend =
        ScriptedBackend::new(batches, RecognitionConfig::default()).with_pacing(Duration::from_millis(20));
    let mut adapter = RecognitionAdapter::new(Box::new(backend));

    let mut increments = adapter.increments().unwrap();

    adapter.start().await?;
    // Second start while listening is a no-op, not a second playback
    adapter.start().await?;

    let first = timeout(Duration::from_secs(2), increments.recv()).await?;
    assert_eq!(first.as_deref(), Some("only once "));

    adapter.teardown().await?;
    let end = timeout(Duration::from_secs(2), increments.recv()).await?;
    assert!(end.is_none(), "increment was duplicated by a second start");

    Ok(())
}

#[tokio::test]
async fn test_adapter_stop_from_idle_is_noop() -> Result<()> {
    let backend = ScriptedBackend::new(Vec::new(), RecognitionConfig::default());
    let mut adapter = RecognitionAdapter::new(Box::new(backend));

    adapter.stop().await?;
    assert!(!adapter.is_listening());

    Ok(())
}

#[tokio::test]
async fn test_adapter_teardown_is_single_shot() -> Result<()> {
    let backend = ScriptedBackend::new(Vec::new(), RecognitionConfig::default());
    let mut adapter = RecognitionAdapter::new(Box::new(backend));

    adapter.teardown().await?;
    adapter.teardown().await?;

    // Starting after teardown is an error, not a silent restart
    assert!(adapter.start().await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_adapter_forwards_errors_without_stopping() -> Result<()> {
    use voxnote::{RecognitionBackend, RecognitionEvent};

    // Backend that reports an engine error between two finalized batches
    struct FlakyBackend {
        listening: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl RecognitionBackend for FlakyBackend {
        async fn start(&mut self) -> voxnote::Result<tokio::sync::mpsc::Receiver<RecognitionEvent>> {
            self.listening
                .store(true, std::sync::atomic::Ordering::SeqCst);
            let (tx, rx) = tokio::sync::mpsc::channel(8);
            tokio::spawn(async move {
                let _ = tx
                    .send(RecognitionEvent::Batch(ResultBatch::finalized("before")))
                    .await;
                let _ = tx
                    .send(RecognitionEvent::Error("no-speech".to_string()))
                    .await;
                let _ = tx
                    .send(RecognitionEvent::Batch(ResultBatch::finalized("after")))
                    .await;
            });
            Ok(rx)
        }

        async fn stop(&mut self) -> voxnote::Result<()> {
            self.listening
                .store(false, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        fn is_listening(&self) -> bool {
            self.listening.load(std::sync::atomic::Ordering::SeqCst)
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    let backend = FlakyBackend {
        listening: std::sync::atomic::AtomicBool::new(false),
    };
    let mut adapter = RecognitionAdapter::new(Box::new(backend));

    let mut increments = adapter.increments().unwrap();
    let mut errors = adapter.errors().unwrap();
    adapter.start().await?;

    let first = timeout(Duration::from_secs(2), increments.recv()).await?;
    assert_eq!(first.as_deref(), Some("before "));

    let err = timeout(Duration::from_secs(2), errors.recv()).await?;
    assert_eq!(err.as_deref(), Some("no-speech"));

    // Recognition continues past the error, no auto-stop
    let second = timeout(Duration::from_secs(2), increments.recv()).await?;
    assert_eq!(second.as_deref(), Some("after "));

    adapter.teardown().await?;

    Ok(())
}

#[tokio::test]
async fn test_scripted_backend_stop_ends_playback() -> Result<()> {
    let batches: Vec<ResultBatch> = (0..100)
        .map(|i| ResultBatch::finalized(&format!("line {i}")))
        .collect();

    let mut backend = ScriptedBackend::new(batches, RecognitionConfig::default())
        .with_pacing(Duration::from_millis(5));

    use voxnote::RecognitionBackend;
    let mut events = backend.start().await?;
    assert!(backend.is_listening());

    // Consume one event, then stop mid-playback
    let first = timeout(Duration::from_secs(2), events.recv()).await?;
    assert!(first.is_some());

    backend.stop().await?;

    // The channel closes without draining all 100 batches
    let mut received = 1;
    while let Ok(Some(_)) = timeout(Duration::from_secs(2), events.recv()).await {
        received += 1;
    }
    assert!(received < 100, "stop did not end playback early");
    assert!(!backend.is_listening());

    Ok(())
}
