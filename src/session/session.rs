use super::config::SessionConfig;
use super::state::{DeliveryIdentity, SessionState, SessionStats};
use crate::delivery::{DeliveryRequest, DeliveryService};
use crate::error::{NoteError, Result};
use crate::export::ExportSink;
use crate::recognition::{RecognitionAdapter, RecognitionBackend};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// A voice-note session: owns the transcript buffer and mediates the
/// user-facing operations (start, stop, edit, clear, export, deliver).
///
/// The buffer is append-only on the recognition path; direct edits and
/// clear() are the only replacement channels. When an edit or clear races an
/// in-flight increment, the last writer by buffer-lock acquisition order
/// wins; increments are never reordered and never replayed.
pub struct NoteSession {
    /// Session configuration
    config: SessionConfig,

    /// Recognition session adapter (lifecycle owned here)
    adapter: Arc<Mutex<RecognitionAdapter>>,

    /// External email delivery capability
    delivery: Arc<dyn DeliveryService>,

    /// Export destination for one-shot plain-text saves
    export_sink: Arc<dyn ExportSink>,

    /// The accumulated/edited note text
    transcript: Arc<Mutex<String>>,

    /// Pending sender/recipient fields
    identity: Arc<Mutex<DeliveryIdentity>>,

    /// Whether listening is active
    listening: Arc<AtomicBool>,

    /// Guard so teardown runs exactly once across all exit paths
    closed: AtomicBool,

    /// When the session was created
    started_at: chrono::DateTime<chrono::Utc>,

    /// Increments applied so far
    increments_applied: Arc<AtomicUsize>,

    /// Handle for the increment draining task
    increment_task_handle: Mutex<Option<JoinHandle<()>>>,

    /// Handle for the error draining task
    error_task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl NoteSession {
    /// Create a new note session around a recognition backend and the
    /// injected delivery/export capabilities.
    pub fn new(
        config: SessionConfig,
        backend: Box<dyn RecognitionBackend>,
        delivery: Arc<dyn DeliveryService>,
        export_sink: Arc<dyn ExportSink>,
    ) -> Self {
        info!("Creating note session: {}", config.session_id);

        let mut adapter = RecognitionAdapter::new(backend);

        let transcript = Arc::new(Mutex::new(String::new()));
        let increments_applied = Arc::new(AtomicUsize::new(0));

        // Drain increments for the whole session lifetime; the task ends when
        // teardown closes the stream. Increments are applied in receipt
        // order, no reordering, no deduplication.
        let increment_task = {
            let mut increments = adapter
                .increments()
                .unwrap_or_else(|| tokio::sync::mpsc::channel(1).1);
            let transcript = Arc::clone(&transcript);
            let increments_applied = Arc::clone(&increments_applied);

            tokio::spawn(async move {
                debug!("Increment draining task started");

                while let Some(text) = increments.recv().await {
                    let mut buffer = transcript.lock().await;
                    buffer.push_str(&text);
                    increments_applied.fetch_add(1, Ordering::SeqCst);
                    debug!("Applied increment ({} chars)", text.len());
                }

                debug!("Increment draining task stopped");
            })
        };

        // Recognition errors are surfaced to diagnostics only: logged, not
        // auto-recovered
        let error_task = {
            let mut errors = adapter
                .errors()
                .unwrap_or_else(|| tokio::sync::mpsc::channel(1).1);

            tokio::spawn(async move {
                while let Some(description) = errors.recv().await {
                    warn!("Recognition error reported: {}", description);
                }
            })
        };

        Self {
            config,
            adapter: Arc::new(Mutex::new(adapter)),
            delivery,
            export_sink,
            transcript,
            identity: Arc::new(Mutex::new(DeliveryIdentity::default())),
            listening: Arc::new(AtomicBool::new(false)),
            closed: AtomicBool::new(false),
            started_at: Utc::now(),
            increments_applied,
            increment_task_handle: Mutex::new(Some(increment_task)),
            error_task_handle: Mutex::new(Some(error_task)),
        }
    }

    /// Begin capturing speech. Idempotent when already listening.
    pub async fn start_listening(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(NoteError::Recognition {
                message: "session is closed".to_string(),
            });
        }

        if self.listening.load(Ordering::SeqCst) {
            warn!("Session already listening");
            return Ok(());
        }

        self.adapter.lock().await.start().await?;
        self.listening.store(true, Ordering::SeqCst);

        info!("Session {} listening", self.config.session_id);

        Ok(())
    }

    /// Stop capturing speech. Idempotent when already idle.
    pub async fn stop_listening(&self) -> Result<()> {
        if !self.listening.load(Ordering::SeqCst) {
            warn!("Session not listening");
            return Ok(());
        }

        self.adapter.lock().await.stop().await?;
        self.listening.store(false, Ordering::SeqCst);

        info!("Session {} idle", self.config.session_id);

        Ok(())
    }

    /// Append one finalized recognition increment to the buffer.
    pub async fn apply_increment(&self, text: &str) {
        let mut buffer = self.transcript.lock().await;
        buffer.push_str(text);
        self.increments_applied.fetch_add(1, Ordering::SeqCst);
    }

    /// Current buffer contents.
    pub async fn transcript(&self) -> String {
        self.transcript.lock().await.clone()
    }

    /// Replace the buffer wholesale with a direct user edit. No validation.
    pub async fn edit_transcript(&self, new_text: &str) {
        let mut buffer = self.transcript.lock().await;
        buffer.clear();
        buffer.push_str(new_text);
    }

    /// Reset the buffer and the pending sender/recipient fields. Allowed in
    /// any state.
    pub async fn clear(&self) {
        {
            let mut buffer = self.transcript.lock().await;
            buffer.clear();
        }
        {
            let mut identity = self.identity.lock().await;
            *identity = DeliveryIdentity::default();
        }

        info!("Session {} cleared", self.config.session_id);
    }

    /// Set the pending sender/recipient fields.
    pub async fn set_identity(&self, from_name: &str, to_email: &str) {
        let mut identity = self.identity.lock().await;
        identity.from_name = from_name.to_string();
        identity.to_email = to_email.to_string();
    }

    /// Current pending sender/recipient fields.
    pub async fn identity(&self) -> DeliveryIdentity {
        self.identity.lock().await.clone()
    }

    /// Write the verbatim buffer to the export sink. An empty buffer exports
    /// an empty artifact.
    pub async fn export(&self) -> Result<PathBuf> {
        let content = self.transcript.lock().await.clone();
        self.export_sink.export(&content)
    }

    /// Email the note. Validates that sender, recipient and buffer are all
    /// non-empty before any external call; suspends on the delivery
    /// capability with no retry and no cancellation.
    pub async fn deliver(&self, from_name: &str, to_email: &str) -> Result<()> {
        self.set_identity(from_name, to_email).await;

        let message = self.transcript.lock().await.clone();

        if from_name.is_empty() {
            return Err(NoteError::Validation { field: "from_name" });
        }
        if to_email.is_empty() {
            return Err(NoteError::Validation { field: "to_email" });
        }
        if message.is_empty() {
            return Err(NoteError::Validation {
                field: "transcript",
            });
        }

        let request = DeliveryRequest::new(from_name, to_email, &message);

        match self.delivery.send(&request).await {
            Ok(()) => {
                info!(
                    "Session {} delivered note via {}",
                    self.config.session_id,
                    self.delivery.name()
                );
                Ok(())
            }
            Err(e) => {
                error!("Session {} delivery failed: {}", self.config.session_id, e);
                Err(e)
            }
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if self.listening.load(Ordering::SeqCst) {
            SessionState::Listening
        } else {
            SessionState::Idle
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        let transcript_chars = {
            let buffer = self.transcript.lock().await;
            buffer.chars().count()
        };

        SessionStats {
            state: self.state(),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            increments_applied: self.increments_applied.load(Ordering::SeqCst),
            transcript_chars,
        }
    }

    /// Tear the session down: stop capture, release the recognition
    /// capability, join the draining tasks. Safe to call from every exit
    /// path; only the first call does the work.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Closing note session: {}", self.config.session_id);

        self.adapter.lock().await.teardown().await?;
        self.listening.store(false, Ordering::SeqCst);

        // Teardown closed both streams, so the draining tasks finish on
        // their own
        {
            let mut handle = self.increment_task_handle.lock().await;
            if let Some(task) = handle.take() {
                if let Err(e) = task.await {
                    error!("Increment task panicked: {}", e);
                }
            }
        }
        {
            let mut handle = self.error_task_handle.lock().await;
            if let Some(task) = handle.take() {
                if let Err(e) = task.await {
                    error!("Error task panicked: {}", e);
                }
            }
        }

        info!("Note session closed: {}", self.config.session_id);

        Ok(())
    }
}
