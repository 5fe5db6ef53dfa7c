use super::backend::{RecognitionBackend, RecognitionEvent, ResultBatch};
use crate::error::{NoteError, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Extract the finalized portion of a result batch.
///
/// Interim entries are discarded; each final entry is appended with a single
/// trailing space so consecutive utterances stay word-separated. Returns None
/// when the batch finalizes nothing.
pub fn finalized_text(batch: &ResultBatch) -> Option<String> {
    let mut text = String::new();
    for result in &batch.results {
        if result.is_final {
            text.push_str(&result.text);
            text.push(' ');
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Bridges a recognition backend to the session controller.
///
/// Owns the backend lifecycle and normalizes its raw events into two streams:
/// finalized text increments and opaque error descriptions. The controller
/// takes each receiver once, right after construction, and decides what to do
/// with what arrives; the adapter never touches the transcript itself.
pub struct RecognitionAdapter {
    backend: Box<dyn RecognitionBackend>,

    /// Increment stream (sender side; dropped on teardown to close the stream)
    increment_tx: Option<mpsc::Sender<String>>,
    increment_rx: Option<mpsc::Receiver<String>>,

    /// Error stream
    error_tx: Option<mpsc::Sender<String>>,
    error_rx: Option<mpsc::Receiver<String>>,

    /// Handle for the event forwarding task
    forward_task: Option<JoinHandle<()>>,

    torn_down: bool,
}

impl RecognitionAdapter {
    pub fn new(backend: Box<dyn RecognitionBackend>) -> Self {
        let (increment_tx, increment_rx) = mpsc::channel(64);
        let (error_tx, error_rx) = mpsc::channel(16);

        Self {
            backend,
            increment_tx: Some(increment_tx),
            increment_rx: Some(increment_rx),
            error_tx: Some(error_tx),
            error_rx: Some(error_rx),
            forward_task: None,
            torn_down: false,
        }
    }

    /// Take the increment stream. Yields once; later calls return None.
    pub fn increments(&mut self) -> Option<mpsc::Receiver<String>> {
        self.increment_rx.take()
    }

    /// Take the error stream. Yields once; later calls return None.
    pub fn errors(&mut self) -> Option<mpsc::Receiver<String>> {
        self.error_rx.take()
    }

    /// Begin capture. No-op when already listening.
    pub async fn start(&mut self) -> Result<()> {
        if self.torn_down {
            return Err(NoteError::Recognition {
                message: "recognition session already torn down".to_string(),
            });
        }

        if self.backend.is_listening() {
            warn!("Recognition already listening");
            return Ok(());
        }

        let mut events = self.backend.start().await?;

        // Join any forwarder left over from a previous start/stop cycle; its
        // event channel has already closed, so this does not block.
        if let Some(task) = self.forward_task.take() {
            if let Err(e) = task.await {
                error!("Recognition forward task panicked: {}", e);
            }
        }

        let increment_tx = self
            .increment_tx
            .clone()
            .ok_or_else(|| NoteError::Recognition {
                message: "increment stream closed".to_string(),
            })?;
        let error_tx = self.error_tx.clone().ok_or_else(|| NoteError::Recognition {
            message: "error stream closed".to_string(),
        })?;

        let forward_task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    RecognitionEvent::Batch(batch) => {
                        if let Some(increment) = finalized_text(&batch) {
                            if increment_tx.send(increment).await.is_err() {
                                break;
                            }
                        }
                    }
                    RecognitionEvent::Error(description) => {
                        // Logged here, recovery is the controller's call
                        error!("Recognition error: {}", description);
                        if error_tx.send(description).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        self.forward_task = Some(forward_task);

        info!("Recognition capture started ({})", self.backend.name());

        Ok(())
    }

    /// End capture. No-op when already idle.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.backend.is_listening() {
            warn!("Recognition not listening");
            return Ok(());
        }

        self.backend.stop().await?;

        // Backend stop closes its event channel, ending the forwarder
        if let Some(task) = self.forward_task.take() {
            if let Err(e) = task.await {
                error!("Recognition forward task panicked: {}", e);
            }
        }

        info!("Recognition capture stopped");

        Ok(())
    }

    pub fn is_listening(&self) -> bool {
        self.backend.is_listening()
    }

    /// Stop capture and close both streams. Runs the release once; later
    /// calls are no-ops so every exit path can call it safely.
    pub async fn teardown(&mut self) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;

        if self.backend.is_listening() {
            self.backend.stop().await?;
        }

        if let Some(task) = self.forward_task.take() {
            if let Err(e) = task.await {
                error!("Recognition forward task panicked: {}", e);
            }
        }

        // Dropping the senders closes both streams for the controller
        self.increment_tx = None;
        self.error_tx = None;

        info!("Recognition session torn down");

        Ok(())
    }
}
