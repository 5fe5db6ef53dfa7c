use super::backend::{RecognitionBackend, RecognitionConfig, RecognitionEvent, ResultBatch};
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Backend that plays back a prepared batch sequence.
///
/// Stands in for a real engine in tests, demos, and headless runs. Batches are
/// emitted in order with a fixed pacing delay; stop() ends playback early.
pub struct ScriptedBackend {
    batches: Vec<ResultBatch>,
    config: RecognitionConfig,
    pacing: Duration,
    listening: Arc<AtomicBool>,
}

impl ScriptedBackend {
    pub fn new(batches: Vec<ResultBatch>, config: RecognitionConfig) -> Self {
        Self {
            batches,
            config,
            pacing: Duration::from_millis(10),
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replay a transcript fixture: each non-empty line becomes one utterance,
    /// surfaced as an interim batch followed by a finalized batch, the way a
    /// continuous engine confirms speech.
    pub fn from_fixture(path: &str, config: RecognitionConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let mut batches = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if config.interim_results {
                batches.push(ResultBatch::interim(line));
            }
            batches.push(ResultBatch::finalized(line));
        }

        info!("Loaded {} batches from fixture {}", batches.len(), path);

        Ok(Self::new(batches, config))
    }

    /// Override the delay between emitted batches.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

#[async_trait::async_trait]
impl RecognitionBackend for ScriptedBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(64);

        self.listening.store(true, Ordering::SeqCst);

        let batches = self.batches.clone();
        let pacing = self.pacing;
        let listening = Arc::clone(&self.listening);

        tokio::spawn(async move {
            for batch in batches {
                if !listening.load(Ordering::SeqCst) {
                    break;
                }

                if tx.send(RecognitionEvent::Batch(batch)).await.is_err() {
                    // Receiver dropped, nobody is consuming events
                    break;
                }

                tokio::time::sleep(pacing).await;
            }
            // Playback exhausted or stopped; the sender drops here, closing
            // the event channel
            listening.store(false, Ordering::SeqCst);
        });

        info!(
            "Scripted recognition started (locale={}, continuous={})",
            self.config.locale, self.config.continuous
        );

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
