use crate::error::{NoteError, Result};
use tokio::sync::mpsc;

/// One recognized alternative within a result batch.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    /// Recognized text for this entry
    pub text: String,
    /// Whether the engine has finalized this entry. Interim entries may still
    /// be revised and must never reach the transcript buffer.
    pub is_final: bool,
}

/// One batch of results surfaced by the recognition engine. A batch may mix
/// finalized and interim entries, or be empty.
#[derive(Debug, Clone, Default)]
pub struct ResultBatch {
    pub results: Vec<RecognitionResult>,
}

impl ResultBatch {
    pub fn interim(text: &str) -> Self {
        Self {
            results: vec![RecognitionResult {
                text: text.to_string(),
                is_final: false,
            }],
        }
    }

    pub fn finalized(text: &str) -> Self {
        Self {
            results: vec![RecognitionResult {
                text: text.to_string(),
                is_final: true,
            }],
        }
    }
}

/// Event emitted by a recognition backend.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// A batch of recognition results (interim and/or final)
    Batch(ResultBatch),
    /// An opaque engine error description (no-speech timeout, audio-capture
    /// failure, network failure for cloud-backed engines)
    Error(String),
}

/// Configuration handed to a recognition backend.
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Recognition locale
    pub locale: String,
    /// Keep capturing across pauses instead of ending after one utterance
    pub continuous: bool,
    /// Ask the engine to surface interim (unconfirmed) results
    pub interim_results: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// Continuous speech-recognition backend trait
///
/// Implementations:
/// - Scripted: plays back a prepared batch sequence (tests, demos)
/// - File: replays a transcript fixture line by line (headless runs)
/// - Native: a host engine, when one is linked into the build
#[async_trait::async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Start capturing speech
    ///
    /// Returns a channel receiver that will receive recognition events
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Stop capturing speech
    async fn stop(&mut self) -> Result<()>;

    /// Check if the backend is currently capturing
    fn is_listening(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Recognition backend factory
pub struct RecognitionBackendFactory;

impl RecognitionBackendFactory {
    /// Probe for a recognition capability and create the matching backend.
    ///
    /// Unavailability is a typed failure, not a null: callers must surface
    /// `CapabilityUnavailable` to the user once and disable the listening
    /// affordances.
    pub fn create(
        source: RecognitionSource,
        config: RecognitionConfig,
    ) -> Result<Box<dyn RecognitionBackend>> {
        match source {
            RecognitionSource::Native => Err(NoteError::CapabilityUnavailable {
                message: "no speech recognition engine is linked into this build".to_string(),
            }),

            RecognitionSource::File(path) => {
                use super::scripted::ScriptedBackend;
                let backend = ScriptedBackend::from_fixture(&path, config)?;
                Ok(Box::new(backend))
            }

            RecognitionSource::Scripted(batches) => {
                use super::scripted::ScriptedBackend;
                Ok(Box::new(ScriptedBackend::new(batches, config)))
            }
        }
    }

    /// Parse a config source string ("native" or "file:<path>").
    pub fn parse_source(source: &str) -> Result<RecognitionSource> {
        if source == "native" {
            return Ok(RecognitionSource::Native);
        }
        if let Some(path) = source.strip_prefix("file:") {
            return Ok(RecognitionSource::File(path.to_string()));
        }
        Err(NoteError::Recognition {
            message: format!("unknown recognition source: {}", source),
        })
    }
}

/// Recognition source type
#[derive(Debug, Clone)]
pub enum RecognitionSource {
    /// Host speech-recognition engine
    Native,
    /// Replay a transcript fixture file (for testing/headless runs)
    File(String),
    /// Play back prepared result batches (for tests/demos)
    Scripted(Vec<ResultBatch>),
}
