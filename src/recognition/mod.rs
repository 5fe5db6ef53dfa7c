//! Recognition session adapter
//!
//! This module bridges an external continuous speech-recognition capability:
//! - `RecognitionBackend` trait + factory (capability probe, typed failure)
//! - `ScriptedBackend` for tests, demos and fixture replay
//! - `RecognitionAdapter`: lifecycle ownership and normalization of raw
//!   engine events into finalized text increments and error descriptions

mod adapter;
mod backend;
mod scripted;

pub use adapter::{finalized_text, RecognitionAdapter};
pub use backend::{
    RecognitionBackend, RecognitionBackendFactory, RecognitionConfig, RecognitionEvent,
    RecognitionResult, RecognitionSource, ResultBatch,
};
pub use scripted::ScriptedBackend;
