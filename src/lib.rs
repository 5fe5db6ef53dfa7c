pub mod config;
pub mod delivery;
pub mod error;
pub mod export;
pub mod http;
pub mod recognition;
pub mod session;

pub use config::{Config, DeliveryConfig, ExportConfig};
pub use delivery::{DeliveryRequest, DeliveryService, EmailJsClient};
pub use error::{NoteError, Result};
pub use export::{ExportSink, FileExportSink};
pub use http::{create_router, AppState};
pub use recognition::{
    finalized_text, RecognitionAdapter, RecognitionBackend, RecognitionBackendFactory,
    RecognitionConfig, RecognitionEvent, RecognitionResult, RecognitionSource, ResultBatch,
    ScriptedBackend,
};
pub use session::{DeliveryIdentity, NoteSession, SessionConfig, SessionState, SessionStats};
