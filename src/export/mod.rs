//! Export sink
//!
//! Pluggable destination for the one-shot plain-text export of a note. The
//! controller hands over the verbatim buffer and does not consume any result
//! beyond success/failure; where the artifact lands is the sink's business.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Pluggable export destination for the transcript buffer.
pub trait ExportSink: Send + Sync {
    /// Write the exact content, returning the artifact location. Empty
    /// content is allowed and produces an empty artifact.
    fn export(&self, content: &str) -> Result<PathBuf>;

    /// Sink name for logging
    fn name(&self) -> &str {
        "export"
    }
}

/// Writes the note to a fixed filename in a target directory as UTF-8 plain
/// text.
pub struct FileExportSink {
    output_dir: PathBuf,
    filename: String,
}

impl FileExportSink {
    pub fn new(output_dir: impl AsRef<Path>, filename: &str) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            filename: filename.to_string(),
        }
    }
}

impl ExportSink for FileExportSink {
    fn export(&self, content: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(&self.filename);
        std::fs::write(&path, content.as_bytes())?;

        info!("Exported note to {} ({} bytes)", path.display(), content.len());

        Ok(path)
    }

    fn name(&self) -> &str {
        "file"
    }
}
