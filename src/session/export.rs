use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::state::Message;
use crate::utils::AdvisorError;

/// Writes the transcript to a single fixed file.
///
/// Each export replaces the whole file. Two sessions exporting to the same
/// path overwrite each other (last writer wins).
#[derive(Debug, Clone)]
pub struct TranscriptExporter {
    path: PathBuf,
}

impl TranscriptExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the messages as a compact JSON array of `{role, content}`
    pub fn export(&self, messages: &[Message]) -> Result<(), AdvisorError> {
        let json = serde_json::to_string(messages)?;
        fs::write(&self.path, json)?;

        info!(
            "Exported {} messages to {}",
            messages.len(),
            self.path.display()
        );
        Ok(())
    }
}
