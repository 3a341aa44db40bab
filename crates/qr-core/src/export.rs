//! Export of finished artifacts to a user-facing save target.

use tracing::{error, info};

use image_engine::EngineError;

use crate::EXPORT_FAILURE_MESSAGE;
use crate::encoder::QrArtifact;

/// The save-as action offered to the user.
pub trait SaveTarget {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()>;
}

/// A file held in memory, ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Save target that keeps the last saved file in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    file: Option<SavedFile>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&SavedFile> {
        self.file.as_ref()
    }

    pub fn into_file(self) -> Option<SavedFile> {
        self.file
    }
}

impl SaveTarget for MemoryTarget {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.file = Some(SavedFile {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No QR code available to export")]
    NothingToExport,

    #[error("Encode error: {0}")]
    Encode(#[from] EngineError),

    #[error("Save error: {0}")]
    Save(#[from] std::io::Error),
}

impl ExportError {
    /// User-facing message; the detailed cause is only logged.
    pub fn user_message(&self) -> &'static str {
        EXPORT_FAILURE_MESSAGE
    }
}

/// What was handed to the save target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub filename: String,
    pub bytes: usize,
}

/// Encode `artifact` as PNG and pass it to `target` under `filename`.
pub fn export_artifact(
    artifact: &QrArtifact,
    filename: &str,
    target: &mut dyn SaveTarget,
) -> Result<ExportReceipt, ExportError> {
    let result = artifact
        .to_png()
        .map_err(ExportError::from)
        .and_then(|png| {
            target.save(filename, &png)?;
            Ok(png.len())
        });

    match result {
        Ok(bytes) => {
            info!(filename, bytes, "Exported QR code");
            Ok(ExportReceipt {
                filename: filename.to_string(),
                bytes,
            })
        }
        Err(e) => {
            error!(filename, error = %e, "Failed to export QR code");
            Err(e)
        }
    }
}
