//! Text-to-QR generation core.
//!
//! Validates raw input, drives the render state machine around the encoding
//! collaborator, derives download filenames and hands finished artifacts to a
//! save target. Nothing here knows about HTTP or the browser page.

pub mod encoder;
pub mod export;
pub mod filename;
pub mod pipeline;
pub mod validate;

// Re-exports for convenience
pub use encoder::{Encoder, QrArtifact, QrEncoder};
pub use export::{ExportError, ExportReceipt, MemoryTarget, SaveTarget, SavedFile, export_artifact};
pub use filename::{sanitize, sanitize_at};
pub use pipeline::{InputFeedback, RenderOutcome, RenderPipeline, RenderState, RenderTicket, Snapshot};
pub use validate::{MAX_INPUT_CHARS, Rejection, ValidationResult, trim_input, validate};

/// Shown when the input is blank after trimming.
pub const EMPTY_MESSAGE: &str = "Please enter some text or URL first.";
/// Shown when the input exceeds [`MAX_INPUT_CHARS`].
pub const TOO_LONG_MESSAGE: &str = "Text is too long. Please keep it under 1200 characters.";
/// Shown for any failure inside the encoder or rasterizer.
pub const ENCODE_FAILURE_MESSAGE: &str = "Failed to generate QR code. Please try again.";
/// Shown for any failure while exporting an artifact.
pub const EXPORT_FAILURE_MESSAGE: &str = "Failed to download. Please generate again.";
/// Shown when a render is requested while another is in flight.
pub const BUSY_MESSAGE: &str = "A QR code is already being generated.";
