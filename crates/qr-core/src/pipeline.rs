//! Render state machine: Validator -> Encoder -> artifact, plus reset,
//! input editing and export of the current artifact.
//!
//! ```text
//! Idle -> Loading -> {Result | Error} -> Loading -> ...
//! ```
//!
//! `Idle` is re-entered only through [`RenderPipeline::reset`].

use image_engine::{EngineError, QrStyle, RgbaImage};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::encoder::{Encoder, QrArtifact};
use crate::export::{ExportError, ExportReceipt, SaveTarget, export_artifact};
use crate::filename::sanitize;
use crate::validate::{ValidationResult, validate};
use crate::{BUSY_MESSAGE, ENCODE_FAILURE_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Result,
    Error(String),
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            RenderState::Idle => "idle",
            RenderState::Loading => "loading",
            RenderState::Result => "result",
            RenderState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Success(QrArtifact),
    Failure(String),
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success(_))
    }
}

/// An admitted render waiting for its encode step.
///
/// Produced by [`RenderPipeline::begin`] and consumed by
/// [`RenderPipeline::complete`].
#[derive(Debug, Clone)]
pub struct RenderTicket {
    seq: u64,
    text: String,
    style: QrStyle,
}

impl RenderTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &QrStyle {
        &self.style
    }

    pub fn encode<E: Encoder + ?Sized>(&self, encoder: &E) -> Result<RgbaImage, EngineError> {
        encoder.encode(&self.text, &self.style)
    }
}

/// Result of a keystroke-level input edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputFeedback {
    pub char_count: usize,
}

/// Display-binding view of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: &'static str,
    pub error: Option<String>,
    pub input: String,
    pub char_count: usize,
    pub generate_enabled: bool,
    pub download_enabled: bool,
}

/// Owns the render state, the current input text and the current artifact.
#[derive(Debug)]
pub struct RenderPipeline<E> {
    encoder: E,
    style: QrStyle,
    state: RenderState,
    input: String,
    artifact: Option<QrArtifact>,
    error_dismissed: bool,
    seq: u64,
}

impl<E: Encoder> RenderPipeline<E> {
    pub fn new(encoder: E) -> Self {
        Self::with_style(encoder, QrStyle::default())
    }

    pub fn with_style(encoder: E, style: QrStyle) -> Self {
        Self {
            encoder,
            style,
            state: RenderState::Idle,
            input: String::new(),
            artifact: None,
            error_dismissed: false,
            seq: 0,
        }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The artifact from the last successful render, if still current.
    pub fn artifact(&self) -> Option<&QrArtifact> {
        self.artifact.as_ref()
    }

    pub fn generate_enabled(&self) -> bool {
        self.state != RenderState::Loading
    }

    pub fn download_enabled(&self) -> bool {
        self.state == RenderState::Result && self.artifact.is_some()
    }

    /// The error message currently shown, if any.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            RenderState::Error(msg) if !self.error_dismissed => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.name(),
            error: self.error_message().map(ToString::to_string),
            input: self.input.clone(),
            char_count: self.input.chars().count(),
            generate_enabled: self.generate_enabled(),
            download_enabled: self.download_enabled(),
        }
    }

    /// Replace the input text. Hides a visible error but leaves the render
    /// state and any finished artifact alone.
    pub fn edit_input(&mut self, text: impl Into<String>) -> InputFeedback {
        self.input = text.into();
        if matches!(self.state, RenderState::Error(_)) {
            self.error_dismissed = true;
        }
        InputFeedback {
            char_count: self.input.chars().count(),
        }
    }

    /// Validate `raw` and, if accepted, enter `Loading`.
    ///
    /// Any previous artifact is discarded before the new state is visible.
    /// While a render is in flight the request is refused and nothing changes.
    pub fn begin(&mut self, raw: &str) -> Result<RenderTicket, RenderOutcome> {
        if self.state == RenderState::Loading {
            warn!("Render requested while another is in flight");
            return Err(RenderOutcome::Failure(BUSY_MESSAGE.to_string()));
        }

        let text = match validate(raw) {
            ValidationResult::Accepted(text) => text,
            ValidationResult::Rejected(reason) => {
                debug!(%reason, "Input rejected");
                self.artifact = None;
                return Err(self.fail(reason.message()));
            }
        };

        self.artifact = None;
        self.error_dismissed = false;
        self.state = RenderState::Loading;
        self.seq += 1;

        debug!(chars = text.chars().count(), "Render started");
        Ok(RenderTicket {
            seq: self.seq,
            text,
            style: self.style,
        })
    }

    /// Finish a render started by [`begin`](Self::begin).
    ///
    /// A ticket that no longer matches the in-flight render (the pipeline was
    /// reset meanwhile) is dropped without touching state.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        result: Result<RgbaImage, EngineError>,
    ) -> RenderOutcome {
        if self.state != RenderState::Loading || ticket.seq != self.seq {
            debug!(seq = ticket.seq, "Discarding stale render result");
            return RenderOutcome::Failure(ENCODE_FAILURE_MESSAGE.to_string());
        }

        match result {
            Ok(image) => {
                let artifact = QrArtifact::new(ticket.text, image);
                info!(
                    chars = artifact.text().chars().count(),
                    width = artifact.image().width(),
                    "QR code generated"
                );
                self.artifact = Some(artifact.clone());
                self.state = RenderState::Result;
                RenderOutcome::Success(artifact)
            }
            Err(e) => {
                error!(error = %e, "Failed to generate QR code");
                self.fail(ENCODE_FAILURE_MESSAGE)
            }
        }
    }

    /// Validate, encode and store in one call.
    pub fn render(&mut self, raw: &str) -> RenderOutcome {
        match self.begin(raw) {
            Ok(ticket) => {
                let result = ticket.encode(&self.encoder);
                self.complete(ticket, result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Export the current artifact, naming the file after the current input.
    ///
    /// Never changes the render state.
    pub fn export(&self, target: &mut dyn SaveTarget) -> Result<ExportReceipt, ExportError> {
        let artifact = match &self.artifact {
            Some(artifact) if self.download_enabled() => artifact,
            _ => {
                warn!("Export requested with no current QR code");
                return Err(ExportError::NothingToExport);
            }
        };
        let filename = sanitize(&self.input);
        export_artifact(artifact, &filename, target)
    }

    /// Back to a blank `Idle` pipeline.
    pub fn reset(&mut self) {
        self.input.clear();
        self.artifact = None;
        self.error_dismissed = false;
        self.state = RenderState::Idle;
        debug!("Pipeline reset");
    }

    fn fail(&mut self, message: &str) -> RenderOutcome {
        self.error_dismissed = false;
        self.state = RenderState::Error(message.to_string());
        RenderOutcome::Failure(message.to_string())
    }
}
