//! The encoding collaborator seam and the artifacts it produces.

use std::sync::Arc;

use image_engine::{EngineError, QrStyle, RgbaImage};

/// Turns accepted text into a rasterized QR surface.
///
/// Implementations must be deterministic for identical input.
pub trait Encoder {
    fn encode(&self, text: &str, style: &QrStyle) -> Result<RgbaImage, EngineError>;
}

/// Encoder backed by the `qrcode` and `image` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl Encoder for QrEncoder {
    fn encode(&self, text: &str, style: &QrStyle) -> Result<RgbaImage, EngineError> {
        image_engine::render_qr(text, style)
    }
}

/// A rasterized QR code together with the text it encodes.
///
/// Cloning is cheap; the surface is shared.
#[derive(Debug, Clone)]
pub struct QrArtifact {
    text: String,
    image: Arc<RgbaImage>,
}

impl QrArtifact {
    pub fn new(text: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            text: text.into(),
            image: Arc::new(image),
        }
    }

    /// The accepted text this artifact was rendered from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn to_png(&self) -> Result<Vec<u8>, EngineError> {
        image_engine::encode_png(&self.image)
    }

    pub fn to_data_uri(&self) -> Result<String, EngineError> {
        Ok(image_engine::png_data_uri(&self.to_png()?))
    }
}
