//! QR matrix encoding, rasterization and PNG export.
//!
//! Matrix encoding is delegated to the `qrcode` crate and pixel surfaces to
//! the `image` crate; this crate only glues them together with the sizing
//! and coloring rules the generator uses.

pub mod color;
pub mod png;
pub mod qr;

// Re-exports for convenience
pub use color::Color;
pub use image::RgbaImage;
pub use png::{encode_png, png_data_uri};
pub use qr::{EcLevel, QrMatrix, QrStyle, encode_matrix, rasterize, render_qr};

/// Pixels per module when the requested width cannot fit the symbol.
pub const FALLBACK_SCALE: u32 = 4;

/// Errors produced by the encoding and rasterizing collaborators.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("PNG encode error: {0}")]
    Png(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
