//! QR code generation: matrix encoding and rasterization onto a pixel surface.

use image::RgbaImage;
use qrcode::QrCode;
use tracing::debug;

use crate::{Color, EngineError, FALLBACK_SCALE, Result};

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

/// Sizing and coloring applied when rasterizing a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Target side length of the output image in pixels.
    pub width_px: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin_modules: u32,
    pub ec_level: EcLevel,
    pub dark: Color,
    pub light: Color,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            width_px: 320,
            margin_modules: 2,
            ec_level: EcLevel::Medium,
            dark: Color::rgb(0x0f, 0x17, 0x2a),
            light: Color::WHITE,
        }
    }
}

/// Encoded module grid, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Number of modules per side (excluding margin).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at `(x, y)` is dark. Coordinates outside the
    /// symbol (the margin) are light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize]
    }
}

/// Encode text into a QR module matrix at the given error-correction level.
pub fn encode_matrix(data: &str, ec_level: EcLevel) -> Result<QrMatrix> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level.into())
        .map_err(|e| EngineError::Encode(e.to_string()))?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    debug!(width, ?ec_level, "Encoded QR matrix");
    Ok(QrMatrix { width, modules })
}

/// Draw a matrix onto a square RGBA surface.
///
/// When `width_px` can hold the symbol plus margin, the surface is exactly
/// `width_px` wide and modules are scaled fractionally to fill it. Otherwise
/// each module is [`FALLBACK_SCALE`] pixels.
pub fn rasterize(matrix: &QrMatrix, style: &QrStyle) -> RgbaImage {
    let total = matrix.width() as u32 + 2 * style.margin_modules;
    let (side, scale) = if style.width_px >= total {
        (style.width_px, f64::from(style.width_px) / f64::from(total))
    } else {
        (total * FALLBACK_SCALE, f64::from(FALLBACK_SCALE))
    };

    let margin = i64::from(style.margin_modules);
    let dark = style.dark.to_rgba();
    let light = style.light.to_rgba();

    debug!(side, modules = matrix.width(), scale, "Rasterizing QR matrix");

    RgbaImage::from_fn(side, side, |x, y| {
        let mx = (f64::from(x) / scale).floor() as i64 - margin;
        let my = (f64::from(y) / scale).floor() as i64 - margin;
        if matrix.is_dark(mx, my) { dark } else { light }
    })
}

/// Encode and rasterize in one step.
pub fn render_qr(data: &str, style: &QrStyle) -> Result<RgbaImage> {
    let matrix = encode_matrix(data, style.ec_level)?;
    Ok(rasterize(&matrix, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_qr_produces_square_image_at_target_width() {
        let img = render_qr("https://example.com", &QrStyle::default()).unwrap();
        assert_eq!(img.width(), 320);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn margin_pixels_use_light_color() {
        let style = QrStyle::default();
        let img = render_qr("test", &style).unwrap();
        assert_eq!(*img.get_pixel(0, 0), style.light.to_rgba());
        assert_eq!(*img.get_pixel(319, 319), style.light.to_rgba());
    }

    #[test]
    fn finder_pattern_corner_uses_dark_color() {
        let style = QrStyle::default();
        let matrix = encode_matrix("test", style.ec_level).unwrap();
        assert!(matrix.is_dark(0, 0));

        let img = rasterize(&matrix, &style);
        let total = matrix.width() as u32 + 2 * style.margin_modules;
        // Center of the first symbol module, just inside the margin.
        let px = ((2.5 * 320.0) / f64::from(total)) as u32;
        assert_eq!(*img.get_pixel(px, px), style.dark.to_rgba());
    }

    #[test]
    fn small_width_falls_back_to_fixed_scale() {
        let style = QrStyle {
            width_px: 10,
            ..QrStyle::default()
        };
        let matrix = encode_matrix("hello", style.ec_level).unwrap();
        let img = rasterize(&matrix, &style);
        let expected = (matrix.width() as u32 + 4) * FALLBACK_SCALE;
        assert_eq!(img.width(), expected);
    }

    #[test]
    fn higher_ec_level_needs_at_least_as_many_modules() {
        let text = "The quick brown fox jumps over the lazy dog";
        let low = encode_matrix(text, EcLevel::Low).unwrap();
        let high = encode_matrix(text, EcLevel::High).unwrap();
        assert!(high.width() >= low.width());
    }

    #[test]
    fn out_of_range_modules_are_light() {
        let matrix = encode_matrix("x", EcLevel::Medium).unwrap();
        let w = matrix.width() as i64;
        assert!(!matrix.is_dark(-1, 0));
        assert!(!matrix.is_dark(0, w));
    }

    #[test]
    fn oversized_payload_is_an_encode_error() {
        let text = "\u{1F600}".repeat(1200);
        let err = encode_matrix(&text, EcLevel::High).unwrap_err();
        assert!(matches!(err, EngineError::Encode(_)));
    }
}
