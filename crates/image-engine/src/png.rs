//! PNG export of rasterized surfaces.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::{EngineError, Result};

/// Encode a surface as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| EngineError::Png(e.to_string()))?;
    debug!(width = img.width(), bytes = buf.len(), "Encoded PNG");
    Ok(buf)
}

/// Wrap PNG bytes in a `data:` URI suitable for an `<img src>`.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn encode_png_writes_png_signature() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn encoded_png_decodes_to_same_size() {
        let img = RgbaImage::from_pixel(7, 7, Rgba([15, 23, 42, 255]));
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (7, 7));
    }

    #[test]
    fn empty_surface_is_a_png_error() {
        let err = encode_png(&RgbaImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, EngineError::Png(_)));
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let uri = png_data_uri(&PNG_MAGIC);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > "data:image/png;base64,".len());
    }
}
