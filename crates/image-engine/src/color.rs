//! Module colors.

use image::Rgba;

/// An RGBA color used for dark or light modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}
