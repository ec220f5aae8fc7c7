use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::boundary::BridgeError;

/// Decoded image content, shareable between image views.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Decodes an encoded image (format sniffed from the bytes).
    pub fn decode(bytes: &[u8]) -> Result<Bitmap, BridgeError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    pub fn from_rgba(pixels: RgbaImage) -> Bitmap {
        Bitmap {
            pixels: Arc::new(pixels),
        }
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
