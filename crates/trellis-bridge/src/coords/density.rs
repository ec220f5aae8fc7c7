use crate::boundary::BridgeError;

/// Device pixels per density-independent point.
///
/// Always finite and strictly positive. Never cached by the bridge: every
/// conversion asks the display for a fresh value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Density(f32);

impl Density {
    pub fn new(scale: f32) -> Result<Self, BridgeError> {
        if scale.is_finite() && scale > 0.0 {
            Ok(Self(scale))
        } else {
            Err(BridgeError::InvalidDensity(scale))
        }
    }

    /// Wraps a scale reported by the windowing system.
    ///
    /// A non-positive density is a platform invariant violation and panics.
    pub(crate) fn from_platform(scale: f32) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "platform reported invalid display density {scale}"
        );
        Self(scale)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Physical display description as reported by the platform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayMetrics {
    pub width_pixels: i32,
    pub height_pixels: i32,
    pub density: Density,
}

impl DisplayMetrics {
    pub fn new(width_pixels: i32, height_pixels: i32, density: f32) -> Result<Self, BridgeError> {
        Ok(Self {
            width_pixels,
            height_pixels,
            density: Density::new(density)?,
        })
    }
}

impl Default for DisplayMetrics {
    /// A 1080×1920 handset panel at 3x.
    fn default() -> Self {
        Self {
            width_pixels: 1080,
            height_pixels: 1920,
            density: Density(3.0),
        }
    }
}
