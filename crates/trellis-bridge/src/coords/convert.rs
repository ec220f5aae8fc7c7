use super::{Density, Geometry};

/// Rectangle in whole device pixels, the layout-parameter form of a [`Geometry`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Converts density-independent geometry to device pixels.
///
/// Every field is `logical * density` truncated toward zero, matching how the
/// platform stores integer layout fields. Truncation loses at most one device
/// pixel per axis.
#[inline]
pub fn to_pixels(frame: Geometry, density: Density) -> PixelRect {
    let d = density.get();
    PixelRect {
        left: truncate(frame.x * d),
        top: truncate(frame.y * d),
        width: truncate(frame.width * d),
        height: truncate(frame.height * d),
    }
}

/// Converts a pixel size back to density-independent geometry at `(0, 0)`.
///
/// Only size crosses back; position is never reconstructed from pixels.
#[inline]
pub fn to_logical(width: i32, height: i32, density: Density) -> Geometry {
    let d = density.get();
    Geometry::from_size(width as f32 / d, height as f32 / d)
}

// `as` rounds toward zero and saturates at the i32 range.
#[inline]
fn truncate(v: f32) -> i32 {
    v as i32
}
