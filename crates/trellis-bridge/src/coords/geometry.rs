/// Axis-aligned rectangle in density-independent points (top-left origin).
///
/// This is the only structured value exchanged with engine code. There is no
/// sign invariant: a negative width or height is carried through conversion
/// unchanged and simply yields a degenerate box on screen.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Size-only geometry anchored at the origin.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Shrinks the rectangle by `inset` on every side.
    ///
    /// An inset larger than half the size produces a negative extent; that is
    /// left to the caller, consistent with the type's lack of a sign invariant.
    #[inline]
    pub fn inset(self, inset: f32) -> Self {
        Self::new(
            self.x + inset,
            self.y + inset,
            self.width - 2.0 * inset,
            self.height - 2.0 * inset,
        )
    }
}
