/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Packs into the toolkit's `0xAARRGGBB` color integer.
    ///
    /// Components are clamped to `[0, 1]` and truncated to 8 bits.
    pub fn to_argb(self) -> i32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u32;
        let packed = (channel(self.a) << 24)
            | (channel(self.r) << 16)
            | (channel(self.g) << 8)
            | channel(self.b);
        packed as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_packs_to_all_ones() {
        assert_eq!(ColorRgba::white().to_argb(), -1);
    }

    #[test]
    fn channels_land_in_argb_order() {
        let packed = ColorRgba::new(1.0, 0.0, 0.0, 1.0).to_argb() as u32;
        assert_eq!(packed, 0xFFFF_0000);
        let packed = ColorRgba::new(0.0, 0.0, 1.0, 0.0).to_argb() as u32;
        assert_eq!(packed, 0x0000_00FF);
    }

    #[test]
    fn out_of_range_components_are_clamped() {
        let packed = ColorRgba::new(2.0, -1.0, 0.0, 1.0).to_argb() as u32;
        assert_eq!(packed, 0xFFFF_0000);
    }
}
