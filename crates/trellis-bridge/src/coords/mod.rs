//! Coordinate and geometry types shared by the bridge and engine code.
//!
//! Two spaces exist:
//! - density-independent points (engine side, `Geometry`)
//! - device pixels (platform side, `PixelRect` / layout params)
//!
//! Both use a top-left origin with +X right and +Y down. Conversion between
//! them lives in [`to_pixels`] / [`to_logical`] and is the only place a
//! [`Density`] is applied.

mod color;
mod convert;
mod density;
mod geometry;

pub use color::ColorRgba;
pub use convert::{to_logical, to_pixels, PixelRect};
pub use density::{Density, DisplayMetrics};
pub use geometry::Geometry;
