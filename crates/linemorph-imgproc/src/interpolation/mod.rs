//! Pixel interpolation methods for image morphing.
//!
//! The morphing field produces real valued sample positions, usually between
//! pixel centers and sometimes outside the raster. This module clamps those
//! positions into the raster and resamples the image there.
//!
//! # Interpolation Modes
//!
//! - **Bilinear**: Smooth linear interpolation between the four lattice neighbors
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)

mod bilinear;
mod interpolate;
mod nearest;

pub use bilinear::bilinear_sample;
pub use interpolate::{clip_point, interpolate_pixel, InterpolationMode};
pub use nearest::nearest_sample;
