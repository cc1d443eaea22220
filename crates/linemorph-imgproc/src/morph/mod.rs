//! Feature based image morphing driven by corresponding line pairs.
//!
//! Every output pixel is mapped back into both input images through a field
//! defined by the line pairs: each pair describes the pixel relative to its
//! in-between line and proposes where that position lies in the source and in
//! the destination image, and the proposals are averaged with weights that
//! favor nearby, long lines. The two resampled colors are then cross-dissolved.
//!
//! - [`FeatureLine`]: one directed segment and its local coordinate frame
//! - [`FeatureLinePair::interpolate`]: the in-between line at a blend ratio
//! - [`MorphField`] / [`warp_point`]: the per-pixel inverse mapping
//! - [`warp_image`]: renders one frame
//! - [`blend_ratios`] / [`morph_sequence`]: renders an animation
//!
//! # Examples
//!
//! ```
//! use glam::DVec2;
//! use linemorph_image::Image;
//! use linemorph_imgproc::morph::{blend_ratios, morph_sequence, FeatureLinePair, MorphParams};
//!
//! let src = Image::<u8, 3>::from_size_val([8, 8].into(), 0).unwrap();
//! let dst = Image::<u8, 3>::from_size_val([8, 8].into(), 255).unwrap();
//!
//! let pairs = [FeatureLinePair::from_endpoints(
//!     (DVec2::new(1.0, 1.0), DVec2::new(6.0, 2.0)),
//!     (DVec2::new(2.0, 1.0), DVec2::new(6.0, 5.0)),
//! ).unwrap()];
//!
//! let frames = morph_sequence(&src, &dst, &pairs, &blend_ratios(4).unwrap(), &MorphParams::default()).unwrap();
//! assert_eq!(frames.len(), 5);
//! ```

mod field;
mod line;
mod pair;
mod sequence;
mod warp;

pub use field::{warp_point, MorphField, WarpedPoint};
pub use line::{FeatureLine, WeightParams};
pub use pair::FeatureLinePair;
pub use sequence::{blend_ratios, morph_sequence, DEFAULT_FRAME_COUNT};
pub use warp::{warp_image, MorphParams};
