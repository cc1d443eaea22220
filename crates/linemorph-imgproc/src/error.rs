use glam::DVec2;
use linemorph_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// Errors that can occur while building feature lines or morphing images.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphError {
    /// The two endpoints of a feature line coincide.
    #[error("feature line endpoints must differ, got P = {p} and Q = {q}")]
    ZeroLengthLine {
        /// Start point.
        p: DVec2,
        /// End point.
        q: DVec2,
    },

    /// A feature line was given a non-positive or non-finite length.
    #[error("feature line length must be finite and > 0, got {0}")]
    InvalidLineLength(f64),

    /// A feature line coordinate or angle is NaN or infinite.
    #[error("feature line geometry must be finite")]
    NonFiniteGeometry,

    /// No line pairs were supplied, so no displacement field exists.
    #[error("at least one feature line pair is required")]
    EmptyLinePairs,

    /// The weight parameters would produce non-finite weights.
    #[error("invalid weight parameters a = {a}, b = {b}, p = {p}: a must be > 0, b >= 0 and all finite")]
    InvalidWeightParams {
        /// Distance offset.
        a: f64,
        /// Falloff exponent.
        b: f64,
        /// Length exponent.
        p: f64,
    },

    /// Line weights could overflow `f64` for a line of this length.
    #[error("line weights overflow for a feature line of length {0}")]
    WeightOverflow(f64),

    /// The source, destination and output images do not share one size.
    #[error("image dimensions must match: {0} != {1}")]
    DimensionMismatch(ImageSize, ImageSize),

    /// The blend ratio for an output frame is outside [0, 1].
    #[error("blend ratio must be within [0, 1], got {0}")]
    InvalidBlendRatio(f64),

    /// A sequence was requested with zero frame intervals.
    #[error("frame count must be > 0")]
    InvalidFrameCount,

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the parallel execution layer.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
