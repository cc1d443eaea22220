use glam::DVec2;
use linemorph_image::{Image, ImageDtype};

use super::field::MorphField;
use super::line::WeightParams;
use super::pair::FeatureLinePair;
use crate::error::MorphError;
use crate::interpolation::{clip_point, interpolate_pixel, InterpolationMode};
use crate::parallel::{self, ExecutionStrategy};

/// Parameters for rendering a morph frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphParams {
    /// Line influence parameters.
    pub weight: WeightParams,
    /// How the input images are resampled.
    pub interpolation: InterpolationMode,
    /// How the output rows are scheduled.
    pub strategy: ExecutionStrategy,
}

/// Render one morph frame at blend ratio `alpha`.
///
/// For every output pixel the line pairs give a position in the source and in
/// the destination image. Both positions are clamped into the raster,
/// resampled, and the two colors are cross-dissolved as
/// `(1 - alpha) * source + alpha * dest`.
///
/// # Arguments
///
/// * `src` - The source image with shape (height, width, C).
/// * `dst` - The destination image, same size as `src`.
/// * `out` - The output image, same size as `src`.
/// * `pairs` - The feature line correspondences, at least one.
/// * `alpha` - The blend ratio in [0, 1].
/// * `params` - Weighting, interpolation and scheduling parameters.
///
/// # Errors
///
/// * [`MorphError::DimensionMismatch`] if the three images differ in size.
/// * [`MorphError::InvalidBlendRatio`] if `alpha` is outside [0, 1].
/// * [`MorphError::EmptyLinePairs`] if `pairs` is empty.
///
/// # Example
///
/// ```
/// use glam::DVec2;
/// use linemorph_image::Image;
/// use linemorph_imgproc::morph::{warp_image, FeatureLinePair, MorphParams};
///
/// let src = Image::<u8, 3>::from_size_val([4, 4].into(), 0).unwrap();
/// let dst = Image::<u8, 3>::from_size_val([4, 4].into(), 200).unwrap();
/// let mut out = Image::<u8, 3>::from_size_val([4, 4].into(), 0).unwrap();
///
/// let pair = FeatureLinePair::from_endpoints(
///     (DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0)),
///     (DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0)),
/// ).unwrap();
///
/// warp_image(&src, &dst, &mut out, &[pair], 0.25, &MorphParams::default()).unwrap();
/// assert!(out.as_slice().iter().all(|&v| v == 50));
/// ```
pub fn warp_image<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
    out: &mut Image<T, C>,
    pairs: &[FeatureLinePair],
    alpha: f64,
    params: &MorphParams,
) -> Result<(), MorphError> {
    if src.size() != dst.size() {
        return Err(MorphError::DimensionMismatch(src.size(), dst.size()));
    }

    if src.size() != out.size() {
        return Err(MorphError::DimensionMismatch(src.size(), out.size()));
    }

    if !(0.0..=1.0).contains(&alpha) {
        return Err(MorphError::InvalidBlendRatio(alpha));
    }

    let field = MorphField::new(pairs, alpha, &params.weight)?;

    log::debug!(
        "warping {} with {} line pairs at alpha {alpha:.3}",
        src.size(),
        field.num_pairs(),
    );

    let (rows, cols) = (src.rows(), src.cols());
    let interpolation = params.interpolation;

    parallel::par_iter_rows_indexed(out, params.strategy, |x, y, out_pixel| {
        let warped = field.warp_point(DVec2::new(x as f64, y as f64));

        let p_src = clip_point(warped.source, rows, cols);
        let p_dst = clip_point(warped.dest, rows, cols);

        let color_src = interpolate_pixel(src, p_src, interpolation);
        let color_dst = interpolate_pixel(dst, p_dst, interpolation);

        for (k, pixel) in out_pixel.iter_mut().enumerate() {
            *pixel = T::from_f64((1.0 - alpha) * color_src[k] + alpha * color_dst[k]);
        }
    })?;

    Ok(())
}
