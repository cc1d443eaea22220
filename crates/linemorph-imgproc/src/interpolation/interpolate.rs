use super::bilinear::bilinear_sample;
use super::nearest::nearest_sample;
use glam::DVec2;
use linemorph_image::{Image, ImageDtype};

/// Interpolation mode for the resampling step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Clamp a point into the raster, independently per axis.
///
/// x is clamped into `[0, cols - 1]` and y into `[0, rows - 1]`.
///
/// # Arguments
///
/// * `point` - The point to clamp, in pixel units.
/// * `rows` - The number of rows of the raster.
/// * `cols` - The number of columns of the raster.
///
/// # Example
///
/// ```
/// use glam::DVec2;
/// use linemorph_imgproc::interpolation::clip_point;
///
/// let p = clip_point(DVec2::new(-3.0, 12.5), 10, 20);
/// assert_eq!(p, DVec2::new(0.0, 9.0));
/// ```
pub fn clip_point(point: DVec2, rows: usize, cols: usize) -> DVec2 {
    let max_x = cols as f64 - 1.0;
    let max_y = rows as f64 - 1.0;
    DVec2::new(point.x.min(max_x).max(0.0), point.y.min(max_y).max(0.0))
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `point` - The position to sample, already clamped with [`clip_point`].
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated channel values.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    point: DVec2,
    interpolation: InterpolationMode,
) -> [f64; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_sample(image, point),
        InterpolationMode::Nearest => nearest_sample(image, point),
    }
}
