use glam::DVec2;
use linemorph_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// Reads the four lattice neighbors given by `floor` and `ceil` of each
/// coordinate and blends them first along x, then along y. On an integer
/// coordinate `floor == ceil`, so the result is exactly that pixel.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `point` - The position to sample, in pixel units.
///
/// # Returns
///
/// The interpolated channel values.
///
/// # Panics
///
/// The point must lie inside the raster; pass it through
/// [`clip_point`](super::clip_point) first.
pub fn bilinear_sample<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    point: DVec2,
) -> [f64; C] {
    let cols = image.cols();

    let x_floor = point.x.floor();
    let y_floor = point.y.floor();

    let (x0, x1) = (x_floor as usize, point.x.ceil() as usize);
    let (y0, y1) = (y_floor as usize, point.y.ceil() as usize);

    let u = point.x - x_floor;
    let v = point.y - y_floor;

    let data = image.as_slice();
    let pixel = |x: usize, y: usize| &data[(y * cols + x) * C..(y * cols + x + 1) * C];

    let top_left = pixel(x0, y0);
    let top_right = pixel(x1, y0);
    let bottom_left = pixel(x0, y1);
    let bottom_right = pixel(x1, y1);

    let mut out = [0.0; C];
    for (k, value) in out.iter_mut().enumerate() {
        let top = (1.0 - u) * top_left[k].to_f64() + u * top_right[k].to_f64();
        let bottom = (1.0 - u) * bottom_left[k].to_f64() + u * bottom_right[k].to_f64();
        *value = (1.0 - v) * top + v * bottom;
    }
    out
}
