use glam::DVec2;
use linemorph_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `point` - The position to sample, in pixel units, already inside the raster.
///
/// # Returns
///
/// The channel values of the closest lattice pixel.
pub fn nearest_sample<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    point: DVec2,
) -> [f64; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let x = (point.x.round() as usize).min(cols - 1);
    let y = (point.y.round() as usize).min(rows - 1);

    let base = (y * cols + x) * C;
    let data = &image.as_slice()[base..base + C];

    let mut out = [0.0; C];
    for (value, &raw) in out.iter_mut().zip(data) {
        *value = raw.to_f64();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::nearest_sample;
    use glam::DVec2;
    use linemorph_image::{Image, ImageError};

    #[test]
    fn nearest_rounds_to_closest_pixel() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([2, 2].into(), vec![0.0, 1.0, 2.0, 3.0])?;
        assert_eq!(nearest_sample(&image, DVec2::new(0.4, 0.4)), [0.0]);
        assert_eq!(nearest_sample(&image, DVec2::new(0.6, 0.4)), [1.0]);
        assert_eq!(nearest_sample(&image, DVec2::new(0.6, 0.6)), [3.0]);
        Ok(())
    }
}
