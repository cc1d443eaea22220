use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use linemorph_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Trait for image data types.
///
/// Pixel values are promoted to `f64` for resampling and blending and
/// converted back when the result is stored.
pub trait ImageDtype: Copy + Default + Send + Sync {
    /// Convert the value to `f64`.
    fn to_f64(self) -> f64;

    /// Convert a `f64` value to the image data type.
    fn from_f64(x: f64) -> Self;
}

impl ImageDtype for u8 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageDtype for u16 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, 65535.0) as u16
    }
}

impl ImageDtype for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl ImageDtype for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(x: f64) -> Self {
        x
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row major and interleaved, i.e. with shape (H, W, C).
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linemorph_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use linemorph_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val([4, 2].into(), 7u8).unwrap();
    ///
    /// assert_eq!(image.rows(), 2);
    /// assert_eq!(image.cols(), 4);
    /// assert_eq!(image.as_slice()[5], 7);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.width * size.height * CHANNELS])
    }

    /// Create a new image filling every pixel from a function of its `(x, y)` position.
    pub fn from_size_fn(
        size: ImageSize,
        f: impl Fn(usize, usize) -> [T; CHANNELS],
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.width * size.height * CHANNELS);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend(f(x, y));
            }
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        let base = (y * self.cols() + x) * CHANNELS;
        Ok(&self.data[base..base + CHANNELS])
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageDtype, ImageSize};
    use crate::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
        assert_eq!(ImageSize::from([10, 20]), image_size);
        let dims: [u32; 2] = image_size.into();
        assert_eq!(dims, [10, 20]);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn image_wrong_data_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_from_fn_and_get_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::from_size_fn([3, 2].into(), |x, y| {
            [x as u8, (10 * y) as u8]
        })?;
        assert_eq!(image.get_pixel(2, 1)?, &[2, 10]);
        assert_eq!(image.get_pixel(0, 0)?, &[0, 0]);
        assert_eq!(
            image.get_pixel(3, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn dtype_u8_rounds_and_saturates() {
        assert_eq!(u8::from_f64(127.5), 128);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(200u8.to_f64(), 200.0);
    }
}
