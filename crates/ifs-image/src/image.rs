use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use ifs_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of values needed to store `channels` values per pixel, or `None` on overflow.
    pub fn checked_len(&self, channels: usize) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(channels))
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
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

/// Signed sizes come from surface coordinates, where a negative extent is representable.
impl TryFrom<[i64; 2]> for ImageSize {
    type Error = ImageError;

    fn try_from(size: [i64; 2]) -> Result<Self, Self::Error> {
        let [width, height] = size;
        if width <= 0 || height <= 0 {
            return Err(ImageError::InvalidDimensions {
                width,
                height,
                len: 0,
                expected: 0,
            });
        }

        match (usize::try_from(width), usize::try_from(height)) {
            (Ok(width), Ok(height)) => Ok(ImageSize { width, height }),
            _ => Err(ImageError::InvalidDimensions {
                width,
                height,
                len: 0,
                expected: usize::MAX,
            }),
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with `CHANNELS` consecutive values per pixel, so the
/// value of channel `c` at `(x, y)` lives at `(y * width + x) * CHANNELS + c`.
///
/// The length of the data always equals `width * height * CHANNELS` and both sides are
/// positive; this is checked once at construction and the data can only be mutated
/// through fixed-length slices afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

/// A row-major RGBA image with 8 bits per channel.
pub type PixelBuffer = Image<u8, 4>;

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Number of values an image of `size` holds.
    ///
    /// Fails for a zero side, zero channels, or a length that does not fit in `usize`.
    fn data_len(size: ImageSize, len: usize) -> Result<usize, ImageError> {
        match size.checked_len(CHANNELS) {
            Some(expected) if expected > 0 => Ok(expected),
            expected => Err(ImageError::InvalidDimensions {
                width: i64::try_from(size.width).unwrap_or(i64::MAX),
                height: i64::try_from(size.height).unwrap_or(i64::MAX),
                len,
                expected: expected.unwrap_or(usize::MAX),
            }),
        }
    }

    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If either side of the image is zero, the image has no channels, the size overflows
    /// `usize`, or the length of the pixel data does not match the image size, an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ifs_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 4],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = Self::data_len(size, data.len())?;
        if data.len() != expected {
            return Err(ImageError::InvalidDimensions {
                width: size.width as i64,
                height: size.height as i64,
                len: data.len(),
                expected,
            });
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The value every channel of every pixel is set to.
    ///
    /// # Examples
    ///
    /// ```
    /// use ifs_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert!(image.as_slice().iter().all(|&v| v == 0));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = Self::data_len(size, 0)?;
        Image::new(size, vec![val; len])
    }

    /// Create a new image filling every pixel with the same channel values.
    pub fn from_size_pixel(size: ImageSize, pixel: [T; CHANNELS]) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let len = Self::data_len(size, 0)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..size.area() {
            data.extend_from_slice(&pixel);
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
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

    /// Number of values in a single row.
    pub fn row_stride(&self) -> usize {
        self.size.width * CHANNELS
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

    /// Get the channel values of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let base = (y * self.width() + x) * CHANNELS;
        Some(&self.data[base..base + CHANNELS])
    }

    /// Get the mutable channel values of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let base = (y * self.width() + x) * CHANNELS;
        Some(&mut self.data[base..base + CHANNELS])
    }

    /// Get a single channel value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel or channel index is out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        match self.pixel(x, y) {
            Some(pixel) => Ok(&pixel[ch]),
            None => Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            )),
        }
    }

    /// Overwrite the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel is out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: [T; CHANNELS]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        let (width, height) = (self.width(), self.height());
        match self.pixel_mut(x, y) {
            Some(pixel) => {
                pixel.copy_from_slice(&value);
                Ok(())
            }
            None => Err(ImageError::PixelIndexOutOfBounds(x, y, width, height)),
        }
    }
}
