/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image size is not positive or does not match the data length.
    #[error("Invalid dimensions {width}x{height}: data length is {len}, expected {expected}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: i64,
        /// Requested height in pixels.
        height: i64,
        /// Length of the provided pixel data.
        len: usize,
        /// Length required by the requested size.
        expected: usize,
    },

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: source is {0}x{1}, destination is {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),
}
