//! Geometric image transformations using affine warps.
//!
//! Warps here resample by inverse mapping: the affine parameters map every destination
//! pixel to the source pixel it takes its value from, with nearest neighbour sampling.
//!
//! # Examples
//!
//! Shifting an image one pixel to the right:
//!
//! ```
//! use ifs_image::{ImageSize, PixelBuffer};
//! use ifs_imgproc::affine::AffineParameters;
//! use ifs_imgproc::warp::warp_affine;
//!
//! let src = PixelBuffer::from_size_val(ImageSize { width: 3, height: 3 }, 255).unwrap();
//! let dst = warp_affine(&src, &AffineParameters::translation(-1.0, 0.0)).unwrap();
//!
//! assert_eq!(dst.pixel(0, 0), Some(&[0u8, 0, 0, 0][..]));
//! assert_eq!(dst.pixel(1, 0), Some(&[255u8, 255, 255, 255][..]));
//! ```

mod affine;

pub use affine::{warp_affine, warp_affine_into};
pub(crate) use affine::source_pixel_index;

use ifs_image::ImageError;

use crate::parallel::ParallelError;

/// Errors returned by the strategy-driven warps.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The source or destination image is not valid for the warp.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The execution strategy could not be run.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
