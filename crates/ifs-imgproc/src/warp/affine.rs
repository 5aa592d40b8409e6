use ifs_image::{Image, ImageError};

use super::WarpError;
use crate::affine::AffineParameters;
use crate::parallel::{self, ExecutionStrategy};

/// Floor a mapped coordinate pair and check it against the source bounds.
///
/// Non-finite coordinates are out of bounds.
#[inline]
pub(crate) fn source_pixel_index(
    u: f32,
    v: f32,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let (u, v) = (u.floor(), v.floor());

    // written so that NaN fails the check
    if !(u >= 0.0 && v >= 0.0 && u < width as f32 && v < height as f32) {
        return None;
    }

    Some((u as usize, v as usize))
}

/// Resample one destination row, returning how many pixels mapped inside the source.
fn warp_row<T: Copy, const C: usize>(
    src: &Image<T, C>,
    m: &AffineParameters,
    y: usize,
    dst_row: &mut [T],
) -> usize {
    let (width, height) = (src.width(), src.height());
    let src_data = src.as_slice();

    let mut mapped = 0;
    for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
        let (u, v) = m.apply(x as f32, y as f32);
        let Some((sx, sy)) = source_pixel_index(u, v, width, height) else {
            continue;
        };

        let base = (sy * width + sx) * C;
        dst_pixel.copy_from_slice(&src_data[base..base + C]);
        mapped += 1;
    }

    mapped
}

/// Applies an affine transformation to an image by inverse mapping.
///
/// For every destination pixel `(x, y)` the source pixel is
/// `(floor(a*x + b*y + e), floor(c*x + d*y + f))`. When it lies inside the source, all its
/// channels are copied; otherwise the destination pixel keeps the zero value it was
/// allocated with.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `params` - The affine map from destination to source coordinates.
///
/// # Returns
///
/// A new image with the same size as the input.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if the source has a zero side.
///
/// # Example
///
/// ```
/// use ifs_image::{ImageSize, PixelBuffer};
/// use ifs_imgproc::affine::AffineParameters;
/// use ifs_imgproc::warp::warp_affine;
///
/// let src = PixelBuffer::new(
///     ImageSize { width: 2, height: 1 },
///     vec![255, 0, 0, 255, 0, 0, 255, 255],
/// ).unwrap();
///
/// let dst = warp_affine(&src, &AffineParameters::identity()).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp_affine<T, const C: usize>(
    src: &Image<T, C>,
    params: &AffineParameters,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default,
{
    let size = src.size();
    if size.is_empty() {
        return Err(ImageError::InvalidDimensions {
            width: size.width as i64,
            height: size.height as i64,
            len: src.as_slice().len(),
            expected: size.area() * C,
        });
    }

    let mut dst = Image::from_size_val(size, T::default())?;
    let stride = dst.row_stride();

    let mapped: usize = dst
        .as_slice_mut()
        .chunks_exact_mut(stride)
        .enumerate()
        .map(|(y, row)| warp_row(src, params, y, row))
        .sum();

    log::debug!(
        "warp_affine: {} of {} pixels mapped inside {}",
        mapped,
        size.area(),
        size
    );

    Ok(dst)
}

/// Applies an affine transformation to an image, writing into an existing destination.
///
/// Destination pixels whose source coordinate falls outside the source are left untouched,
/// so the caller decides the background by how `dst` was initialized.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image, same size as the input.
/// * `params` - The affine map from destination to source coordinates.
/// * `strategy` - How the rows are scheduled. Every strategy gives the same result.
///
/// # Returns
///
/// The number of destination pixels that were written.
///
/// # Errors
///
/// Returns an error if the sizes differ or the strategy cannot be run.
pub fn warp_affine_into<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    params: &AffineParameters,
    strategy: ExecutionStrategy,
) -> Result<usize, WarpError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    let mapped =
        parallel::for_each_row(dst, strategy, |y, row| warp_row(src, params, y, row))?;

    log::trace!("warp_affine_into: {mapped} pixels written with {strategy:?}");

    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifs_image::{ImageSize, PixelBuffer};
    use rand::{Rng, SeedableRng};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn numbered(width: usize, height: usize) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| [i as u8, (i * 3) as u8, 7, 255])
            .collect();
        PixelBuffer::new(ImageSize { width, height }, data).unwrap()
    }

    #[test]
    fn warp_affine_identity_red_blue() -> Result<(), ImageError> {
        let mut src = PixelBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        src.set_pixel(0, 0, RED)?;
        src.set_pixel(1, 1, BLUE)?;

        let dst = warp_affine(&src, &AffineParameters::identity())?;

        assert_eq!(dst.size(), src.size());
        assert_eq!(
            dst.as_slice(),
            &[255, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255]
        );

        Ok(())
    }

    #[test]
    fn warp_affine_identity_non_square() -> Result<(), ImageError> {
        let src = numbered(5, 3);
        let dst = warp_affine(&src, &AffineParameters::identity())?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn warp_affine_scale_two() -> Result<(), ImageError> {
        let mut src = PixelBuffer::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        src.set_pixel(0, 0, RED)?;
        src.set_pixel(2, 0, BLUE)?;

        let dst = warp_affine(&src, &AffineParameters::scale(2.0, 2.0))?;

        assert_eq!(dst.pixel(0, 0), Some(&RED[..]));
        assert_eq!(dst.pixel(1, 0), Some(&BLUE[..]));
        for y in 0..4 {
            for x in 0..4 {
                if x >= 2 || y >= 2 {
                    assert_eq!(dst.pixel(x, y), Some(&CLEAR[..]), "pixel ({x}, {y})");
                }
            }
        }

        Ok(())
    }

    #[test]
    fn warp_affine_translation() -> Result<(), ImageError> {
        let src = numbered(3, 3);

        // srcX = x - 1: content moves one column right
        let right = warp_affine(&src, &AffineParameters::translation(-1.0, 0.0))?;
        // srcX = x + 1: content moves one column left
        let left = warp_affine(&src, &AffineParameters::translation(1.0, 0.0))?;

        for y in 0..3 {
            assert_eq!(right.pixel(0, y), Some(&CLEAR[..]));
            assert_eq!(left.pixel(2, y), Some(&CLEAR[..]));
            for x in 1..3 {
                assert_eq!(right.pixel(x, y), src.pixel(x - 1, y));
                assert_eq!(left.pixel(x - 1, y), src.pixel(x, y));
            }
        }

        Ok(())
    }

    #[test]
    fn warp_affine_bounds_use_matching_dimension() -> Result<(), ImageError> {
        // wide image: y must be checked against the height, not the width
        let src = PixelBuffer::from_size_val(
            ImageSize {
                width: 4,
                height: 2,
            },
            200,
        )?;

        // swap the axes so that dst (x, y) samples src (y, x)
        let swap = AffineParameters::new(0.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let dst = warp_affine(&src, &swap)?;

        // dst (0..2, 0..2) samples src rows 0..2: in bounds
        assert_eq!(dst.pixel(1, 1), Some(&[200u8; 4][..]));
        // dst (2, 0) samples src row 2, which does not exist
        assert_eq!(dst.pixel(2, 0), Some(&CLEAR[..]));
        assert_eq!(dst.pixel(3, 1), Some(&CLEAR[..]));

        Ok(())
    }

    #[test]
    fn warp_affine_floor_negative() -> Result<(), ImageError> {
        let src = numbered(3, 1);
        // x - 0.5 floors to -1 at x = 0, which must be out of bounds rather than 0
        let dst = warp_affine(&src, &AffineParameters::translation(-0.5, 0.0))?;
        assert_eq!(dst.pixel(0, 0), Some(&CLEAR[..]));
        assert_eq!(dst.pixel(1, 0), src.pixel(0, 0));
        assert_eq!(dst.pixel(2, 0), src.pixel(1, 0));
        Ok(())
    }

    #[test]
    fn warp_affine_singular_and_non_finite() -> Result<(), ImageError> {
        let src = numbered(3, 2);

        // every pixel collapses onto src (1, 1)
        let collapse = AffineParameters::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        let dst = warp_affine(&src, &collapse)?;
        dst.as_slice()
            .chunks_exact(4)
            .for_each(|p| assert_eq!(Some(p), src.pixel(1, 1)));

        let nan = AffineParameters::translation(f32::NAN, 0.0);
        let dst = warp_affine(&src, &nan)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0));

        let inf = AffineParameters::scale(f32::INFINITY, 1.0);
        let dst = warp_affine(&src, &inf)?;
        assert_eq!(dst.pixel(0, 0), Some(&CLEAR[..]));

        Ok(())
    }

    #[test]
    fn warp_affine_outputs_are_source_pixels_or_clear() -> Result<(), ImageError> {
        let src = numbered(8, 6);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..32 {
            let m = AffineParameters::new(
                rng.random_range(-2.0..2.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(-8.0..8.0),
                rng.random_range(-8.0..8.0),
            );
            let dst = warp_affine(&src, &m)?;

            for pixel in dst.as_slice().chunks_exact(4) {
                let is_source = src.as_slice().chunks_exact(4).any(|s| s == pixel);
                assert!(pixel == CLEAR || is_source, "{pixel:?} from {m:?}");
            }
        }

        Ok(())
    }

    #[test]
    fn warp_affine_deterministic() -> Result<(), ImageError> {
        let src = numbered(7, 5);
        let m = AffineParameters::rotation(0.3).compose(&AffineParameters::shear(0.2, 0.0));

        let first = warp_affine(&src, &m)?;
        let second = warp_affine(&src, &m)?;
        assert_eq!(first.as_slice(), second.as_slice());

        Ok(())
    }

    #[test]
    fn warp_affine_into_strategies_agree() -> Result<(), WarpError> {
        let src = numbered(9, 7);
        let m = AffineParameters::new(0.9, -0.3, 0.3, 0.9, 1.5, -0.5);
        let expected = warp_affine(&src, &m)?;

        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Fixed(3),
        ] {
            let mut dst = PixelBuffer::from_size_val(src.size(), 0)?;
            warp_affine_into(&src, &mut dst, &m, strategy)?;
            assert_eq!(dst, expected, "{strategy:?}");
        }

        Ok(())
    }

    #[test]
    fn warp_affine_into_keeps_background() -> Result<(), WarpError> {
        let src = numbered(3, 3);
        let mut dst = PixelBuffer::from_size_pixel(src.size(), [1, 2, 3, 4])?;

        let written = warp_affine_into(
            &src,
            &mut dst,
            &AffineParameters::translation(-1.0, 0.0),
            ExecutionStrategy::Serial,
        )?;

        assert_eq!(written, 6);
        assert_eq!(dst.pixel(0, 2), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(dst.pixel(1, 2), src.pixel(0, 2));

        Ok(())
    }

    #[test]
    fn warp_affine_into_size_mismatch() -> Result<(), ImageError> {
        let src = numbered(3, 3);
        let mut dst = PixelBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;

        let res = warp_affine_into(
            &src,
            &mut dst,
            &AffineParameters::identity(),
            ExecutionStrategy::Serial,
        );
        assert_eq!(
            res,
            Err(WarpError::Image(ImageError::InvalidImageSize(3, 3, 2, 3)))
        );

        Ok(())
    }
}
