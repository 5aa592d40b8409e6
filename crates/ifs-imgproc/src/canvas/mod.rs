//! In-memory RGBA drawing surface.
//!
//! [`Canvas`] owns the pixels an IFS renderer draws into, together with a current affine
//! transform. Pixel regions are exchanged as [`PixelBuffer`]s through
//! [`Canvas::get_image_data`] and [`Canvas::put_image_data`], and buffers can be drawn
//! through the current transform with [`Canvas::draw_image`].
//!
//! # Example
//!
//! ```
//! use ifs_image::ImageSize;
//! use ifs_imgproc::canvas::{Canvas, PolarTransform};
//!
//! let mut canvas = Canvas::new(ImageSize { width: 64, height: 64 }).unwrap();
//! canvas.fill([255, 255, 255, 255]);
//!
//! let tile = canvas.get_image_data(0, 0, 64, 64).unwrap();
//! canvas.clear();
//! canvas.apply_polar(&PolarTransform::from_degrees(0.5, 0.5, 0.0, 0.0, 0.25, 0.25));
//! canvas.draw_image(&tile);
//!
//! assert_eq!(canvas.image().pixel(0, 0), Some(&[0u8, 0, 0, 0][..]));
//! assert_eq!(canvas.image().pixel(20, 20), Some(&[255u8, 255, 255, 255][..]));
//! ```

mod composite;
mod polar;

pub use polar::PolarTransform;

use ifs_image::{ImageError, ImageSize, PixelBuffer};

use crate::affine::AffineParameters;
use crate::warp::source_pixel_index;
use composite::source_over;

/// RGBA color with 8 bits per channel, not premultiplied.
pub type Rgba = [u8; 4];

/// Clip the span `[origin, origin + len)` to `[0, limit)`.
///
/// Returns the clipped start on the surface, the matching offset inside the span and the
/// clipped length.
fn clip_span(origin: i64, len: usize, limit: usize) -> Option<(usize, usize, usize)> {
    let start = origin.max(0);
    let end = origin.saturating_add(len as i64).min(limit as i64);
    if start >= end {
        return None;
    }

    Some((start as usize, (start - origin) as usize, (end - start) as usize))
}

/// An RGBA drawing surface with a current transform.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: PixelBuffer,
    transform: AffineParameters,
}

impl Canvas {
    /// Create a transparent canvas with the identity transform.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidDimensions` if either side is zero.
    pub fn new(size: ImageSize) -> Result<Self, ImageError> {
        Ok(Self::from_image(PixelBuffer::from_size_val(size, 0)?))
    }

    /// Wrap an existing pixel buffer as a canvas.
    pub fn from_image(image: PixelBuffer) -> Self {
        Self {
            image,
            transform: AffineParameters::identity(),
        }
    }

    /// Size of the surface in pixels.
    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    /// The pixels of the surface.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Consume the canvas and return its pixels.
    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    /// Make every pixel transparent black.
    pub fn clear(&mut self) {
        self.image.as_slice_mut().fill(0);
    }

    /// Blend a color over the whole surface.
    pub fn fill(&mut self, color: Rgba) {
        let size = self.size();
        self.fill_rect(0, 0, size.width as i64, size.height as i64, color);
    }

    /// Blend a color over a rectangle, clipped to the surface.
    ///
    /// The rectangle is in surface pixels and ignores the current transform. A rectangle with
    /// a non-positive side covers nothing.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgba) {
        if width <= 0 || height <= 0 {
            return;
        }

        let size = self.size();
        let (Some((x0, _, cols)), Some((y0, _, rows))) = (
            clip_span(x, width as usize, size.width),
            clip_span(y, height as usize, size.height),
        ) else {
            return;
        };

        for cy in y0..y0 + rows {
            for cx in x0..x0 + cols {
                if let Some(pixel) = self.image.pixel_mut(cx, cy) {
                    source_over(pixel, &color);
                }
            }
        }
    }

    /// Read a rectangle of pixels.
    ///
    /// The origin may lie anywhere; pixels of the rectangle that fall outside the surface
    /// read as transparent black.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidDimensions` if `width` or `height` is not positive.
    pub fn get_image_data(
        &self,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<PixelBuffer, ImageError> {
        let region = ImageSize::try_from([width, height])?;
        let mut out = PixelBuffer::from_size_val(region, 0)?;

        let size = self.size();
        let (Some((x0, local_x, cols)), Some((y0, local_y, rows))) = (
            clip_span(x, region.width, size.width),
            clip_span(y, region.height, size.height),
        ) else {
            return Ok(out);
        };

        let (src_stride, dst_stride) = (self.image.row_stride(), out.row_stride());
        let src = self.image.as_slice();
        let dst = out.as_slice_mut();

        for row in 0..rows {
            let src_base = (y0 + row) * src_stride + x0 * 4;
            let dst_base = (local_y + row) * dst_stride + local_x * 4;
            dst[dst_base..dst_base + cols * 4]
                .copy_from_slice(&src[src_base..src_base + cols * 4]);
        }

        Ok(out)
    }

    /// Write a buffer into the surface with its top-left corner at `(x, y)`.
    ///
    /// Pixels are replaced, not blended, and the current transform is ignored. Parts of the
    /// buffer outside the surface are dropped.
    pub fn put_image_data(&mut self, image: &PixelBuffer, x: i64, y: i64) {
        let size = self.size();
        let (Some((x0, local_x, cols)), Some((y0, local_y, rows))) = (
            clip_span(x, image.width(), size.width),
            clip_span(y, image.height(), size.height),
        ) else {
            log::trace!(
                "put_image_data: {} at ({x}, {y}) is off the surface",
                image.size()
            );
            return;
        };

        let (src_stride, dst_stride) = (image.row_stride(), self.image.row_stride());
        let src = image.as_slice();
        let dst = self.image.as_slice_mut();

        for row in 0..rows {
            let src_base = (local_y + row) * src_stride + local_x * 4;
            let dst_base = (y0 + row) * dst_stride + x0 * 4;
            dst[dst_base..dst_base + cols * 4]
                .copy_from_slice(&src[src_base..src_base + cols * 4]);
        }
    }

    /// The current transform, mapping image coordinates to surface coordinates.
    pub fn current_transform(&self) -> AffineParameters {
        self.transform
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, transform: AffineParameters) {
        self.transform = transform;
    }

    /// Reset the current transform to the identity.
    pub fn reset_transform(&mut self) {
        self.transform = AffineParameters::identity();
    }

    /// Multiply the current transform by `transform`.
    ///
    /// Points are mapped by `transform` first and then by the previous current transform.
    pub fn transform(&mut self, transform: &AffineParameters) {
        self.transform = self.transform.compose(transform);
    }

    /// Multiply the current transform by the coefficients of a polar transform, with the
    /// translation scaled by the size of this surface.
    pub fn apply_polar(&mut self, polar: &PolarTransform) {
        let m = polar.to_affine(self.size());
        self.transform(&m);
    }

    /// Draw a buffer through the current transform.
    ///
    /// Every surface pixel `(x, y)` samples the buffer at the floored inverse transform of
    /// `(x, y)` and the sample is blended source-over. Surface pixels that map outside the
    /// buffer are left as they are. A singular transform draws nothing.
    ///
    /// Returns the number of surface pixels that sampled the buffer.
    pub fn draw_image(&mut self, image: &PixelBuffer) -> usize {
        let Some(inv) = self.transform.inverse() else {
            log::warn!(
                "draw_image: current transform {:?} is not invertible",
                self.transform
            );
            return 0;
        };

        let (width, height) = (image.width(), image.height());
        let src = image.as_slice();
        let stride = self.image.row_stride();

        let mut drawn = 0;
        let rows = self.image.as_slice_mut().chunks_exact_mut(stride);
        for (y, row) in rows.enumerate() {
            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let (u, v) = inv.apply(x as f32, y as f32);
                if let Some((sx, sy)) = source_pixel_index(u, v, width, height) {
                    let base = (sy * width + sx) * 4;
                    source_over(pixel, &src[base..base + 4]);
                    drawn += 1;
                }
            }
        }

        log::debug!(
            "draw_image: {} sampled {} surface pixels",
            image.size(),
            drawn
        );

        drawn
    }
}
