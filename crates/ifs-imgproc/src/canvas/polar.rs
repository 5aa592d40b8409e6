use ifs_image::ImageSize;

use crate::affine::AffineParameters;

/// Affine map described by polar-style parameters.
///
/// This is the usual way IFS maps are tabulated: the x axis is scaled by `r` and rotated
/// by `theta`, the y axis is scaled by `s` and rotated by `phi`, and the translation is given
/// as a fraction of the canvas size.
///
/// | a = r cos(theta) | b = -s sin(phi) | e = e * width  |
/// | c = r sin(theta) | d =  s cos(phi) | f = f * height |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarTransform {
    /// Scale of the x axis.
    pub r: f32,
    /// Scale of the y axis.
    pub s: f32,
    /// Rotation of the x axis, in radians.
    pub theta: f32,
    /// Rotation of the y axis, in radians.
    pub phi: f32,
    /// Translation along x as a fraction of the canvas width.
    pub e: f32,
    /// Translation along y as a fraction of the canvas height.
    pub f: f32,
}

impl Default for PolarTransform {
    fn default() -> Self {
        Self {
            r: 1.0,
            s: 1.0,
            theta: 0.0,
            phi: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl PolarTransform {
    /// Create the parameters with the angles given in degrees.
    pub fn from_degrees(r: f32, s: f32, theta: f32, phi: f32, e: f32, f: f32) -> Self {
        Self {
            r,
            s,
            theta: theta.to_radians(),
            phi: phi.to_radians(),
            e,
            f,
        }
    }

    /// Compute the affine coefficients for a canvas of the given size.
    ///
    /// # Example
    ///
    /// ```
    /// use ifs_image::ImageSize;
    /// use ifs_imgproc::canvas::PolarTransform;
    ///
    /// let polar = PolarTransform { e: 0.5, f: 0.25, ..Default::default() };
    /// let m = polar.to_affine(ImageSize { width: 200, height: 100 });
    ///
    /// assert_eq!(m.e, 100.0);
    /// assert_eq!(m.f, 25.0);
    /// ```
    pub fn to_affine(&self, size: ImageSize) -> AffineParameters {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();

        AffineParameters {
            a: self.r * cos_theta,
            b: -self.s * sin_phi,
            c: self.r * sin_theta,
            d: self.s * cos_phi,
            e: self.e * size.width as f32,
            f: self.f * size.height as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIZE: ImageSize = ImageSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn default_is_identity() {
        let m = PolarTransform::default().to_affine(SIZE);
        assert_eq!(m.to_array().map(|v| v.abs()), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn coefficients() {
        let polar = PolarTransform::from_degrees(0.5, 0.25, 90.0, 30.0, 0.1, 0.2);
        let m = polar.to_affine(SIZE);

        assert_relative_eq!(m.a, 0.0, epsilon = 1e-6);
        assert_relative_eq!(m.b, -0.125, epsilon = 1e-6);
        assert_relative_eq!(m.c, 0.5, epsilon = 1e-6);
        assert_relative_eq!(m.d, 0.25 * 3f32.sqrt() / 2.0, epsilon = 1e-6);
        assert_relative_eq!(m.e, 64.0, epsilon = 1e-4);
        assert_relative_eq!(m.f, 96.0, epsilon = 1e-4);
    }

    #[test]
    fn equal_angles_are_a_similarity() {
        // with r == s and theta == phi the map is a rotation plus uniform scale
        let polar = PolarTransform::from_degrees(0.7, 0.7, 40.0, 40.0, 0.0, 0.0);
        let m = polar.to_affine(SIZE);
        let expected = AffineParameters::rotation(40f32.to_radians())
            .compose(&AffineParameters::scale(0.7, 0.7));

        m.to_array()
            .iter()
            .zip(expected.to_array().iter())
            .for_each(|(l, r)| assert_relative_eq!(l, r, epsilon = 1e-6));
    }
}
