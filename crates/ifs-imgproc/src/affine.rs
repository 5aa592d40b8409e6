/// Coefficients of a 2D affine map.
///
/// A point `(x, y)` is mapped to:
///
/// ```text
/// x' = a * x + b * y + e
/// y' = c * x + d * y + f
/// ```
///
/// so `[a b; c d]` is the linear part and `(e, f)` the translation. Singular matrices are
/// allowed; they only make the map non-invertible.
///
/// # Example
///
/// ```
/// use ifs_imgproc::affine::AffineParameters;
///
/// let m = AffineParameters::scale(2.0, 3.0).compose(&AffineParameters::translation(1.0, 1.0));
/// assert_eq!(m.apply(0.0, 0.0), (2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParameters {
    /// Contribution of x to x'.
    pub a: f32,
    /// Contribution of y to x'.
    pub b: f32,
    /// Contribution of x to y'.
    pub c: f32,
    /// Contribution of y to y'.
    pub d: f32,
    /// Translation along x.
    pub e: f32,
    /// Translation along y.
    pub f: f32,
}

impl Default for AffineParameters {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineParameters {
    /// Create the parameters from the six coefficients.
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The identity map.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation by `(tx, ty)`.
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// An axis aligned scaling.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A counter-clockwise rotation (in a y-up frame) about the origin, in radians.
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos, 0.0, 0.0)
    }

    /// A shear where x' gains `shx * y` and y' gains `shy * x`.
    pub const fn shear(shx: f32, shy: f32) -> Self {
        Self::new(1.0, shx, shy, 1.0, 0.0, 0.0)
    }

    /// Map the point `(x, y)`.
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.b * y + self.e,
            self.c * x + self.d * y + self.f,
        )
    }

    /// Returns the map `p -> self(other(p))`.
    pub fn compose(&self, other: &AffineParameters) -> AffineParameters {
        AffineParameters {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.a * other.e + self.b * other.f + self.e,
            f: self.c * other.e + self.d * other.f + self.f,
        }
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Whether all six coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// The inverse map, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<AffineParameters> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() || !self.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        let a = self.d * inv_det;
        let b = -self.b * inv_det;
        let c = -self.c * inv_det;
        let d = self.a * inv_det;

        Some(AffineParameters {
            a,
            b,
            c,
            d,
            e: -(a * self.e + b * self.f),
            f: -(c * self.e + d * self.f),
        })
    }

    /// Coefficients in `[a, b, c, d, e, f]` order.
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl From<[f32; 6]> for AffineParameters {
    fn from(m: [f32; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }
}

impl From<AffineParameters> for [f32; 6] {
    fn from(m: AffineParameters) -> Self {
        m.to_array()
    }
}
