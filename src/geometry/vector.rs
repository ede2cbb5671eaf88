use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

use crate::error::{EuclisError, GeometryError, Result};
use crate::math::{DenseVector3, Matrix3};
use crate::text::{self, CoordinateFormat};

use super::{Angle, CoordinateSystem, Point3D, UnitVector3D};

/// A free vector in 3D space: magnitude and direction, not normalized.
///
/// Related to [`UnitVector3D`] by a lossless widening conversion in one
/// direction and explicit (fallible) normalization in the other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector from a slice of exactly 3 components.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not 3.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        match components {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(GeometryError::InvalidComponentCount(components.len()).into()),
        }
    }

    /// Returns the components as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Returns the squared Euclidean norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        (self.x * self.x) + (self.y * self.y) + (self.z * self.z)
    }

    /// Normalizes this vector into a unit direction.
    ///
    /// This is the only path from a free vector to a [`UnitVector3D`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDirection`] if the magnitude is below
    /// machine epsilon: no direction can be derived from a near-zero vector.
    pub fn normalize(&self) -> Result<UnitVector3D> {
        UnitVector3D::new(self.x, self.y, self.z)
    }

    /// Raw, unclamped dot product.
    #[must_use]
    pub fn dot(&self, other: &Vector3D) -> f64 {
        (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
    }

    /// Cross product. The result is not renormalized.
    #[must_use]
    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }

    /// Returns this vector scaled by a factor.
    #[must_use]
    pub fn scale_by(&self, factor: f64) -> Vector3D {
        Vector3D::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// The unsigned angle to another vector, in `[0, π]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector has near-zero magnitude.
    pub fn angle_to(&self, other: &Vector3D) -> Result<Angle> {
        Ok(self.normalize()?.angle_to(&other.normalize()?))
    }

    /// The signed angle to another vector around the `about` axis, in `[-π, π]`.
    ///
    /// Both operands are normalized first; see
    /// [`UnitVector3D::signed_angle_to`] for the sign convention.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is degenerate or parallel to the
    /// rotation axis.
    pub fn signed_angle_to(&self, other: &Vector3D, about: &UnitVector3D) -> Result<Angle> {
        self.normalize()?.signed_angle_to(&other.normalize()?, about)
    }

    /// Tests whether this vector is parallel (or antiparallel) to another,
    /// comparing normalized directions within `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector has near-zero magnitude.
    pub fn is_parallel_to(&self, other: &Vector3D, tolerance: f64) -> Result<bool> {
        Ok(self
            .normalize()?
            .is_parallel_to(&other.normalize()?, tolerance))
    }

    /// Tests whether this vector is perpendicular to another, comparing
    /// normalized directions within `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector has near-zero magnitude.
    pub fn is_perpendicular_to(&self, other: &Vector3D, tolerance: f64) -> Result<bool> {
        Ok(self
            .normalize()?
            .is_perpendicular_to(&other.normalize()?, tolerance))
    }

    /// Projects this vector onto a direction: `(self · uv) * uv`.
    #[must_use]
    pub fn project_on(&self, uv: &UnitVector3D) -> Vector3D {
        uv.scale_by(self.dot(&uv.to_vector()))
    }

    /// Rotates this vector around an axis. Magnitude is preserved.
    #[must_use]
    pub fn rotate(&self, about: &UnitVector3D, angle: Angle) -> Vector3D {
        CoordinateSystem::rotation(angle, about).transform_vector(self)
    }

    /// Componentwise tolerance equality against any vector-like value.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative.
    pub fn equals(&self, other: impl Into<Vector3D>, tolerance: f64) -> Result<bool> {
        if tolerance < 0.0 {
            return Err(GeometryError::NegativeTolerance(tolerance).into());
        }
        let other = other.into();
        Ok((other.x - self.x).abs() < tolerance
            && (other.y - self.y).abs() < tolerance
            && (other.z - self.z).abs() < tolerance)
    }

    /// Transforms this vector through a coordinate system (rotation only;
    /// vectors are unaffected by the origin offset).
    #[must_use]
    pub fn transform_by(&self, cs: &CoordinateSystem) -> Vector3D {
        cs.transform_vector(self)
    }

    /// Transforms this vector by a 3x3 matrix.
    ///
    /// A degenerate matrix can produce non-finite components; they propagate
    /// untrapped.
    #[must_use]
    pub fn transform_by_matrix(&self, matrix: &Matrix3) -> Vector3D {
        Self::from_dense(&(matrix * self.to_dense()))
    }

    /// Converts to a dense vector of the linear-algebra backend.
    #[must_use]
    pub fn to_dense(&self) -> DenseVector3 {
        DenseVector3::new(self.x, self.y, self.z)
    }

    /// Builds a vector from a dense backend vector.
    #[must_use]
    pub fn from_dense(dense: &DenseVector3) -> Self {
        Self::new(dense.x, dense.y, dense.z)
    }

    /// Reinterprets this vector as a position.
    #[must_use]
    pub fn to_point(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// Renders the vector with an explicit formatting configuration.
    #[must_use]
    pub fn format_with(&self, format: &CoordinateFormat) -> String {
        text::format_components(self.x, self.y, self.z, format)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<UnitVector3D> for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: UnitVector3D) -> Vector3D {
        self + rhs.to_vector()
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<UnitVector3D> for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: UnitVector3D) -> Vector3D {
        self - rhs.to_vector()
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Vector3D {
        self.scale_by(rhs)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, rhs: Vector3D) -> Vector3D {
        rhs.scale_by(self)
    }
}

/// Division by zero is not guarded: non-finite components propagate per
/// IEEE-754 semantics.
impl Div<f64> for Vector3D {
    type Output = Vector3D;

    fn div(self, rhs: f64) -> Vector3D {
        Vector3D::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl PartialEq<UnitVector3D> for Vector3D {
    fn eq(&self, other: &UnitVector3D) -> bool {
        self.x == other.x() && self.y == other.y() && self.z == other.z()
    }
}

impl Hash for Vector3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(super::component_hash(self.x, self.y, self.z));
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&CoordinateFormat::DEFAULT))
    }
}

impl FromStr for Vector3D {
    type Err = EuclisError;

    fn from_str(s: &str) -> Result<Self> {
        let [x, y, z] = text::parse_components(s)?;
        Ok(Self::new(x, y, z))
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Vector3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Vector3D {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f64::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D::new(x, y, z)
    }

    #[test]
    fn norm_and_norm_squared() {
        let a = v(1.0, 2.0, 2.0);
        assert_abs_diff_eq!(a.norm(), 3.0);
        assert_abs_diff_eq!(a.norm_squared(), 9.0);
    }

    #[test]
    fn from_slice_requires_three_components() {
        assert!(Vector3D::from_slice(&[1.0, 2.0, 3.0]).is_ok());
        assert!(Vector3D::from_slice(&[1.0, 2.0]).is_err());
        assert!(Vector3D::from_slice(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert!(v(0.0, 0.0, 0.0).normalize().is_err());
        assert!(v(1e-300, 0.0, 0.0).normalize().is_err());
    }

    #[test]
    fn dot_and_cross() {
        let a = v(1.0, 0.0, 0.0);
        let b = v(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(a.dot(&b), 0.0);
        assert_abs_diff_eq!(a.cross(&b), v(0.0, 0.0, 1.0));
        // cross of a free vector is not renormalized
        let long = v(2.0, 0.0, 0.0);
        assert_abs_diff_eq!(long.cross(&v(0.0, 3.0, 0.0)), v(0.0, 0.0, 6.0));
    }

    #[test]
    fn operator_algebra() {
        let a = v(1.0, 2.0, 3.0);
        let b = v(0.5, 0.5, 0.5);
        assert_eq!(a + b, v(1.5, 2.5, 3.5));
        assert_eq!(a - b, v(0.5, 1.5, 2.5));
        assert_eq!(-a, v(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, v(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, v(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, v(0.5, 1.0, 1.5));
    }

    #[test]
    fn division_by_zero_propagates_non_finite() {
        let q = v(1.0, -1.0, 0.0) / 0.0;
        assert!(q.x.is_infinite());
        assert!(q.y.is_infinite());
        assert!(q.z.is_nan());
    }

    #[test]
    fn mixed_unit_vector_addition_widens() {
        let a = v(1.0, 2.0, 3.0);
        let x = UnitVector3D::X_AXIS;
        assert_eq!(a + x, v(2.0, 2.0, 3.0));
        assert_eq!(a - x, v(0.0, 2.0, 3.0));
    }

    #[test]
    fn angle_to_self_and_opposite() {
        let a = v(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(a.angle_to(&a).unwrap().radians(), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(a.angle_to(&-a).unwrap().radians(), PI, epsilon = 1e-7);
        assert!(a.angle_to(&v(0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn rotate_preserves_magnitude() {
        let a = v(3.0, 0.0, 0.0);
        let rotated = a.rotate(&UnitVector3D::Z_AXIS, Angle::from_radians(FRAC_PI_2));
        assert_relative_eq!(rotated, v(0.0, 3.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.norm(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn project_on_direction() {
        let a = v(2.0, 2.0, 0.0);
        assert_abs_diff_eq!(a.project_on(&UnitVector3D::X_AXIS), v(2.0, 0.0, 0.0));
    }

    #[test]
    fn parallel_and_perpendicular() {
        let a = v(1.0, 0.0, 0.0);
        assert!(a.is_parallel_to(&v(3.0, 0.0, 0.0), 1e-6).unwrap());
        assert!(a.is_parallel_to(&v(-3.0, 0.0, 0.0), 1e-6).unwrap());
        assert!(!a.is_parallel_to(&v(1.0, 1.0, 0.0), 1e-6).unwrap());
        assert!(a.is_perpendicular_to(&v(0.0, 5.0, 0.0), 1e-6).unwrap());
        assert!(a.is_parallel_to(&v(0.0, 0.0, 0.0), 1e-6).is_err());
    }

    #[test]
    fn tolerance_equality() {
        let a = v(1.0, 0.0, 0.0);
        assert!(a.equals(v(1.0, 0.0, 1e-7), 1e-3).unwrap());
        assert!(!a.equals(v(1.0, 0.0, 1e-7), 1e-9).unwrap());
        assert!(a.equals(v(1.0, 0.0, 0.0), -1.0).is_err());
    }

    #[test]
    fn cross_type_exact_equality() {
        assert_eq!(v(1.0, 0.0, 0.0), UnitVector3D::X_AXIS);
        assert_ne!(v(1.0, 0.0, 1e-7), UnitVector3D::X_AXIS);
    }

    #[test]
    fn display_and_parse_round_trip() {
        let a = v(1.25, -2.5, 3.0);
        assert_eq!(a.to_string(), "(1.25, -2.5, 3)");
        let parsed: Vector3D = a.to_string().parse().unwrap();
        assert_eq!(parsed, a);
    }

    #[test]
    fn transform_by_matrix_scales() {
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0);
        assert_abs_diff_eq!(v(1.0, 2.0, 3.0).transform_by_matrix(&m), v(2.0, 4.0, 6.0));
    }
}
