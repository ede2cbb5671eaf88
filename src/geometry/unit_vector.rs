use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

use crate::error::{EuclisError, GeometryError, Result};
use crate::math::{DenseVector3, Matrix3, ANGLE_SNAP_TOLERANCE, PARALLEL_TOLERANCE, TOLERANCE};
use crate::text::{self, CoordinateFormat};

use super::{Angle, CoordinateSystem, Plane, Point3D, Ray3D, Vector3D};

/// A normalized direction in 3D space.
///
/// Invariant: `x² + y² + z² = 1` within floating-point rounding. The only
/// public construction path normalizes its input and fails for near-zero
/// magnitudes, so every reachable value satisfies the invariant. All
/// operations return new values; additive operators widen to [`Vector3D`]
/// because sums and differences of unit vectors are not unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vector3D", try_from = "Vector3D"))]
pub struct UnitVector3D {
    x: f64,
    y: f64,
    z: f64,
}

impl UnitVector3D {
    /// The positive X direction.
    pub const X_AXIS: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// The positive Y direction.
    pub const Y_AXIS: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// The positive Z direction.
    pub const Z_AXIS: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a unit vector by normalizing `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDirection`] if the magnitude of the
    /// input is below machine epsilon.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let magnitude = ((x * x) + (y * y) + (z * z)).sqrt();
        if magnitude < f64::EPSILON {
            return Err(GeometryError::InvalidDirection { magnitude }.into());
        }
        Ok(Self {
            x: x / magnitude,
            y: y / magnitude,
            z: z / magnitude,
        })
    }

    /// Creates a unit vector from a slice of exactly 3 components.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not 3 or the components
    /// normalize to a degenerate direction.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        match components {
            [x, y, z] => Self::new(*x, *y, *z),
            _ => Err(GeometryError::InvalidComponentCount(components.len()).into()),
        }
    }

    /// Renormalizes a vector that is unit length up to floating drift.
    ///
    /// Callers must guarantee a non-degenerate input (rotation images,
    /// rotation-matrix columns, the orthogonal construction).
    pub(crate) fn renormalized(vector: Vector3D) -> Self {
        let magnitude = vector.norm();
        debug_assert!(
            magnitude > f64::EPSILON,
            "renormalized a near-zero vector"
        );
        Self {
            x: vector.x / magnitude,
            y: vector.y / magnitude,
            z: vector.z / magnitude,
        }
    }

    /// The X component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The Y component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The Z component.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// The Euclidean norm, definitionally 1. Not recomputed.
    #[must_use]
    pub const fn norm(&self) -> f64 {
        1.0
    }

    /// Returns some unit vector perpendicular to this one.
    ///
    /// The choice is deterministic but not continuous: nearby inputs on
    /// opposite sides of the branch threshold get distant results. Callers
    /// generating frames along a curve need a different construction.
    #[must_use]
    pub fn orthogonal(&self) -> UnitVector3D {
        // Both candidates are exactly perpendicular whenever non-zero; the
        // threshold selects the one with the larger magnitude.
        let candidate = if -self.x - self.y > 0.1 {
            Vector3D::new(self.z, self.z, -self.x - self.y)
        } else {
            Vector3D::new(-self.y - self.z, self.x, self.x)
        };
        if candidate.norm() < TOLERANCE {
            // The second formula degenerates only where the first does not
            // (x = 0, z = -y), so swapping is always safe.
            return Self::renormalized(Vector3D::new(self.z, self.z, -self.x - self.y));
        }
        Self::renormalized(candidate)
    }

    /// Returns the opposite direction.
    ///
    /// Exact sign flips cannot change the norm, so this stays a unit vector
    /// (the unary `-` operator instead widens to [`Vector3D`]).
    #[must_use]
    pub fn negate(&self) -> UnitVector3D {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Dot product of two unit directions, clamped to `[-1, 1]`.
    ///
    /// Rounding can push the raw product of mathematically bounded values
    /// slightly outside that range, which would turn a later `acos` into
    /// `NaN`. For the raw, unclamped product against a free vector, widen
    /// first: `u.to_vector().dot(&v)`.
    #[must_use]
    pub fn dot(&self, other: &UnitVector3D) -> f64 {
        let dp = (self.x * other.x) + (self.y * other.y) + (self.z * other.z);
        dp.clamp(-1.0, 1.0)
    }

    /// Cross product of two unit directions, renormalized back to unit
    /// length to absorb floating drift.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDirection`] if the operands are
    /// parallel or antiparallel: the cross product of parallel directions
    /// has no direction. Cross against a free vector widens instead:
    /// `u.to_vector().cross(&v)`.
    pub fn cross(&self, other: &UnitVector3D) -> Result<UnitVector3D> {
        self.to_vector().cross(&other.to_vector()).normalize()
    }

    /// The unsigned angle to another direction, in `[0, π]`.
    #[must_use]
    pub fn angle_to(&self, other: &UnitVector3D) -> Angle {
        Angle::from_radians(self.dot(other).acos())
    }

    /// The signed angle to `to` around the `about` axis, in `[-π, π]`.
    ///
    /// Both directions are projected onto the plane through the origin with
    /// normal `about`; the magnitude comes from the projected directions'
    /// dot product and the sign from their scalar triple product with the
    /// plane normal. Projected dots within `1e-15` of `±1` snap to exactly
    /// `0` or `π`, keeping `acos` off its domain edge.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UndefinedRotationAxis`] when `self` or `to`
    /// is parallel to `about` (tolerance `1e-6`): a signed angle around a
    /// degenerate axis is undefined.
    pub fn signed_angle_to(&self, to: &UnitVector3D, about: &UnitVector3D) -> Result<Angle> {
        if self.is_parallel_to(about, PARALLEL_TOLERANCE) {
            return Err(GeometryError::UndefinedRotationAxis { operand: "from" }.into());
        }
        if to.is_parallel_to(about, PARALLEL_TOLERANCE) {
            return Err(GeometryError::UndefinedRotationAxis { operand: "to" }.into());
        }

        let plane = Plane::new(Point3D::origin(), *about);
        let projected_from = plane.project_vector(&self.to_vector())?.direction();
        let projected_to = plane.project_vector(&to.to_vector())?.direction();

        let dp = projected_from.dot(&projected_to);
        if (dp - 1.0).abs() < ANGLE_SNAP_TOLERANCE {
            return Ok(Angle::ZERO);
        }
        if (dp + 1.0).abs() < ANGLE_SNAP_TOLERANCE {
            return Ok(Angle::from_radians(PI));
        }

        let angle = dp.acos();
        let sign = projected_from
            .cross(&projected_to)?
            .dot(plane.normal());
        Ok(Angle::from_radians(sign * angle))
    }

    /// Rotates this direction around an axis.
    ///
    /// The result is renormalized to absorb residual drift from the matrix
    /// transform.
    #[must_use]
    pub fn rotate(&self, about: &UnitVector3D, angle: Angle) -> UnitVector3D {
        let cs = CoordinateSystem::rotation(angle, about);
        Self::renormalized(cs.transform_vector(&self.to_vector()))
    }

    /// Tests whether this direction is parallel (or antiparallel) to
    /// another within `tolerance` on `|dot| ≈ 1`.
    #[must_use]
    pub fn is_parallel_to(&self, other: &UnitVector3D, tolerance: f64) -> bool {
        (1.0 - self.dot(other).abs()) < tolerance
    }

    /// Tests whether this direction is perpendicular to another within
    /// `tolerance` on `|dot| ≈ 0`.
    #[must_use]
    pub fn is_perpendicular_to(&self, other: &UnitVector3D, tolerance: f64) -> bool {
        self.dot(other).abs() < tolerance
    }

    /// Projects this direction onto another: `(self · uv) * uv`.
    ///
    /// The result is a free vector; its length is the (signed) cosine of
    /// the angle between the two directions.
    #[must_use]
    pub fn project_on(&self, uv: &UnitVector3D) -> Vector3D {
        uv.scale_by(self.dot(uv))
    }

    /// Projects this direction onto a plane.
    ///
    /// # Errors
    ///
    /// Returns an error if this direction is parallel to the plane normal
    /// (the in-plane component vanishes).
    pub fn project_on_plane(&self, plane: &Plane) -> Result<Ray3D> {
        plane.project_vector(&self.to_vector())
    }

    /// Returns this direction scaled by a factor.
    #[must_use]
    pub fn scale_by(&self, factor: f64) -> Vector3D {
        Vector3D::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Componentwise tolerance equality against any vector-like value.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative.
    pub fn equals(&self, other: impl Into<Vector3D>, tolerance: f64) -> Result<bool> {
        self.to_vector().equals(other, tolerance)
    }

    /// The outer product `u uᵀ` as a dense matrix.
    #[must_use]
    pub fn unit_tensor_product(&self) -> Matrix3 {
        let (x, y, z) = (self.x, self.y, self.z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        Matrix3::new(x * x, xy, xz, xy, y * y, yz, xz, yz, z * z)
    }

    /// The skew-symmetric matrix `[u]×` such that `[u]× v = u × v`.
    #[must_use]
    pub fn cross_product_matrix(&self) -> Matrix3 {
        Matrix3::new(
            0.0, -self.z, self.y, //
            self.z, 0.0, -self.x, //
            -self.y, self.x, 0.0,
        )
    }

    /// Transforms this direction through a coordinate system.
    ///
    /// Transforms are not guaranteed to preserve unit length, so the result
    /// widens to a free vector.
    #[must_use]
    pub fn transform_by(&self, cs: &CoordinateSystem) -> Vector3D {
        cs.transform_vector(&self.to_vector())
    }

    /// Transforms this direction by a 3x3 matrix. The result widens to a
    /// free vector; non-finite components from a degenerate matrix
    /// propagate untrapped.
    #[must_use]
    pub fn transform_by_matrix(&self, matrix: &Matrix3) -> Vector3D {
        self.to_vector().transform_by_matrix(matrix)
    }

    /// Widens to a free vector, losslessly.
    #[must_use]
    pub const fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }

    /// Reinterprets this direction as the position at unit distance from
    /// the origin.
    #[must_use]
    pub const fn to_point(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// Converts to a dense vector of the linear-algebra backend.
    #[must_use]
    pub fn to_dense(&self) -> DenseVector3 {
        DenseVector3::new(self.x, self.y, self.z)
    }

    /// Renders the direction with an explicit formatting configuration.
    #[must_use]
    pub fn format_with(&self, format: &CoordinateFormat) -> String {
        text::format_components(self.x, self.y, self.z, format)
    }
}

impl From<UnitVector3D> for Vector3D {
    fn from(unit: UnitVector3D) -> Vector3D {
        unit.to_vector()
    }
}

impl TryFrom<Vector3D> for UnitVector3D {
    type Error = EuclisError;

    fn try_from(vector: Vector3D) -> Result<Self> {
        vector.normalize()
    }
}

impl Add for UnitVector3D {
    type Output = Vector3D;

    fn add(self, rhs: UnitVector3D) -> Vector3D {
        self.to_vector() + rhs.to_vector()
    }
}

impl Add<Vector3D> for UnitVector3D {
    type Output = Vector3D;

    fn add(self, rhs: Vector3D) -> Vector3D {
        self.to_vector() + rhs
    }
}

impl Sub for UnitVector3D {
    type Output = Vector3D;

    fn sub(self, rhs: UnitVector3D) -> Vector3D {
        self.to_vector() - rhs.to_vector()
    }
}

impl Sub<Vector3D> for UnitVector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Vector3D) -> Vector3D {
        self.to_vector() - rhs
    }
}

impl Neg for UnitVector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        -self.to_vector()
    }
}

/// The one multiplicative exception: `u * u` is the clamped dot product,
/// not an elementwise scale.
impl Mul for UnitVector3D {
    type Output = f64;

    fn mul(self, rhs: UnitVector3D) -> f64 {
        self.dot(&rhs)
    }
}

impl Mul<UnitVector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, rhs: UnitVector3D) -> Vector3D {
        rhs.scale_by(self)
    }
}

/// Division by zero is not guarded: non-finite components propagate per
/// IEEE-754 semantics.
impl Div<f64> for UnitVector3D {
    type Output = Vector3D;

    fn div(self, rhs: f64) -> Vector3D {
        self.to_vector() / rhs
    }
}

impl PartialEq<Vector3D> for UnitVector3D {
    fn eq(&self, other: &Vector3D) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Hash for UnitVector3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(super::component_hash(self.x, self.y, self.z));
    }
}

impl fmt::Display for UnitVector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&CoordinateFormat::DEFAULT))
    }
}

impl FromStr for UnitVector3D {
    type Err = EuclisError;

    fn from_str(s: &str) -> Result<Self> {
        let [x, y, z] = text::parse_components(s)?;
        Self::new(x, y, z)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for UnitVector3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vector().abs_diff_eq(&other.to_vector(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for UnitVector3D {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vector()
            .relative_eq(&other.to_vector(), epsilon, max_relative)
    }
}
