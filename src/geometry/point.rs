use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

use crate::error::{EuclisError, GeometryError, Result};
use crate::text::{self, CoordinateFormat};

use super::{UnitVector3D, Vector3D};

/// A position in 3D space.
///
/// Structurally identical to a vector but semantically distinct: points
/// are not directions and cannot be added together; they combine with
/// vector offsets instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin, `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Creates a point from a slice of exactly 3 coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not 3.
    pub fn from_slice(coordinates: &[f64]) -> Result<Self> {
        match coordinates {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(GeometryError::InvalidComponentCount(coordinates.len()).into()),
        }
    }

    /// Returns the coordinates as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        (*other - *self).norm()
    }

    /// The point halfway between this point and another.
    #[must_use]
    pub fn midpoint(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// The displacement of this point from the origin.
    #[must_use]
    pub const fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }

    /// Coordinatewise tolerance equality.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative.
    pub fn equals(&self, other: &Point3D, tolerance: f64) -> Result<bool> {
        self.to_vector().equals(other.to_vector(), tolerance)
    }

    /// Renders the point with an explicit formatting configuration.
    #[must_use]
    pub fn format_with(&self, format: &CoordinateFormat) -> String {
        text::format_components(self.x, self.y, self.z, format)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<UnitVector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: UnitVector3D) -> Point3D {
        self + rhs.to_vector()
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Point3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<Vector3D> for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Vector3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Hash for Point3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(super::component_hash(self.x, self.y, self.z));
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&CoordinateFormat::DEFAULT))
    }
}

impl FromStr for Point3D {
    type Err = EuclisError;

    fn from_str(s: &str) -> Result<Self> {
        let [x, y, z] = text::parse_components(s)?;
        Ok(Self::new(x, y, z))
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Point3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vector().abs_diff_eq(&other.to_vector(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Point3D {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vector()
            .relative_eq(&other.to_vector(), epsilon, max_relative)
    }
}
