use std::fmt;

use crate::math::TOLERANCE;

use super::{Point3D, UnitVector3D, Vector3D};

/// A ray: a point and a unit direction away from it.
///
/// Parametric form: `P(t) = through_point + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray3D {
    through_point: Point3D,
    direction: UnitVector3D,
}

impl Ray3D {
    /// Creates a new ray.
    #[must_use]
    pub const fn new(through_point: Point3D, direction: UnitVector3D) -> Self {
        Self {
            through_point,
            direction,
        }
    }

    /// The point the ray passes through.
    #[must_use]
    pub const fn through_point(&self) -> Point3D {
        self.through_point
    }

    /// The unit direction of the ray.
    #[must_use]
    pub const fn direction(&self) -> UnitVector3D {
        self.direction
    }

    /// Evaluates the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3D {
        self.through_point + self.direction.scale_by(t)
    }

    /// Tests whether two rays lie on the same line, within `tolerance` on
    /// the parallelism checks.
    #[must_use]
    pub fn is_collinear_with(&self, other: &Ray3D, tolerance: f64) -> bool {
        if !self.direction.is_parallel_to(&other.direction, tolerance) {
            return false;
        }
        let offset: Vector3D = other.through_point - self.through_point;
        if offset.norm() < TOLERANCE {
            return true;
        }
        match offset.normalize() {
            Ok(offset_direction) => self.direction.is_parallel_to(&offset_direction, tolerance),
            Err(_) => true,
        }
    }
}

impl fmt::Display for Ray3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.through_point, self.direction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_at_walks_the_ray() {
        let ray = Ray3D::new(Point3D::new(1.0, 0.0, 0.0), UnitVector3D::Z_AXIS);
        assert_eq!(ray.point_at(0.0), Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(2.5), Point3D::new(1.0, 0.0, 2.5));
        assert_eq!(ray.point_at(-1.0), Point3D::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn collinearity() {
        let ray = Ray3D::new(Point3D::origin(), UnitVector3D::X_AXIS);
        let same_line = Ray3D::new(
            Point3D::new(5.0, 0.0, 0.0),
            UnitVector3D::X_AXIS.negate(),
        );
        assert!(ray.is_collinear_with(&same_line, 1e-6));

        let offset = Ray3D::new(Point3D::new(0.0, 1.0, 0.0), UnitVector3D::X_AXIS);
        assert!(!ray.is_collinear_with(&offset, 1e-6));

        let skew = Ray3D::new(Point3D::origin(), UnitVector3D::Y_AXIS);
        assert!(!ray.is_collinear_with(&skew, 1e-6));
    }
}
