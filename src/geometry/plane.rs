use crate::error::Result;

use super::{Point3D, Ray3D, UnitVector3D, Vector3D};

/// An infinite plane defined by a point on it and its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    root_point: Point3D,
    normal: UnitVector3D,
}

impl Plane {
    /// Creates a plane through `root_point` with the given normal.
    #[must_use]
    pub const fn new(root_point: Point3D, normal: UnitVector3D) -> Self {
        Self { root_point, normal }
    }

    /// The point the plane passes through.
    #[must_use]
    pub const fn root_point(&self) -> Point3D {
        self.root_point
    }

    /// The unit normal of the plane.
    #[must_use]
    pub const fn normal(&self) -> &UnitVector3D {
        &self.normal
    }

    /// Signed distance from a point to the plane.
    /// Positive on the normal side, negative opposite.
    #[must_use]
    pub fn signed_distance_to(&self, point: &Point3D) -> f64 {
        (*point - self.root_point).dot(&self.normal.to_vector())
    }

    /// Orthogonal projection of a point onto the plane.
    #[must_use]
    pub fn project_point(&self, point: &Point3D) -> Point3D {
        *point - self.normal.scale_by(self.signed_distance_to(point))
    }

    /// Projects a vector onto the plane, returning the ray through the
    /// projected origin with the in-plane direction of the vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is parallel to the plane normal: its
    /// in-plane component vanishes and no direction remains.
    pub fn project_vector(&self, vector: &Vector3D) -> Result<Ray3D> {
        let normal = self.normal.to_vector();
        let in_plane = *vector - normal.scale_by(vector.dot(&normal));
        let direction = in_plane.normalize()?;
        Ok(Ray3D::new(self.project_point(&Point3D::origin()), direction))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn xy_plane_at(height: f64) -> Plane {
        Plane::new(p(0.0, 0.0, height), UnitVector3D::Z_AXIS)
    }

    #[test]
    fn signed_distance() {
        let plane = xy_plane_at(1.0);
        assert_abs_diff_eq!(plane.signed_distance_to(&p(0.0, 0.0, 3.0)), 2.0);
        assert_abs_diff_eq!(plane.signed_distance_to(&p(5.0, -2.0, 0.0)), -1.0);
        assert_abs_diff_eq!(plane.signed_distance_to(&p(7.0, 7.0, 1.0)), 0.0);
    }

    #[test]
    fn project_point_lands_on_plane() {
        let plane = xy_plane_at(2.0);
        let projected = plane.project_point(&p(1.0, 2.0, 5.0));
        assert_eq!(projected, p(1.0, 2.0, 2.0));
        assert_abs_diff_eq!(plane.signed_distance_to(&projected), 0.0);
    }

    #[test]
    fn project_vector_keeps_in_plane_direction() {
        let plane = xy_plane_at(0.0);
        let ray = plane
            .project_vector(&Vector3D::new(2.0, 0.0, 5.0))
            .unwrap();
        assert!(ray.direction().equals(UnitVector3D::X_AXIS, 1e-12).unwrap());
        assert_eq!(ray.through_point(), Point3D::origin());
    }

    #[test]
    fn project_vector_parallel_to_normal_fails() {
        let plane = xy_plane_at(0.0);
        assert!(plane.project_vector(&Vector3D::new(0.0, 0.0, 3.0)).is_err());
    }
}
