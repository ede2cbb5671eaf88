use std::fmt;

use crate::math::{Matrix3, TOLERANCE};

use super::{Angle, Point3D, UnitVector3D, Vector3D};

/// An orthonormal basis plus an origin.
///
/// Invariant: the three basis directions are unit length and pairwise
/// orthogonal within tolerance. A violated invariant is a bug in the
/// producing algorithm, not a user input error, so it is checked with
/// `debug_assert` rather than a runtime failure path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateSystem {
    origin: Point3D,
    x_axis: UnitVector3D,
    y_axis: UnitVector3D,
    z_axis: UnitVector3D,
}

impl CoordinateSystem {
    /// Creates a coordinate system from an origin and three basis
    /// directions. The caller guarantees pairwise orthogonality.
    #[must_use]
    pub fn new(
        origin: Point3D,
        x_axis: UnitVector3D,
        y_axis: UnitVector3D,
        z_axis: UnitVector3D,
    ) -> Self {
        debug_assert!(x_axis.dot(&y_axis).abs() < TOLERANCE, "basis not orthogonal");
        debug_assert!(y_axis.dot(&z_axis).abs() < TOLERANCE, "basis not orthogonal");
        debug_assert!(z_axis.dot(&x_axis).abs() < TOLERANCE, "basis not orthogonal");
        Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// The world frame: identity basis at the origin.
    #[must_use]
    pub const fn world() -> Self {
        Self {
            origin: Point3D::origin(),
            x_axis: UnitVector3D::X_AXIS,
            y_axis: UnitVector3D::Y_AXIS,
            z_axis: UnitVector3D::Z_AXIS,
        }
    }

    /// Builds the rotation frame around `axis` by `angle`, using the
    /// Rodrigues form `R = cos·I + sin·[u]× + (1 - cos)·u uᵀ`.
    #[must_use]
    pub fn rotation(angle: Angle, axis: &UnitVector3D) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let rotation = Matrix3::identity() * cos
            + axis.cross_product_matrix() * sin
            + axis.unit_tensor_product() * (1.0 - cos);
        Self::from_rotation_matrix(&rotation)
    }

    /// Builds a frame at the origin whose basis is the columns of a
    /// rotation matrix. Columns are renormalized to absorb drift.
    fn from_rotation_matrix(matrix: &Matrix3) -> Self {
        let column = |i: usize| {
            UnitVector3D::renormalized(Vector3D::new(
                matrix[(0, i)],
                matrix[(1, i)],
                matrix[(2, i)],
            ))
        };
        Self {
            origin: Point3D::origin(),
            x_axis: column(0),
            y_axis: column(1),
            z_axis: column(2),
        }
    }

    /// The origin of the frame.
    #[must_use]
    pub const fn origin(&self) -> Point3D {
        self.origin
    }

    /// The X basis direction.
    #[must_use]
    pub const fn x_axis(&self) -> &UnitVector3D {
        &self.x_axis
    }

    /// The Y basis direction.
    #[must_use]
    pub const fn y_axis(&self) -> &UnitVector3D {
        &self.y_axis
    }

    /// The Z basis direction.
    #[must_use]
    pub const fn z_axis(&self) -> &UnitVector3D {
        &self.z_axis
    }

    /// The basis as a matrix with the axes as columns.
    #[must_use]
    pub fn rotation_matrix(&self) -> Matrix3 {
        Matrix3::new(
            self.x_axis.x(), self.y_axis.x(), self.z_axis.x(),
            self.x_axis.y(), self.y_axis.y(), self.z_axis.y(),
            self.x_axis.z(), self.y_axis.z(), self.z_axis.z(),
        )
    }

    /// Transforms a free vector into this frame. Vectors are unaffected by
    /// the origin offset, so only the rotation part applies.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3D) -> Vector3D {
        self.x_axis.scale_by(vector.x)
            + self.y_axis.scale_by(vector.y)
            + self.z_axis.scale_by(vector.z)
    }

    /// Transforms a direction into this frame. The result widens to a free
    /// vector; a non-orthonormal basis would not preserve unit length.
    #[must_use]
    pub fn transform_unit(&self, unit: &UnitVector3D) -> Vector3D {
        self.transform_vector(&unit.to_vector())
    }

    /// Transforms a point into this frame: rotation plus origin offset.
    #[must_use]
    pub fn transform_point(&self, point: &Point3D) -> Point3D {
        self.origin + self.transform_vector(&point.to_vector())
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "origin: {}, x: {}, y: {}, z: {}",
            self.origin, self.x_axis, self.y_axis, self.z_axis
        )
    }
}
