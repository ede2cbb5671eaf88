//! A 3D Euclidean geometry kernel.
//!
//! Immutable value types for positions, free vectors, normalized
//! directions, planes, rays, angles, and orthonormal coordinate systems,
//! with the arithmetic, rotation, projection, and comparison operations
//! relating them. Every operation is a pure function returning a new
//! value; there is no shared mutable state anywhere in the crate.
//!
//! The central type is [`UnitVector3D`]: its only construction path
//! normalizes the input and rejects near-zero magnitudes, so a reachable
//! value always has unit length. Additive arithmetic between directions
//! and free vectors widens to [`Vector3D`], since sums and differences of
//! unit vectors are not unit.
//!
//! Floating-point exceptional values (division by zero, `NaN` from a
//! degenerate matrix) are deliberately not intercepted; they propagate as
//! non-finite results per IEEE-754.

pub mod error;
pub mod geometry;
pub mod math;
pub mod text;
pub mod xml;

pub use error::{EuclisError, Result};
pub use geometry::{Angle, CoordinateSystem, Plane, Point3D, Ray3D, UnitVector3D, Vector3D};
