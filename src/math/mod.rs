/// 3x3 matrix from the linear-algebra backend.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Dense 3-component column vector used at the linear-algebra boundary.
pub type DenseVector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default tolerance for parallelism and perpendicularity tests on
/// normalized directions (`|dot| ≈ 1` and `|dot| ≈ 0` respectively).
pub const PARALLEL_TOLERANCE: f64 = 1e-6;

/// Snap window around `±1` inside which a projected dot product is treated
/// as exactly `0` or `π` before `acos`, keeping it off the domain edge.
pub const ANGLE_SNAP_TOLERANCE: f64 = 1e-15;
