use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

/// A signed planar angle.
///
/// Stored in radians; degree values are converted on the way in and out.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self { radians: 0.0 };

    /// Creates an angle from a value in radians.
    #[must_use]
    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Creates an angle from a value in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Returns the angle in radians.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.radians
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// Returns the sine of the angle.
    #[must_use]
    pub fn sin(self) -> f64 {
        self.radians.sin()
    }

    /// Returns the cosine of the angle.
    #[must_use]
    pub fn cos(self) -> f64 {
        self.radians.cos()
    }

    /// Returns the absolute value of the angle.
    #[must_use]
    pub fn abs(self) -> Self {
        Self {
            radians: self.radians.abs(),
        }
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians - rhs.radians)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::from_radians(self.radians * rhs)
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        Angle::from_radians(self * rhs.radians)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle::from_radians(self.radians / rhs)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Angle {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.radians, &other.radians, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Angle {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self.radians, &other.radians, epsilon, max_relative)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn degree_radian_conversion() {
        assert_abs_diff_eq!(Angle::from_degrees(180.0).radians(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::from_radians(FRAC_PI_2).degrees(), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn arithmetic() {
        let quarter = Angle::from_degrees(90.0);
        assert_abs_diff_eq!((quarter + quarter).radians(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!((quarter - quarter).radians(), 0.0);
        assert_abs_diff_eq!((-quarter).radians(), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!((quarter * 2.0).radians(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!((2.0 * quarter).radians(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!((quarter / 2.0).degrees(), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn ordering() {
        assert!(Angle::from_degrees(10.0) < Angle::from_degrees(20.0));
        assert!(Angle::from_radians(-1.0) < Angle::ZERO);
    }
}
