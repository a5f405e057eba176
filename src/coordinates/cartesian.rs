//! # Cartesian Coordinate Module
//!
//! Three-component vectors used as directions (points) on the celestial
//! sphere. Every angular quantity in the crate is eventually measured
//! between two of these.
//!
//! ## Scene Convention
//!
//! The axes follow the scene the results are drawn into:
//! - **Y-axis**: "up" (north celestial pole, or zenith in a horizon frame)
//! - **X-axis**: right ascension 0h on the equator
//! - **Z-axis**: completes the frame (RA = 6h on the equator)
//!
//! A direction is usually stored at the sphere's radius rather than at unit
//! length, so consumers normalize before taking angles.
//!
//! ## Examples
//!
//! ```rust
//! use skysphere::coordinates::cartesian::Cartesian3;
//!
//! let up = Cartesian3::new(0.0, 10.0, 0.0);
//! let east = Cartesian3::new(0.0, 0.0, 3.0);
//! assert!((up.angle_between(&east) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Clamps a cosine (or sine) into `[-1, 1]` before an inverse trig call
///
/// Dot products of normalized vectors drift a few ulps outside the unit
/// interval, and `acos`/`asin` turn that into NaN.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Three-dimensional Cartesian vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component (toward RA = 0h)
    pub x: f64,
    /// Y-component ("up")
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Projects the vector onto the sphere of the given radius
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn with_radius(&self, radius: f64) -> Option<Cartesian3> {
        self.normalize().map(|unit| unit * radius)
    }

    /// Dot product
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Straight-line (chord) distance between the two points
    pub fn distance_to(&self, other: &Cartesian3) -> f64 {
        (*self - *other).magnitude()
    }

    /// Great-circle angle to another direction, in radians `[0, π]`
    ///
    /// Both vectors are normalized first, so their lengths do not matter.
    /// The cosine is clamped before `acos`. A zero vector has no direction
    /// and yields 0.
    pub fn angle_between(&self, other: &Cartesian3) -> f64 {
        match (self.normalize(), other.normalize()) {
            (Some(a), Some(b)) => clamp_unit(a.dot(&b)).acos(),
            _ => 0.0,
        }
    }

    /// Converts to a nalgebra vector
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Builds from a nalgebra vector
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<Vector3<f64>> for Cartesian3 {
    fn from(vec: Vector3<f64>) -> Self {
        Cartesian3::from_vector3(vec)
    }
}

impl From<Cartesian3> for Vector3<f64> {
    fn from(cart: Cartesian3) -> Self {
        cart.to_vector3()
    }
}

impl From<Cartesian3> for [f64; 3] {
    fn from(cart: Cartesian3) -> Self {
        [cart.x, cart.y, cart.z]
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for Cartesian3 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_magnitude_and_normalize() {
        let coord = Cartesian3::new(3.0, 4.0, 0.0);
        assert_eq!(coord.magnitude(), 5.0);

        let unit = coord.normalize().unwrap();
        assert_abs_diff_eq!(unit, Cartesian3::new(0.6, 0.8, 0.0), epsilon = 1e-15);

        assert!(Cartesian3::default().normalize().is_none());
    }

    #[test]
    fn test_with_radius() {
        let projected = Cartesian3::new(0.0, 0.0, 0.25).with_radius(10.0).unwrap();
        assert_abs_diff_eq!(projected, Cartesian3::new(0.0, 0.0, 10.0), epsilon = 1e-12);
        assert!(Cartesian3::default().with_radius(10.0).is_none());
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = Cartesian3::new(1.0, 0.0, 0.0);
        let y = Cartesian3::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(x.cross(&y), Cartesian3::new(0.0, 0.0, 1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(y.cross(&x), Cartesian3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_angle_between() {
        let x = Cartesian3::new(2.0, 0.0, 0.0);
        let y = Cartesian3::new(0.0, 5.0, 0.0);
        assert_abs_diff_eq!(x.angle_between(&y), FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(x.angle_between(&-x), PI, epsilon = 1e-15);
        assert_eq!(x.angle_between(&x), 0.0);
        assert_eq!(x.angle_between(&Cartesian3::default()), 0.0);
    }

    #[test]
    fn test_angle_between_never_nan_for_nearly_parallel() {
        // Dot product of these normalized vectors lands a hair above 1.0
        let a = Cartesian3::new(0.1, 0.2, 0.3);
        let b = a * 7.000_000_000_000_001;
        let angle = a.angle_between(&b);
        assert!(angle.is_finite());
        assert!(angle < 1e-7);
    }

    #[test]
    fn test_chord_distance() {
        let a = Cartesian3::new(10.0, 0.0, 0.0);
        let b = Cartesian3::new(0.0, 10.0, 0.0);
        assert_abs_diff_eq!(a.distance_to(&b), 200f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let coord = Cartesian3::new(1.0, -2.0, 3.5);
        let vec: Vector3<f64> = coord.into();
        assert_eq!(Cartesian3::from(vec), coord);
        assert_eq!(<[f64; 3]>::from(coord), [1.0, -2.0, 3.5]);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.000_000_1), 1.0);
        assert_eq!(clamp_unit(-1.5), -1.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }
}
