//! Angle notation and coordinate transforms
//!
//! - [`sexagesimal`]: text ↔ decimal degrees/hours
//! - [`cartesian`]: the vector type every direction is stored in
//! - [`direction`]: equatorial and horizontal pairs ↔ scene directions

pub mod cartesian;
pub mod direction;
pub mod sexagesimal;

pub use cartesian::{clamp_unit, Cartesian3};
pub use direction::{
    direction_to_equatorial, direction_to_horizontal, equatorial_to_direction,
    horizontal_to_direction, wrap_degrees,
};

/// Great-circle angle between two directions in radians
///
/// Free-function form of [`Cartesian3::angle_between`].
pub fn angle_between(d1: &Cartesian3, d2: &Cartesian3) -> f64 {
    d1.angle_between(d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_angular_distance() {
        let p1 = equatorial_to_direction(2.0, 30.0, 10.0);
        assert!(angle_between(&p1, &p1).abs() < 1e-7);

        // Antipode: RA + 12h, negated declination
        let p2 = equatorial_to_direction(14.0, -30.0, 10.0);
        assert!((angle_between(&p1, &p2) - PI).abs() < 1e-7);

        // Polaris to Vega is about 51 degrees
        let polaris = equatorial_to_direction(37.95 / 15.0, 89.26, 1.0);
        let vega = equatorial_to_direction(279.23 / 15.0, 38.78, 1.0);
        let dist_deg = angle_between(&polaris, &vega).to_degrees();
        assert!((dist_deg - 51.0).abs() < 1.0);
    }
}
