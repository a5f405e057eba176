//! Conversions between angle pairs and scene directions
//!
//! Equatorial (RA in hours, declination in degrees) and horizontal
//! (azimuth, altitude in degrees) pairs map onto points of a sphere of a
//! caller-supplied radius, with +Y as the pole or zenith.

use super::cartesian::{clamp_unit, Cartesian3};
use crate::constants::DEG_PER_HOUR;

/// Maps right ascension (hours) and declination (degrees) onto the sphere
///
/// The polar angle is measured from +Y (north celestial pole) and equals
/// `90° - dec`; the azimuthal angle is `ra * 15°` measured from +X toward +Z.
pub fn equatorial_to_direction(ra_hours: f64, dec_deg: f64, radius: f64) -> Cartesian3 {
    let theta = (ra_hours * DEG_PER_HOUR).to_radians();
    let phi = (90.0 - dec_deg).to_radians();

    Cartesian3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Maps azimuth and altitude (degrees) onto the sphere
///
/// Altitude is the "up" (+Y) component; azimuth turns in the horizontal
/// plane starting at +Z and moving toward +X.
pub fn horizontal_to_direction(az_deg: f64, alt_deg: f64, radius: f64) -> Cartesian3 {
    let alt = alt_deg.to_radians();
    let az = az_deg.to_radians();

    let r_plane = radius * alt.cos();
    Cartesian3::new(r_plane * az.sin(), radius * alt.sin(), r_plane * az.cos())
}

/// Recovers `(ra_hours, dec_deg)` from a scene direction
///
/// RA is wrapped to `[0, 24)`. The poles and the zero vector report RA 0.
pub fn direction_to_equatorial(direction: &Cartesian3) -> (f64, f64) {
    let unit = match direction.normalize() {
        Some(unit) => unit,
        None => return (0.0, 0.0),
    };

    let dec = clamp_unit(unit.y).asin().to_degrees();
    let ra_deg = if unit.x == 0.0 && unit.z == 0.0 {
        0.0
    } else {
        wrap_degrees(unit.z.atan2(unit.x).to_degrees())
    };

    (ra_deg / DEG_PER_HOUR, dec)
}

/// Recovers `(az_deg, alt_deg)` from a scene direction
///
/// Azimuth is wrapped to `[0, 360)`. The zenith, nadir and the zero vector
/// report azimuth 0.
pub fn direction_to_horizontal(direction: &Cartesian3) -> (f64, f64) {
    let unit = match direction.normalize() {
        Some(unit) => unit,
        None => return (0.0, 0.0),
    };

    let alt = clamp_unit(unit.y).asin().to_degrees();
    let az = if unit.x == 0.0 && unit.z == 0.0 {
        0.0
    } else {
        wrap_degrees(unit.x.atan2(unit.z).to_degrees())
    };

    (az, alt)
}

/// Wraps an angle in degrees into `[0, 360)`
///
/// `rem_euclid` can return exactly 360 for tiny negative inputs, and a
/// negative zero would print as `-0`; both collapse to 0 here.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_equatorial_reference_axes() {
        let pole = equatorial_to_direction(0.0, 90.0, 10.0);
        assert_abs_diff_eq!(pole, Cartesian3::new(0.0, 10.0, 0.0), epsilon = 1e-12);

        let vernal = equatorial_to_direction(0.0, 0.0, 10.0);
        assert_abs_diff_eq!(vernal, Cartesian3::new(10.0, 0.0, 0.0), epsilon = 1e-12);

        let six_hours = equatorial_to_direction(6.0, 0.0, 1.0);
        assert_abs_diff_eq!(six_hours, Cartesian3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_reference_axes() {
        let zenith = horizontal_to_direction(123.0, 90.0, 1.0);
        assert_abs_diff_eq!(zenith, Cartesian3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        let az_zero = horizontal_to_direction(0.0, 0.0, 2.0);
        assert_abs_diff_eq!(az_zero, Cartesian3::new(0.0, 0.0, 2.0), epsilon = 1e-12);

        let az_ninety = horizontal_to_direction(90.0, 0.0, 2.0);
        assert_abs_diff_eq!(az_ninety, Cartesian3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(5.5, 23.4)]
    #[case(13.25, -61.0)]
    #[case(23.9, 89.0)]
    fn test_equatorial_round_trip(#[case] ra: f64, #[case] dec: f64) {
        let direction = equatorial_to_direction(ra, dec, 10.0);
        assert_abs_diff_eq!(direction.magnitude(), 10.0, epsilon = 1e-12);

        let (ra_back, dec_back) = direction_to_equatorial(&direction);
        assert_abs_diff_eq!(ra_back, ra, epsilon = 1e-9);
        assert_abs_diff_eq!(dec_back, dec, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(90.0, 45.0)]
    #[case(200.0, -5.0)]
    #[case(359.5, 0.0)]
    fn test_horizontal_round_trip(#[case] az: f64, #[case] alt: f64) {
        let direction = horizontal_to_direction(az, alt, 3.0);
        let (az_back, alt_back) = direction_to_horizontal(&direction);
        assert_abs_diff_eq!(az_back, az, epsilon = 1e-9);
        assert_abs_diff_eq!(alt_back, alt, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_at_singular_points() {
        assert_eq!(direction_to_equatorial(&Cartesian3::default()), (0.0, 0.0));
        assert_eq!(direction_to_horizontal(&Cartesian3::default()), (0.0, 0.0));

        let (ra, dec) = direction_to_equatorial(&Cartesian3::new(0.0, -4.0, 0.0));
        assert_eq!(ra, 0.0);
        assert_abs_diff_eq!(dec, -90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-1e-17), 0.0);
        assert!(wrap_degrees(-0.0).is_sign_positive());
    }
}
