//! # Horizon Module
//!
//! Equatorial to horizontal conversion through the astronomical (PZS)
//! triangle: celestial **P**ole, observer's **Z**enith, **S**tar.
//!
//! In that triangle the side PZ is the colatitude `90° - φ`, PS the
//! codeclination `90° - δ`, and the angle at P the hour angle `h`. The cosine
//! rule gives the third side ZS (zenith distance, `90° - altitude`); the
//! azimuth comes from a two-argument arctangent, which keeps the quadrant and
//! stays finite when the star is at the zenith or the observer at a pole.
//!
//! Azimuth is measured from North (0°) through East (90°); an object on the
//! meridian south of the zenith has azimuth 180°.

pub mod rise_set;

use crate::constants::DEG_PER_HOUR;
use crate::coordinates::{clamp_unit, wrap_degrees, Cartesian3};
use crate::triangle::{great_circle_arc, ArcSampling, GreatCircleArc};
use serde::{Deserialize, Serialize};

pub use rise_set::{
    calculate_rise_set, local_hour_angle, solar_declination, solar_declination_on,
    DiurnalCircle, HorizonCrossing, RiseSet,
};

/// Local horizon coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Angle above the horizon, `[-90, 90]`
    pub altitude: f64,
    /// Bearing from North through East, `[0, 360)`
    pub azimuth: f64,
}

impl HorizontalPosition {
    /// Zenith distance `90° - altitude`
    pub fn zenith_distance(&self) -> f64 {
        90.0 - self.altitude
    }

    /// True when the object is above the mathematical horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Converts latitude, declination (degrees) and hour angle (hours) into
/// altitude and azimuth
///
/// # Examples
///
/// ```rust
/// use skysphere::horizon::solve_pzs;
///
/// // Transit south of the zenith
/// let position = solve_pzs(40.0, 20.0, 0.0);
/// assert!((position.altitude - 70.0).abs() < 1e-9);
/// assert!((position.azimuth - 180.0).abs() < 1e-9);
/// ```
pub fn solve_pzs(lat_deg: f64, dec_deg: f64, ha_hours: f64) -> HorizontalPosition {
    let phi = lat_deg.to_radians();
    let delta = dec_deg.to_radians();
    let t = (ha_hours * DEG_PER_HOUR).to_radians();

    let sin_alt = phi.sin() * delta.sin() + phi.cos() * delta.cos() * t.cos();
    let altitude = clamp_unit(sin_alt).asin();

    let x = -t.sin() * delta.cos();
    let y = delta.sin() * phi.cos() - delta.cos() * phi.sin() * t.cos();
    let azimuth = x.atan2(y);

    HorizontalPosition {
        altitude: altitude.to_degrees(),
        azimuth: wrap_degrees(azimuth.to_degrees()),
    }
}

/// Directions fixed by the observer's latitude
///
/// Zenith and pole are derived together so they always differ by the
/// colatitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverFrame {
    /// Geographic latitude in degrees
    pub latitude: f64,
}

impl ObserverFrame {
    pub fn new(latitude: f64) -> Self {
        ObserverFrame { latitude }
    }

    /// Colatitude `90° - φ` (arc from pole to zenith) in degrees
    pub fn colatitude(&self) -> f64 {
        90.0 - self.latitude
    }

    /// North celestial pole in the equatorial scene (+Y)
    pub fn north_celestial_pole(&self, radius: f64) -> Cartesian3 {
        Cartesian3::new(0.0, radius, 0.0)
    }

    /// Zenith in the equatorial scene, tilted from the pole toward +Z
    pub fn zenith(&self, radius: f64) -> Cartesian3 {
        let phi = self.latitude.to_radians();
        Cartesian3::new(0.0, radius * phi.sin(), radius * phi.cos())
    }

    /// Zenith in the horizon scene (+Y)
    pub fn horizon_zenith(&self, radius: f64) -> Cartesian3 {
        Cartesian3::new(0.0, radius, 0.0)
    }

    /// North celestial pole in the horizon scene: altitude φ at azimuth 0
    ///
    /// Matches [`horizontal_to_direction`](crate::coordinates::horizontal_to_direction),
    /// so North is +Z and East is +X.
    pub fn horizon_pole(&self, radius: f64) -> Cartesian3 {
        let phi = self.latitude.to_radians();
        Cartesian3::new(0.0, radius * phi.sin(), radius * phi.cos())
    }
}

/// The PZS triangle placed in the equatorial scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PzsScene {
    pub pole: Cartesian3,
    pub zenith: Cartesian3,
    pub star: Cartesian3,
    /// Pole to zenith, length `90° - φ`
    pub colatitude: GreatCircleArc,
    /// Pole to star, length `90° - δ`
    pub codeclination: GreatCircleArc,
    /// Zenith to star, length `90° - altitude`
    pub zenith_distance: GreatCircleArc,
}

impl PzsScene {
    /// Steps used for each displayed arc
    pub const ARC_STEPS: usize = 32;

    pub fn new(lat_deg: f64, dec_deg: f64, ha_hours: f64, radius: f64) -> Self {
        let frame = ObserverFrame::new(lat_deg);
        let pole = frame.north_celestial_pole(radius);
        let zenith = frame.zenith(radius);

        let t = (ha_hours * DEG_PER_HOUR).to_radians();
        let delta = dec_deg.to_radians();
        let r_plane = radius * delta.cos();
        let star = Cartesian3::new(r_plane * t.sin(), radius * delta.sin(), r_plane * t.cos());

        let sampling = ArcSampling::fixed(Self::ARC_STEPS);
        PzsScene {
            pole,
            zenith,
            star,
            colatitude: great_circle_arc(&pole, &zenith, radius, &sampling),
            codeclination: great_circle_arc(&pole, &star, radius, &sampling),
            zenith_distance: great_circle_arc(&zenith, &star, radius, &sampling),
        }
    }
}
