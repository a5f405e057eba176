//! Rise and set hour angles
//!
//! An object rises or sets when its altitude equals `-refraction`, the
//! depression of the apparent horizon (refraction plus, for the Sun, its
//! semi-diameter; 50' by default). Solving the PZS altitude formula for the
//! hour angle gives
//!
//! ```text
//! cos h = (sin(-refraction) - sin φ · sin δ) / (cos φ · cos δ)
//! ```
//!
//! When the right-hand side reaches ±1 or goes beyond, the object never
//! crosses the horizon: it is circumpolar or never rises. That is reported with a flag
//! and a sentinel hour angle of 0, not an error.
//!
//! The solar declination helper is the textbook sinusoid, good to about a
//! degree; it is not an ephemeris.

use super::ObserverFrame;
use crate::constants::{DEG_PER_HOUR, POLAR_EPSILON, TAU};
use crate::coordinates::{clamp_unit, Cartesian3};
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// How an object's daily path meets the horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonCrossing {
    /// Rises and sets once per day
    RisesAndSets,
    /// Always above the horizon
    Circumpolar,
    /// Always below the horizon
    NeverRises,
}

/// Result of [`calculate_rise_set`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseSet {
    /// Hours from transit to setting (and from rising to transit); 0 when
    /// `degenerate`
    pub hour_angle: f64,
    /// True when the object never crosses the horizon
    pub degenerate: bool,
    pub crossing: HorizonCrossing,
}

impl RiseSet {
    fn never_crosses(crossing: HorizonCrossing) -> Self {
        RiseSet {
            hour_angle: 0.0,
            degenerate: true,
            crossing,
        }
    }

    /// Classifies `cos h` at the horizon altitude
    ///
    /// `cos h = -1` means the lower culmination only touches the horizon,
    /// which counts as circumpolar; `cos h = 1` likewise counts as never
    /// rising.
    fn from_cos_hour_angle(cos_t: f64) -> Self {
        if cos_t <= -1.0 {
            return RiseSet::never_crosses(HorizonCrossing::Circumpolar);
        }
        if cos_t >= 1.0 {
            return RiseSet::never_crosses(HorizonCrossing::NeverRises);
        }
        RiseSet {
            hour_angle: clamp_unit(cos_t).acos().to_degrees() / DEG_PER_HOUR,
            degenerate: false,
            crossing: HorizonCrossing::RisesAndSets,
        }
    }

    /// Local hour angle of rising (negative, east of the meridian)
    pub fn rise_hour_angle(&self) -> f64 {
        -self.hour_angle
    }

    /// Local hour angle of setting (positive, west of the meridian)
    pub fn set_hour_angle(&self) -> f64 {
        self.hour_angle
    }

    /// Local clock time of rising, with transit at 12h
    pub fn rise_clock_hours(&self) -> f64 {
        12.0 + self.rise_hour_angle()
    }

    /// Local clock time of setting, with transit at 12h
    pub fn set_clock_hours(&self) -> f64 {
        12.0 + self.set_hour_angle()
    }

    /// Hours above the horizon per day
    pub fn day_length_hours(&self) -> f64 {
        match self.crossing {
            HorizonCrossing::RisesAndSets => 2.0 * self.hour_angle,
            HorizonCrossing::Circumpolar => 24.0,
            HorizonCrossing::NeverRises => 0.0,
        }
    }
}

/// Hour angle at which an object crosses altitude `-refraction_deg`
///
/// At the poles, or for declination ±90°, the altitude does not change
/// during the day; the object is then classified by that fixed altitude
/// instead of dividing by `cos φ · cos δ ≈ 0`.
///
/// # Examples
///
/// ```rust
/// use skysphere::horizon::calculate_rise_set;
///
/// let equinox = calculate_rise_set(40.0, 0.0, 50.0 / 60.0);
/// assert!(!equinox.degenerate);
/// assert!((equinox.hour_angle - 6.07).abs() < 0.01);
///
/// assert!(calculate_rise_set(80.0, 20.0, 50.0 / 60.0).degenerate);
/// ```
pub fn calculate_rise_set(lat_deg: f64, dec_deg: f64, refraction_deg: f64) -> RiseSet {
    let phi = lat_deg.to_radians();
    let delta = dec_deg.to_radians();
    let sin_h0 = (-refraction_deg).to_radians().sin();

    let constant_part = phi.sin() * delta.sin();
    let denominator = phi.cos() * delta.cos();

    if denominator.abs() < POLAR_EPSILON {
        let crossing = if constant_part > sin_h0 {
            HorizonCrossing::Circumpolar
        } else {
            HorizonCrossing::NeverRises
        };
        debug!(
            "Constant altitude at lat={}°, dec={}°: {:?}",
            lat_deg, dec_deg, crossing
        );
        return RiseSet::never_crosses(crossing);
    }

    let cos_t = (sin_h0 - constant_part) / denominator;
    let result = RiseSet::from_cos_hour_angle(cos_t);
    if result.degenerate {
        debug!(
            "lat={}°, dec={}°: {:?} (cos h = {:.4})",
            lat_deg, dec_deg, result.crossing, cos_t
        );
    }
    result
}

/// Simplified solar declination in degrees for a day of the year (1..=365)
///
/// `obliquity · sin(2π (284 + N) / 365)`
pub fn solar_declination(day_of_year: f64, obliquity_deg: f64) -> f64 {
    obliquity_deg * (TAU * (284.0 + day_of_year) / 365.0).sin()
}

/// [`solar_declination`] for a calendar date
pub fn solar_declination_on(date: NaiveDate, obliquity_deg: f64) -> f64 {
    solar_declination(f64::from(date.ordinal()), obliquity_deg)
}

/// Local hour angle of the Sun for a local clock time, with noon at transit
pub fn local_hour_angle(clock_hours: f64) -> f64 {
    clock_hours - 12.0
}

/// The small circle an object traces during one day, in the horizon scene
///
/// The horizon scene has the zenith at +Y, North at +Z and East at +X, so
/// [`DiurnalCircle::position_at`] agrees with converting
/// [`solve_pzs`](super::solve_pzs) through
/// [`horizontal_to_direction`](crate::coordinates::horizontal_to_direction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiurnalCircle {
    /// Unit vector toward the north celestial pole
    pub axis: Cartesian3,
    /// Centre of the circle (on the polar axis)
    pub center: Cartesian3,
    /// Radius of the small circle, `R · cos δ`
    pub circle_radius: f64,
    east: Cartesian3,
    meridian: Cartesian3,
}

impl DiurnalCircle {
    pub fn new(lat_deg: f64, dec_deg: f64, radius: f64) -> Self {
        let axis = ObserverFrame::new(lat_deg)
            .horizon_pole(1.0)
            .normalize()
            .unwrap_or_else(|| Cartesian3::new(0.0, 1.0, 0.0));
        let delta = dec_deg.to_radians();

        let east = Cartesian3::new(1.0, 0.0, 0.0);
        // Perpendicular to the axis, in the meridian plane, toward the upper culmination
        let meridian = axis.cross(&east);

        DiurnalCircle {
            axis,
            center: axis * (radius * delta.sin()),
            circle_radius: radius * delta.cos(),
            east,
            meridian,
        }
    }

    /// Position at a local hour angle in hours (0 = upper transit, + = west)
    pub fn position_at(&self, lha_hours: f64) -> Cartesian3 {
        let t = (lha_hours * DEG_PER_HOUR).to_radians();
        self.center + self.meridian * (self.circle_radius * t.cos())
            - self.east * (self.circle_radius * t.sin())
    }

    /// Closed path sampled at `segments + 1` points
    pub fn path(&self, segments: usize) -> Vec<Cartesian3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.position_at(24.0 * i as f64 / segments as f64))
            .collect()
    }
}
