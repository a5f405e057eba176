//! Constants module for spherical astronomy calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Degrees of rotation per hour of right ascension or hour angle
pub const DEG_PER_HOUR: f64 = 15.0;
/// Arc-minutes (or time minutes) per degree (or hour)
pub const MINUTES_PER_UNIT: f64 = 60.0;
/// Arc-seconds (or time seconds) per degree (or hour)
pub const SECONDS_PER_UNIT: f64 = 3600.0;

// Scene
/// Radius of the rendered celestial sphere in scene units
pub const SPHERE_RADIUS: f64 = 10.0;

// Earth constants
/// Earth's mean radius in kilometers
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;
/// Amplitude of the simplified solar declination curve (degrees)
pub const OBLIQUITY_DEG: f64 = 23.45;

// Observer defaults
/// Default observer latitude in degrees (Kayseri, Turkey)
pub const DEFAULT_LATITUDE_DEG: f64 = 38.7;
/// Horizon depression used for rise/set: refraction plus solar semi-diameter (50')
pub const DEFAULT_REFRACTION_DEG: f64 = 50.0 / 60.0;

// Numerical thresholds
/// Below this `sin θ` two directions are treated as coincident (or antipodal)
pub const COINCIDENT_SIN_EPSILON: f64 = 1e-4;
/// Below this side sine a triangle has no well-defined angles
///
/// Sits above the `acos` noise floor (about 1.5e-8 rad for identical vectors).
pub const DEGENERATE_SIDE_SIN: f64 = 1e-7;
/// Below this `cos φ · cos δ` a rise/set hour angle is undefined
pub const POLAR_EPSILON: f64 = 1e-12;
