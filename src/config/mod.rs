//! Solver configuration
//!
//! Every tunable value used by the solvers lives in [`SphereConfig`]. Missing
//! keys in a JSON file fall back to the defaults in [`crate::constants`], so
//! a file only has to name what it changes:
//!
//! ```json
//! { "default_latitude_deg": -33.9, "arc_sampling": { "min_steps": 24 } }
//! ```

use crate::constants::{
    DEFAULT_LATITUDE_DEG, DEFAULT_REFRACTION_DEG, EARTH_MEAN_RADIUS_KM, OBLIQUITY_DEG,
    SPHERE_RADIUS,
};
use crate::triangle::{ArcSampling, VertexSet, MAX_ARC_STEPS};
use crate::{Result, SkysphereError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest refraction accepted by [`SphereConfig::validate`], in degrees
const MAX_REFRACTION_DEG: f64 = 5.0;

/// Tunable values for the solvers and scene construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Radius of the rendered sphere in scene units
    pub sphere_radius: f64,
    /// Radius used to turn an isosceles excess into an area (km)
    pub body_radius_km: f64,
    /// Amplitude of the solar declination curve in degrees
    pub obliquity_deg: f64,
    /// Observer latitude used when none is given
    pub default_latitude_deg: f64,
    /// Horizon depression for rise/set in degrees
    pub refraction_deg: f64,
    pub arc_sampling: ArcSampling,
    /// Fraction of the radius within which a new vertex replaces an old one
    pub replace_fraction: f64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        SphereConfig {
            sphere_radius: SPHERE_RADIUS,
            body_radius_km: EARTH_MEAN_RADIUS_KM,
            obliquity_deg: OBLIQUITY_DEG,
            default_latitude_deg: DEFAULT_LATITUDE_DEG,
            refraction_deg: DEFAULT_REFRACTION_DEG,
            arc_sampling: ArcSampling::default(),
            replace_fraction: 0.5,
        }
    }
}

impl SphereConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SphereConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Checks that every value is usable by the solvers
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("sphere_radius", self.sphere_radius),
            ("body_radius_km", self.body_radius_km),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(-90.0..=90.0).contains(&self.default_latitude_deg) {
            return Err(invalid(format!(
                "default_latitude_deg must be within [-90, 90], got {}",
                self.default_latitude_deg
            )));
        }
        if !(-90.0..=90.0).contains(&self.obliquity_deg) {
            return Err(invalid(format!(
                "obliquity_deg must be within [-90, 90], got {}",
                self.obliquity_deg
            )));
        }
        if !(0.0..=MAX_REFRACTION_DEG).contains(&self.refraction_deg) {
            return Err(invalid(format!(
                "refraction_deg must be within [0, {}], got {}",
                MAX_REFRACTION_DEG, self.refraction_deg
            )));
        }
        if !(self.replace_fraction > 0.0 && self.replace_fraction <= 2.0) {
            return Err(invalid(format!(
                "replace_fraction must be within (0, 2], got {}",
                self.replace_fraction
            )));
        }
        if !(1..=MAX_ARC_STEPS).contains(&self.arc_sampling.min_steps) {
            return Err(invalid(format!(
                "arc_sampling.min_steps must be within [1, {}], got {}",
                MAX_ARC_STEPS, self.arc_sampling.min_steps
            )));
        }
        if !(self.arc_sampling.steps_per_radian.is_finite()
            && self.arc_sampling.steps_per_radian >= 0.0)
        {
            return Err(invalid(format!(
                "arc_sampling.steps_per_radian must be non-negative, got {}",
                self.arc_sampling.steps_per_radian
            )));
        }
        // A half-turn arc is the longest one drawn
        let max_steps_per_radian = MAX_ARC_STEPS as f64 / std::f64::consts::PI;
        if self.arc_sampling.steps_per_radian > max_steps_per_radian {
            return Err(invalid(format!(
                "arc_sampling.steps_per_radian must be at most {:.1}, got {}",
                max_steps_per_radian, self.arc_sampling.steps_per_radian
            )));
        }
        Ok(())
    }

    /// An empty vertex set on the configured sphere
    pub fn vertex_set(&self) -> VertexSet {
        VertexSet::with_replace_fraction(self.sphere_radius, self.replace_fraction)
    }
}

fn invalid(message: String) -> SkysphereError {
    warn!("Rejected configuration: {}", message);
    SkysphereError::Config(message)
}
