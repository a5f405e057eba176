//! # Problem Module
//!
//! One entry point for the four kinds of problem the crate solves:
//!
//! - [`SolverMode::Explore`]: free triangle from points on the sphere
//! - [`SolverMode::Earth`]: isosceles triangle on the Earth via Napier's rules
//! - [`SolverMode::Pzs`]: altitude and azimuth from the astronomical triangle
//! - [`SolverMode::Sunrise`]: the Sun's rise, set and current position
//!
//! A [`Problem`] carries the inputs for one mode and
//! [`Problem::solve`] returns the matching [`Solution`], including the
//! geometry a renderer needs. Nothing is cached; every call recomputes from
//! the inputs.
//!
//! ```rust
//! use skysphere::config::SphereConfig;
//! use skysphere::problem::{Problem, Solution};
//!
//! let problem = Problem::Pzs {
//!     latitude_deg: Some(40.0),
//!     declination_deg: 20.0,
//!     hour_angle_hours: 0.0,
//! };
//! match problem.solve(&SphereConfig::default()).unwrap() {
//!     Solution::Pzs { position, .. } => assert!((position.altitude - 70.0).abs() < 1e-9),
//!     _ => unreachable!(),
//! }
//! ```

use crate::config::SphereConfig;
use crate::coordinates::{equatorial_to_direction, horizontal_to_direction, Cartesian3};
use crate::horizon::{
    calculate_rise_set, local_hour_angle, solar_declination, solve_pzs, DiurnalCircle,
    HorizontalPosition, PzsScene, RiseSet,
};
use crate::triangle::{
    solve_isosceles, Construction, IsoscelesScene, IsoscelesSolution, SphericalTriangle,
    VertexUpdate,
};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Which solver a problem is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    Explore,
    Earth,
    Pzs,
    Sunrise,
}

/// A point given by right ascension (hours) and declination (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPoint {
    pub ra_hours: f64,
    pub dec_deg: f64,
}

impl EquatorialPoint {
    pub fn new(ra_hours: f64, dec_deg: f64) -> Self {
        EquatorialPoint { ra_hours, dec_deg }
    }
}

/// Inputs for one solver
///
/// Latitudes left as `None` fall back to
/// [`SphereConfig::default_latitude_deg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Problem {
    /// Points fed in order through [`VertexSet::add_or_replace`](crate::triangle::VertexSet::add_or_replace)
    Explore { points: Vec<EquatorialPoint> },
    /// Base angle `A` and opposite side `a` of an isosceles triangle, degrees
    Earth { angle_a_deg: f64, side_a_deg: f64 },
    Pzs {
        latitude_deg: Option<f64>,
        declination_deg: f64,
        hour_angle_hours: f64,
    },
    Sunrise {
        latitude_deg: Option<f64>,
        /// Day of the year, 1 = January 1st
        day_of_year: f64,
        /// Local clock time in hours, noon at transit
        clock_hours: f64,
    },
}

/// The Sun on a given day, seen from a given latitude
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunriseSolution {
    pub latitude: f64,
    /// Solar declination in degrees
    pub declination: f64,
    pub rise_set: RiseSet,
    /// Local hour angle at the requested clock time, hours
    pub local_hour_angle: f64,
    /// Position at the requested clock time
    pub sun: HorizontalPosition,
    /// Scene positions in the horizon frame
    pub sun_position: Cartesian3,
    /// `None` when the Sun does not cross the horizon that day
    pub rise_position: Option<Cartesian3>,
    pub set_position: Option<Cartesian3>,
    /// The day's full diurnal circle
    pub path: Vec<Cartesian3>,
}

/// Result of [`Problem::solve`], one variant per [`SolverMode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Solution {
    Explore {
        /// What happened to each input point
        updates: Vec<VertexUpdate>,
        vertices: Vec<Cartesian3>,
        construction: Construction,
    },
    Earth {
        solution: IsoscelesSolution,
        scene: IsoscelesScene,
    },
    Pzs {
        position: HorizontalPosition,
        scene: PzsScene,
    },
    Sunrise(SunriseSolution),
}

impl Problem {
    /// Points of the diurnal circle returned by the sunrise solver
    pub const DIURNAL_PATH_SEGMENTS: usize = 96;

    pub fn mode(&self) -> SolverMode {
        match self {
            Problem::Explore { .. } => SolverMode::Explore,
            Problem::Earth { .. } => SolverMode::Earth,
            Problem::Pzs { .. } => SolverMode::Pzs,
            Problem::Sunrise { .. } => SolverMode::Sunrise,
        }
    }

    /// Validates `config` and runs the solver for this problem
    pub fn solve(&self, config: &SphereConfig) -> Result<Solution> {
        config.validate()?;

        let solution = match self {
            Problem::Explore { points } => solve_explore(points, config),
            Problem::Earth {
                angle_a_deg,
                side_a_deg,
            } => {
                let solution = solve_isosceles(*angle_a_deg, *side_a_deg, config.body_radius_km);
                let scene = IsoscelesScene::new(&solution, *side_a_deg, config.sphere_radius);
                Solution::Earth { solution, scene }
            }
            Problem::Pzs {
                latitude_deg,
                declination_deg,
                hour_angle_hours,
            } => {
                let latitude = latitude_deg.unwrap_or(config.default_latitude_deg);
                Solution::Pzs {
                    position: solve_pzs(latitude, *declination_deg, *hour_angle_hours),
                    scene: PzsScene::new(
                        latitude,
                        *declination_deg,
                        *hour_angle_hours,
                        config.sphere_radius,
                    ),
                }
            }
            Problem::Sunrise {
                latitude_deg,
                day_of_year,
                clock_hours,
            } => {
                let latitude = latitude_deg.unwrap_or(config.default_latitude_deg);
                Solution::Sunrise(solve_sunrise(latitude, *day_of_year, *clock_hours, config))
            }
        };
        Ok(solution)
    }
}

fn solve_explore(points: &[EquatorialPoint], config: &SphereConfig) -> Solution {
    let mut vertex_set = config.vertex_set();
    let updates = points
        .iter()
        .map(|point| {
            vertex_set.add_or_replace(equatorial_to_direction(
                point.ra_hours,
                point.dec_deg,
                config.sphere_radius,
            ))
        })
        .collect();

    Solution::Explore {
        updates,
        vertices: vertex_set.vertices().to_vec(),
        construction: vertex_set.construct(&config.arc_sampling),
    }
}

fn solve_sunrise(
    latitude: f64,
    day_of_year: f64,
    clock_hours: f64,
    config: &SphereConfig,
) -> SunriseSolution {
    let radius = config.sphere_radius;
    let declination = solar_declination(day_of_year, config.obliquity_deg);
    let rise_set = calculate_rise_set(latitude, declination, config.refraction_deg);
    let lha = local_hour_angle(clock_hours);
    let sun = solve_pzs(latitude, declination, lha);
    let circle = DiurnalCircle::new(latitude, declination, radius);

    let (rise_position, set_position) = if rise_set.degenerate {
        (None, None)
    } else {
        (
            Some(circle.position_at(rise_set.rise_hour_angle())),
            Some(circle.position_at(rise_set.set_hour_angle())),
        )
    };

    SunriseSolution {
        latitude,
        declination,
        rise_set,
        local_hour_angle: lha,
        sun,
        sun_position: horizontal_to_direction(sun.azimuth, sun.altitude, radius),
        rise_position,
        set_position,
        path: circle.path(Problem::DIURNAL_PATH_SEGMENTS),
    }
}

impl Solution {
    pub fn mode(&self) -> SolverMode {
        match self {
            Solution::Explore { .. } => SolverMode::Explore,
            Solution::Earth { .. } => SolverMode::Earth,
            Solution::Pzs { .. } => SolverMode::Pzs,
            Solution::Sunrise(_) => SolverMode::Sunrise,
        }
    }

    /// The solved triangle of an explore solution with three vertices
    ///
    /// `Ok(None)` for other modes and for fewer than three vertices; a
    /// degenerate triangle is returned as an error.
    pub fn triangle(&self) -> Result<Option<SphericalTriangle>> {
        match self {
            Solution::Explore {
                construction: Construction::Triangle { solution, .. },
                ..
            } => Ok(Some((*solution)?)),
            _ => Ok(None),
        }
    }
}
