//! # Spherical Triangle Module
//!
//! General spherical triangles built from up to three points on the sphere:
//! great-circle arcs between the points, side lengths, and interior angles
//! from the inverted spherical law of cosines.
//!
//! Vertices are named `A`, `B`, `C` in insertion order. Side `a` is opposite
//! `A` (the arc `BC`), `b` is `CA` and `c` is `AB`.
//!
//! ## Degenerate Geometry
//!
//! - Coincident (or antipodal) arc endpoints have no unique great circle; the
//!   arc collapses to repeated copies of its first point.
//! - When two vertices nearly coincide, the angle formula divides by almost
//!   zero. [`solve_triangle`] reports [`TriangleError::Degenerate`] instead of
//!   returning NaN or infinite angles.
//!
//! ## Examples
//!
//! ```rust
//! use skysphere::coordinates::equatorial_to_direction;
//! use skysphere::triangle::solve_triangle;
//!
//! // One octant of the sphere: three right angles
//! let a = equatorial_to_direction(0.0, 0.0, 10.0);
//! let b = equatorial_to_direction(6.0, 0.0, 10.0);
//! let c = equatorial_to_direction(0.0, 90.0, 10.0);
//! let triangle = solve_triangle(&a, &b, &c).unwrap();
//! assert!((triangle.angle_sum() - 270.0).abs() < 1e-9);
//! ```

pub mod napier;

use crate::constants::{COINCIDENT_SIN_EPSILON, DEGENERATE_SIDE_SIN};
use crate::coordinates::{clamp_unit, Cartesian3};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use napier::{solve_isosceles, IsoscelesScene, IsoscelesSolution};

/// Maximum number of vertices a [`VertexSet`] holds
pub const MAX_VERTICES: usize = 3;

/// Upper bound on the steps of a single arc
pub const MAX_ARC_STEPS: usize = 10_000;

/// Error type for triangle solving
#[derive(Debug, Error, Clone, Copy, PartialEq, Serialize)]
pub enum TriangleError {
    /// Two vertices (nearly) coincide, so an interior angle is undefined
    #[error("Degenerate triangle: sides a={side_a:.6}°, b={side_b:.6}°, c={side_c:.6}°")]
    Degenerate {
        /// Side opposite vertex A in degrees
        side_a: f64,
        /// Side opposite vertex B in degrees
        side_b: f64,
        /// Side opposite vertex C in degrees
        side_c: f64,
    },
}

/// How densely great-circle arcs are sampled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSampling {
    /// Lower bound on the number of steps, whatever the arc length
    pub min_steps: usize,
    /// Steps added per radian of arc
    pub steps_per_radian: f64,
}

impl Default for ArcSampling {
    fn default() -> Self {
        ArcSampling {
            min_steps: 10,
            steps_per_radian: 20.0,
        }
    }
}

impl ArcSampling {
    /// A fixed number of steps regardless of arc length
    pub fn fixed(steps: usize) -> Self {
        ArcSampling {
            min_steps: steps,
            steps_per_radian: 0.0,
        }
    }

    /// Number of steps for an arc of `angle` radians, within `1..=MAX_ARC_STEPS`
    pub fn steps_for(&self, angle: f64) -> usize {
        let adaptive = (angle * self.steps_per_radian).floor();
        let adaptive = if adaptive.is_finite() && adaptive > 0.0 {
            adaptive.min(MAX_ARC_STEPS as f64) as usize
        } else {
            0
        };
        self.min_steps.max(adaptive).clamp(1, MAX_ARC_STEPS)
    }
}

/// A sampled great-circle path between two points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreatCircleArc {
    /// Points along the path, first and last at the endpoints
    pub points: Vec<Cartesian3>,
    /// Arc length in degrees
    pub length_deg: f64,
}

impl GreatCircleArc {
    /// True when the endpoints were too close (or opposite) to interpolate
    pub fn is_collapsed(&self) -> bool {
        (self.length_deg.to_radians()).sin() < COINCIDENT_SIN_EPSILON
    }
}

/// Samples the great circle from `v1` to `v2` on a sphere of `radius`
///
/// Uses spherical linear interpolation
/// `(sin((1-t)θ)·v1 + sin(tθ)·v2) / sin θ` on the normalized endpoints.
/// When `sin θ` is below [`COINCIDENT_SIN_EPSILON`] the path is the first
/// endpoint repeated, never a division by zero.
pub fn great_circle_arc(
    v1: &Cartesian3,
    v2: &Cartesian3,
    radius: f64,
    sampling: &ArcSampling,
) -> GreatCircleArc {
    let n1 = v1.normalize().unwrap_or_default();
    let n2 = v2.normalize().unwrap_or_default();

    let angle = n1.angle_between(&n2);
    let steps = sampling.steps_for(angle);
    let sin_angle = angle.sin();

    let points = if sin_angle < COINCIDENT_SIN_EPSILON {
        debug!(
            "Arc endpoints coincide or are antipodal ({:.3e} rad); repeating first point",
            angle
        );
        vec![n1 * radius; steps + 1]
    } else {
        (0..=steps)
            .map(|step| {
                let t = step as f64 / steps as f64;
                let c1 = ((1.0 - t) * angle).sin() / sin_angle;
                let c2 = (t * angle).sin() / sin_angle;
                (n1 * c1 + n2 * c2) * radius
            })
            .collect()
    };

    GreatCircleArc {
        points,
        length_deg: angle.to_degrees(),
    }
}

/// Side lengths in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    /// Side `BC`, opposite vertex A
    pub a: f64,
    /// Side `CA`, opposite vertex B
    pub b: f64,
    /// Side `AB`, opposite vertex C
    pub c: f64,
}

/// Interior angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    /// Angle at vertex A
    #[serde(rename = "A")]
    pub a: f64,
    /// Angle at vertex B
    #[serde(rename = "B")]
    pub b: f64,
    /// Angle at vertex C
    #[serde(rename = "C")]
    pub c: f64,
}

/// A solved spherical triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalTriangle {
    pub sides: Sides,
    pub angles: Angles,
}

impl SphericalTriangle {
    /// Sum of the interior angles in degrees
    pub fn angle_sum(&self) -> f64 {
        self.angles.a + self.angles.b + self.angles.c
    }

    /// Spherical excess in degrees
    pub fn excess_deg(&self) -> f64 {
        self.angle_sum() - 180.0
    }

    /// Surface area on a sphere of the given radius (excess in radians × r²)
    pub fn area(&self, radius: f64) -> f64 {
        self.excess_deg().to_radians() * radius * radius
    }
}

/// Interior angle opposite `side_opposite`, all in radians
///
/// `None` when either adjacent side has a vanishing sine, i.e. the two
/// vertices it joins coincide or are antipodal.
fn interior_angle(side_opposite: f64, side_adj1: f64, side_adj2: f64) -> Option<f64> {
    let (sin1, sin2) = (side_adj1.sin(), side_adj2.sin());
    if sin1 < DEGENERATE_SIDE_SIN || sin2 < DEGENERATE_SIDE_SIN {
        return None;
    }
    let cos_angle = (side_opposite.cos() - side_adj1.cos() * side_adj2.cos()) / (sin1 * sin2);
    Some(clamp_unit(cos_angle).acos())
}

/// Solves the triangle with vertices `a`, `b`, `c`
///
/// Vertex lengths do not matter; only directions are used.
pub fn solve_triangle(
    a: &Cartesian3,
    b: &Cartesian3,
    c: &Cartesian3,
) -> Result<SphericalTriangle, TriangleError> {
    let side_c = a.angle_between(b);
    let side_a = b.angle_between(c);
    let side_b = c.angle_between(a);

    let degenerate = || TriangleError::Degenerate {
        side_a: side_a.to_degrees(),
        side_b: side_b.to_degrees(),
        side_c: side_c.to_degrees(),
    };

    let angle_a = interior_angle(side_a, side_b, side_c).ok_or_else(degenerate)?;
    let angle_b = interior_angle(side_b, side_a, side_c).ok_or_else(degenerate)?;
    let angle_c = interior_angle(side_c, side_a, side_b).ok_or_else(degenerate)?;

    Ok(SphericalTriangle {
        sides: Sides {
            a: side_a.to_degrees(),
            b: side_b.to_degrees(),
            c: side_c.to_degrees(),
        },
        angles: Angles {
            a: angle_a.to_degrees(),
            b: angle_b.to_degrees(),
            c: angle_c.to_degrees(),
        },
    })
}

/// Outcome of [`VertexSet::add_or_replace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexUpdate {
    /// The point was appended at this index
    Added(usize),
    /// The vertex at this index was replaced
    Replaced(usize),
    /// The set was full and no vertex was close enough, or the point had no
    /// direction
    Ignored,
}

/// What can be drawn from the current vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Construction {
    /// Fewer than two vertices
    Incomplete { vertices: usize },
    /// Two vertices: one arc
    Arc(GreatCircleArc),
    /// Three vertices: arcs `AB`, `BC`, `CA` and the solution
    Triangle {
        arcs: [GreatCircleArc; 3],
        solution: Result<SphericalTriangle, TriangleError>,
    },
}

/// Up to three points on a sphere, filled incrementally
///
/// States are 0, 1, 2 or 3 vertices. Once full, a new point replaces the
/// nearest vertex if it lies within `replace_fraction * radius` (chord
/// distance); otherwise it is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSet {
    vertices: Vec<Cartesian3>,
    radius: f64,
    replace_fraction: f64,
}

impl VertexSet {
    /// Creates an empty set on a sphere of `radius`
    pub fn new(radius: f64) -> Self {
        Self::with_replace_fraction(radius, 0.5)
    }

    /// Creates an empty set with a custom replacement threshold
    pub fn with_replace_fraction(radius: f64, replace_fraction: f64) -> Self {
        VertexSet {
            vertices: Vec::with_capacity(MAX_VERTICES),
            radius,
            replace_fraction,
        }
    }

    /// Sphere radius the vertices live on
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current vertices in insertion order
    pub fn vertices(&self) -> &[Cartesian3] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.vertices.len() == MAX_VERTICES
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Adds a point, or replaces the nearest vertex once three are present
    ///
    /// The point is projected onto the sphere first.
    pub fn add_or_replace(&mut self, point: Cartesian3) -> VertexUpdate {
        let projected = match point.with_radius(self.radius) {
            Some(projected) => projected,
            None => {
                debug!("Ignoring vertex without a direction: {:?}", point);
                return VertexUpdate::Ignored;
            }
        };

        if !self.is_full() {
            self.vertices.push(projected);
            return VertexUpdate::Added(self.vertices.len() - 1);
        }

        let nearest = self
            .vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (index, vertex.distance_to(&projected)))
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2));

        match nearest {
            Some((index, distance)) if distance < self.radius * self.replace_fraction => {
                self.vertices[index] = projected;
                VertexUpdate::Replaced(index)
            }
            _ => {
                debug!("No vertex near {:?}; set left unchanged", projected);
                VertexUpdate::Ignored
            }
        }
    }

    /// Arcs and, for three vertices, the solved triangle
    pub fn construct(&self, sampling: &ArcSampling) -> Construction {
        let arc = |i: usize, j: usize| {
            great_circle_arc(&self.vertices[i], &self.vertices[j], self.radius, sampling)
        };

        match self.vertices.as_slice() {
            [_, _] => Construction::Arc(arc(0, 1)),
            [a, b, c] => {
                let solution = solve_triangle(a, b, c);
                if let Err(err) = &solution {
                    debug!("{}", err);
                }
                Construction::Triangle {
                    arcs: [arc(0, 1), arc(1, 2), arc(2, 0)],
                    solution,
                }
            }
            other => Construction::Incomplete {
                vertices: other.len(),
            },
        }
    }
}
