//! Isosceles spherical triangles via Napier's rules
//!
//! Given a base angle `A` (with `B = A`) and the side `a` opposite it (so the
//! legs `a = b` meet at the apex `C`), bisecting the apex splits the triangle
//! into two right spherical triangles. Napier's rules on one half give:
//!
//! ```text
//! cos A = tan(c/2) · cot a   =>  c/2 = atan(cos A · tan a)
//! cos a = cot A · cot(C/2)   =>  C/2 = atan(1 / (cos a · tan A))
//! ```
//!
//! ## Ill-conditioned inputs
//!
//! With `A` or `a` near 90° the products above approach 0 or infinity and
//! the half-angles lose precision or jump by π. The values are returned as
//! computed (IEEE `atan(±∞) = ±π/2`, never a panic) and
//! [`IsoscelesSolution::ill_conditioned`] is set.

use super::{great_circle_arc, ArcSampling, GreatCircleArc};
use crate::coordinates::Cartesian3;
use log::warn;
use serde::Serialize;

/// Products outside `[CONDITION_LOW, CONDITION_HIGH]` mark the result as unreliable
const CONDITION_LOW: f64 = 1e-9;
const CONDITION_HIGH: f64 = 1e9;
/// `|cos|` below this means the angle is within about 0.2" of 90°
const NEAR_RIGHT_ANGLE_COS: f64 = 1e-6;

/// Solution of the isosceles triangle `A = B`, `a = b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsoscelesSolution {
    /// Base side `c` in degrees
    #[serde(rename = "c")]
    pub base_side: f64,
    /// Apex angle `C` in degrees
    #[serde(rename = "C")]
    pub apex_angle: f64,
    /// Surface area in units of the supplied body radius squared
    pub area: f64,
    /// Spherical excess `2A + C - 180` in degrees
    pub excess: f64,
    /// Set when `A` or `a` is close enough to 90° that the result is unreliable
    pub ill_conditioned: bool,
}

fn is_ill_conditioned(product: f64) -> bool {
    let magnitude = product.abs();
    !magnitude.is_finite() || magnitude < CONDITION_LOW || magnitude > CONDITION_HIGH
}

/// Solves the isosceles triangle from base angle `A` and opposite side `a`
///
/// Angles are in degrees. `body_radius` turns the excess into a physical
/// area, e.g. `EARTH_MEAN_RADIUS_KM` for km².
///
/// # Examples
///
/// ```rust
/// use skysphere::triangle::napier::solve_isosceles;
///
/// let solution = solve_isosceles(125.511, 101.343, 6371.0);
/// assert!((solution.apex_angle - 149.18).abs() < 0.01);
/// assert!(solution.excess > 0.0);
/// ```
pub fn solve_isosceles(angle_a_deg: f64, side_a_deg: f64, body_radius: f64) -> IsoscelesSolution {
    let angle_a = angle_a_deg.to_radians();
    let side_a = side_a_deg.to_radians();

    let half_c_arg = angle_a.cos() * side_a.tan();
    let half_c = half_c_arg.atan();

    let apex_denominator = side_a.cos() * angle_a.tan();
    let half_apex = (1.0 / apex_denominator).atan();

    let base_side = (2.0 * half_c).to_degrees();
    let apex_angle = (2.0 * half_apex).to_degrees();
    let excess = 2.0 * angle_a_deg + apex_angle - 180.0;
    let area = excess.to_radians() * body_radius * body_radius;

    let ill_conditioned = angle_a.cos().abs() < NEAR_RIGHT_ANGLE_COS
        || side_a.cos().abs() < NEAR_RIGHT_ANGLE_COS
        || is_ill_conditioned(half_c_arg)
        || is_ill_conditioned(apex_denominator);
    if ill_conditioned {
        warn!(
            "Isosceles solution for A={}°, a={}° is ill-conditioned (near 90°)",
            angle_a_deg, side_a_deg
        );
    }

    IsoscelesSolution {
        base_side,
        apex_angle,
        area,
        excess,
        ill_conditioned,
    }
}

/// Placement of an isosceles triangle on a sphere for display
///
/// The apex `C` sits at the pole (+Y); `A` and `B` share colatitude `a` and
/// sit at longitudes `-C/2` and `+C/2`, so both legs have length `a` and the
/// apex angle is `C`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsoscelesScene {
    pub apex: Cartesian3,
    pub vertex_a: Cartesian3,
    pub vertex_b: Cartesian3,
    /// Legs `CA`, `CB` and the base `AB`
    pub arcs: [GreatCircleArc; 3],
}

impl IsoscelesScene {
    /// Steps used for each displayed arc
    pub const ARC_STEPS: usize = 32;

    pub fn new(solution: &IsoscelesSolution, side_a_deg: f64, radius: f64) -> Self {
        let apex = Cartesian3::new(0.0, radius, 0.0);

        let latitude = (90.0 - side_a_deg).to_radians();
        let y = radius * latitude.sin();
        let r_plane = radius * latitude.cos();

        let at_longitude = |longitude_deg: f64| {
            let longitude = longitude_deg.to_radians();
            Cartesian3::new(r_plane * longitude.sin(), y, r_plane * longitude.cos())
        };
        let vertex_a = at_longitude(-solution.apex_angle / 2.0);
        let vertex_b = at_longitude(solution.apex_angle / 2.0);

        let sampling = ArcSampling::fixed(Self::ARC_STEPS);
        let arcs = [
            great_circle_arc(&apex, &vertex_a, radius, &sampling),
            great_circle_arc(&apex, &vertex_b, radius, &sampling),
            great_circle_arc(&vertex_a, &vertex_b, radius, &sampling),
        ];

        IsoscelesScene {
            apex,
            vertex_a,
            vertex_b,
            arcs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EARTH_MEAN_RADIUS_KM;
    use crate::coordinates::sexagesimal::parse;
    use crate::triangle::solve_triangle;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_textbook_problem() {
        // A = 125° 30' 40", a = 101° 20' 35"
        let angle = parse("125 30 40");
        let side = parse("101 20 35");
        let solution = solve_isosceles(angle, side, EARTH_MEAN_RADIUS_KM);

        assert_abs_diff_eq!(solution.base_side, 141.895_115, epsilon = 1e-5);
        assert_abs_diff_eq!(solution.apex_angle, 149.180_786, epsilon = 1e-5);
        assert_abs_diff_eq!(solution.excess, 220.203_008, epsilon = 1e-5);
        assert_abs_diff_eq!(solution.area, 1.559_968_487e8, epsilon = 1e3);
        assert!(!solution.ill_conditioned);
    }

    #[test]
    fn test_decimal_inputs() {
        let solution = solve_isosceles(125.511, 101.343, 1.0);
        assert_abs_diff_eq!(solution.base_side, 141.895_197, epsilon = 1e-5);
        assert_abs_diff_eq!(solution.apex_angle, 149.180_807, epsilon = 1e-5);
        assert!(solution.excess > 0.0);
    }

    #[test]
    fn test_matches_general_solver() {
        let solution = solve_isosceles(70.0, 50.0, 1.0);
        let scene = IsoscelesScene::new(&solution, 50.0, 1.0);
        let triangle = solve_triangle(&scene.vertex_a, &scene.vertex_b, &scene.apex).unwrap();

        assert_abs_diff_eq!(triangle.angles.a, 70.0, epsilon = 1e-9);
        assert_abs_diff_eq!(triangle.angles.b, 70.0, epsilon = 1e-9);
        assert_abs_diff_eq!(triangle.angles.c, solution.apex_angle, epsilon = 1e-9);
        assert_abs_diff_eq!(triangle.sides.c, solution.base_side, epsilon = 1e-9);
        assert_abs_diff_eq!(triangle.excess_deg(), solution.excess, epsilon = 1e-9);
    }

    #[test]
    fn test_scene_arc_lengths() {
        let side = parse("101 20 35");
        let solution = solve_isosceles(parse("125 30 40"), side, 1.0);
        let scene = IsoscelesScene::new(&solution, side, 10.0);

        assert_abs_diff_eq!(scene.arcs[0].length_deg, side, epsilon = 1e-9);
        assert_abs_diff_eq!(scene.arcs[1].length_deg, side, epsilon = 1e-9);
        assert_abs_diff_eq!(scene.arcs[2].length_deg, solution.base_side, epsilon = 1e-9);
        assert_eq!(scene.arcs[2].points.len(), IsoscelesScene::ARC_STEPS + 1);
    }

    #[test]
    fn test_right_angle_inputs_do_not_panic() {
        for (angle, side) in [(90.0, 40.0), (60.0, 90.0), (90.0, 90.0)] {
            let solution = solve_isosceles(angle, side, 1.0);
            assert!(solution.ill_conditioned, "A={} a={}", angle, side);
            assert!(!solution.base_side.is_nan());
            assert!(!solution.apex_angle.is_nan());
        }
    }

    #[test]
    fn test_area_scales_with_radius_squared() {
        let unit = solve_isosceles(80.0, 30.0, 1.0);
        let earth = solve_isosceles(80.0, 30.0, EARTH_MEAN_RADIUS_KM);
        assert_abs_diff_eq!(
            earth.area,
            unit.area * EARTH_MEAN_RADIUS_KM * EARTH_MEAN_RADIUS_KM,
            epsilon = 1e-3
        );
    }
}
