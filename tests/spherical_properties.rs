//! Property checks across the public API on seeded random inputs

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use skysphere::coordinates::{
    direction_to_equatorial, direction_to_horizontal, equatorial_to_direction,
    horizontal_to_direction, sexagesimal, Cartesian3,
};
use skysphere::horizon::{calculate_rise_set, solve_pzs, DiurnalCircle, HorizonCrossing};
use skysphere::triangle::{great_circle_arc, solve_isosceles, solve_triangle, ArcSampling};
use skysphere::{Problem, Solution, SphereConfig};

const SAMPLES: usize = 500;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED_CAFE)
}

fn random_equatorial(rng: &mut StdRng) -> (f64, f64) {
    (rng.gen_range(0.0..24.0), rng.gen_range(-89.0..89.0))
}

#[test]
fn sexagesimal_round_trip() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let value: f64 = rng.gen_range(-360.0..360.0);
        for precision in [0usize, 1, 3, 6] {
            let text = sexagesimal::format(value, precision);
            let tolerance = 0.5 * 10f64.powi(-(precision as i32)) / 3600.0 + 1e-12;
            assert!(
                (sexagesimal::parse(&text) - value).abs() <= tolerance,
                "{} -> {} at precision {}",
                value,
                text,
                precision
            );
        }
    }
}

#[test]
fn directions_lie_on_the_sphere() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let radius = rng.gen_range(0.1..100.0);
        let (ra, dec) = random_equatorial(&mut rng);
        let d = equatorial_to_direction(ra, dec, radius);
        assert_abs_diff_eq!(d.magnitude(), radius, epsilon = 1e-9 * radius);

        let az = rng.gen_range(0.0..360.0);
        let alt = rng.gen_range(-90.0..90.0);
        let h = horizontal_to_direction(az, alt, radius);
        assert_abs_diff_eq!(h.magnitude(), radius, epsilon = 1e-9 * radius);
    }
}

#[test]
fn directions_invert() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let (ra, dec) = random_equatorial(&mut rng);
        let (ra2, dec2) = direction_to_equatorial(&equatorial_to_direction(ra, dec, 7.0));
        assert_abs_diff_eq!(ra2, ra, epsilon = 1e-9);
        assert_abs_diff_eq!(dec2, dec, epsilon = 1e-9);

        let az = rng.gen_range(0.0..360.0);
        let alt = rng.gen_range(-89.0..89.0);
        let (az2, alt2) = direction_to_horizontal(&horizontal_to_direction(az, alt, 7.0));
        assert_abs_diff_eq!(az2, az, epsilon = 1e-9);
        assert_abs_diff_eq!(alt2, alt, epsilon = 1e-9);
    }
}

#[test]
fn arcs_start_and_end_at_their_endpoints() {
    let mut rng = rng();
    let sampling = ArcSampling::default();
    for _ in 0..SAMPLES {
        let (ra1, dec1) = random_equatorial(&mut rng);
        let (ra2, dec2) = random_equatorial(&mut rng);
        let v1 = equatorial_to_direction(ra1, dec1, 10.0);
        let v2 = equatorial_to_direction(ra2, dec2, 10.0);
        let arc = great_circle_arc(&v1, &v2, 10.0, &sampling);

        assert!(arc.points[0].distance_to(&v1) < 1e-9);
        if !arc.is_collapsed() {
            assert!(arc.points[arc.points.len() - 1].distance_to(&v2) < 1e-9);
        }
        for point in &arc.points {
            assert_abs_diff_eq!(point.magnitude(), 10.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn triangle_angle_sum_exceeds_two_right_angles() {
    let mut rng = rng();
    let mut solved = 0;
    for _ in 0..SAMPLES {
        let points: Vec<Cartesian3> = (0..3)
            .map(|_| {
                let (ra, dec) = random_equatorial(&mut rng);
                equatorial_to_direction(ra, dec, 10.0)
            })
            .collect();
        if let Ok(triangle) = solve_triangle(&points[0], &points[1], &points[2]) {
            solved += 1;
            assert!(triangle.angle_sum() > 180.0 - 1e-9);
            assert!(triangle.angle_sum() < 540.0 + 1e-9);
            assert!(triangle.area(10.0) >= -1e-9);
        }
    }
    assert!(solved > SAMPLES / 2);
}

#[test]
fn excess_grows_with_triangle_size() {
    // Equilateral-ish triangles around the pole with growing polar distance
    let mut previous = 0.0;
    for polar_distance in [5.0, 10.0, 20.0, 40.0, 60.0] {
        let dec = 90.0 - polar_distance;
        let a = equatorial_to_direction(0.0, dec, 1.0);
        let b = equatorial_to_direction(8.0, dec, 1.0);
        let c = equatorial_to_direction(16.0, dec, 1.0);
        let excess = solve_triangle(&a, &b, &c).unwrap().excess_deg();
        assert!(excess > previous, "{} <= {}", excess, previous);
        previous = excess;
    }
}

#[rstest]
#[case(40.0, 20.0)]
#[case(40.0, 70.0)]
#[case(-35.0, -10.0)]
#[case(-35.0, 20.0)]
#[case(10.0, 10.5)]
fn pzs_transit_is_on_the_meridian(#[case] lat: f64, #[case] dec: f64) {
    let azimuth = solve_pzs(lat, dec, 0.0).azimuth;
    let on_meridian = azimuth.abs() < 1e-9 || (azimuth - 180.0).abs() < 1e-9;
    assert!(on_meridian, "azimuth {} at lat={} dec={}", azimuth, lat, dec);
}

#[test]
fn pzs_altitude_matches_diurnal_circle() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let lat = rng.gen_range(-85.0..85.0);
        let dec = rng.gen_range(-85.0..85.0);
        let ha = rng.gen_range(-12.0..12.0);
        let position = solve_pzs(lat, dec, ha);
        let point = DiurnalCircle::new(lat, dec, 10.0).position_at(ha);
        assert_abs_diff_eq!(
            point.y,
            10.0 * position.altitude.to_radians().sin(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn rise_set_reference_cases() {
    let refraction = 50.0 / 60.0;

    let circumpolar = calculate_rise_set(80.0, 20.0, refraction);
    assert!(circumpolar.degenerate);
    assert_eq!(circumpolar.crossing, HorizonCrossing::Circumpolar);

    let equinox = calculate_rise_set(40.0, 0.0, refraction);
    assert!(!equinox.degenerate);
    assert_abs_diff_eq!(equinox.hour_angle, 6.07, epsilon = 0.01);
}

#[test]
fn circumpolar_when_pole_distance_fits_above_horizon() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let lat: f64 = rng.gen_range(1.0..89.0);
        let dec: f64 = rng.gen_range(1.0..89.0);
        let result = calculate_rise_set(lat, dec, 0.0);
        // Upper bound of the lower culmination altitude
        let lower_culmination = lat + dec - 90.0;
        if lower_culmination > 1e-6 {
            assert_eq!(result.crossing, HorizonCrossing::Circumpolar);
        } else if lower_culmination < -1e-6 {
            assert_eq!(result.crossing, HorizonCrossing::RisesAndSets);
        }

        let southern = calculate_rise_set(-lat, -dec, 0.0);
        assert_eq!(southern.crossing, result.crossing);
        assert_abs_diff_eq!(southern.hour_angle, result.hour_angle, epsilon = 1e-9);
    }
}

#[test]
fn isosceles_textbook_values() {
    let solution = solve_isosceles(125.511, 101.343, 1.0);
    assert_abs_diff_eq!(solution.base_side, 141.895, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.apex_angle, 149.181, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.excess, 220.20, epsilon = 1e-2);
}

#[test]
fn solving_twice_gives_the_same_solution() {
    let config = SphereConfig::default();
    let problems = [
        Problem::Explore {
            points: vec![
                skysphere::problem::EquatorialPoint::new(1.0, 10.0),
                skysphere::problem::EquatorialPoint::new(5.0, -20.0),
                skysphere::problem::EquatorialPoint::new(9.0, 45.0),
            ],
        },
        Problem::Earth {
            angle_a_deg: 125.511,
            side_a_deg: 101.343,
        },
        Problem::Pzs {
            latitude_deg: Some(40.0),
            declination_deg: 20.0,
            hour_angle_hours: 2.0,
        },
        Problem::Sunrise {
            latitude_deg: None,
            day_of_year: 172.0,
            clock_hours: 8.0,
        },
    ];

    for problem in &problems {
        let first: Solution = problem.solve(&config).unwrap();
        let second = problem.solve(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.mode(), problem.mode());
    }
}

#[test]
fn solutions_serialize_to_json() {
    let config = SphereConfig::default();
    let solution = Problem::Earth {
        angle_a_deg: 125.511,
        side_a_deg: 101.343,
    }
    .solve(&config)
    .unwrap();

    let json = serde_json::to_value(&solution).unwrap();
    assert_eq!(json["mode"], "earth");
    let c = json["solution"]["c"].as_f64().unwrap();
    assert_abs_diff_eq!(c, 141.895, epsilon = 1e-3);
    assert!(json["solution"]["C"].is_number());
}
