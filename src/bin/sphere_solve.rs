//! Spherical Astronomy Solver
//!
//! Command line front end for the skysphere solvers. Angles may be given as
//! decimal values or in sexagesimal notation ("125 30 40", "2h 30m 0s").
//!
//! Usage:
//!   cargo run --bin sphere_solve -- triangle --vertex "0,0" --vertex "6,0" --vertex "0,90"
//!   cargo run --bin sphere_solve -- earth --angle "125 30 40" --side "101 20 35"
//!   cargo run --bin sphere_solve -- pzs --lat 40 --dec 20 --ha 2
//!   cargo run --bin sphere_solve -- --json sunrise --lat 38.7 --day 2024-06-21 --time 9.5

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use skysphere::coordinates::sexagesimal::{format, format_time, parse};
use skysphere::problem::{EquatorialPoint, Problem, Solution, SunriseSolution};
use skysphere::triangle::{Construction, MAX_VERTICES};
use skysphere::{SkysphereError, SphereConfig};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Decimals of arc-seconds in human output
const PRECISION: usize = 1;

/// Spherical Astronomy Solver
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Solves spherical triangles, PZS triangles and sunrise problems",
    long_about = None
)]
struct Args {
    /// JSON configuration file overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the solution as JSON
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Triangle from points given as "RA,DEC" (RA in hours, DEC in degrees)
    Triangle {
        /// A vertex; a fourth one replaces the nearest of the first three
        #[arg(short, long = "vertex", required = true, allow_hyphen_values = true)]
        vertices: Vec<String>,
    },
    /// Isosceles triangle on the Earth from base angle A and opposite side a
    Earth {
        #[arg(short, long, allow_hyphen_values = true)]
        angle: String,
        #[arg(short, long, allow_hyphen_values = true)]
        side: String,
    },
    /// Altitude and azimuth from latitude, declination and hour angle
    Pzs {
        /// Observer latitude in degrees (defaults to the configured latitude)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        dec: String,
        /// Hour angle in hours, positive west
        #[arg(long, allow_hyphen_values = true)]
        ha: String,
    },
    /// Sunrise, sunset and the Sun's position for a day of the year
    Sunrise {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        /// Day of the year (1-365) or a date as YYYY-MM-DD
        #[arg(long)]
        day: String,
        /// Local clock time, noon at transit
        #[arg(long, default_value = "12")]
        time: String,
    },
}

/// Parses "RA,DEC" or "RA DEC" into an equatorial point
fn parse_vertex(text: &str) -> Result<EquatorialPoint> {
    let fields: Vec<&str> = if text.contains(',') {
        text.splitn(2, ',').collect()
    } else {
        text.split_whitespace().collect()
    };
    match fields.as_slice() {
        [ra, dec] => Ok(EquatorialPoint::new(parse(*ra), parse(*dec))),
        _ => Err(format!("expected \"RA,DEC\", got {:?}", text).into()),
    }
}

/// Accepts a day-of-year number or an ISO date
fn parse_day(text: &str) -> Result<f64> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(f64::from(date.ordinal()));
    }
    let day: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("expected a day number or YYYY-MM-DD, got {:?}", text))?;
    if !(1.0..=366.0).contains(&day) {
        return Err(format!("day of year must be within 1-366, got {}", day).into());
    }
    Ok(day)
}

fn build_problem(command: &Command) -> Result<Problem> {
    let problem = match command {
        Command::Triangle { vertices } => {
            if vertices.len() > MAX_VERTICES + 1 {
                return Err(format!("at most {} vertices", MAX_VERTICES + 1).into());
            }
            let points = vertices
                .iter()
                .map(|v| parse_vertex(v))
                .collect::<Result<Vec<_>>>()?;
            Problem::Explore { points }
        }
        Command::Earth { angle, side } => Problem::Earth {
            angle_a_deg: parse(angle),
            side_a_deg: parse(side),
        },
        Command::Pzs { lat, dec, ha } => Problem::Pzs {
            latitude_deg: lat.as_ref().map(parse),
            declination_deg: parse(dec),
            hour_angle_hours: parse(ha),
        },
        Command::Sunrise { lat, day, time } => Problem::Sunrise {
            latitude_deg: lat.as_ref().map(parse),
            day_of_year: parse_day(day)?,
            clock_hours: parse(time),
        },
    };
    Ok(problem)
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<20} {}", format!("{}:", name), value);
}

fn display_explore(solution: &Solution) -> Result<()> {
    if let Solution::Explore {
        updates,
        construction,
        ..
    } = solution
    {
        print_section_header("Vertices");
        for (i, update) in updates.iter().enumerate() {
            print_named_value(&format!("Point {}", i + 1), format!("{:?}", update));
        }

        match construction {
            Construction::Incomplete { vertices } => {
                println!("\nNeed at least two vertices, have {}.", vertices)
            }
            Construction::Arc(arc) => {
                print_section_header("Arc");
                print_named_value("Length", format(arc.length_deg, PRECISION));
            }
            Construction::Triangle { .. } => match solution.triangle() {
                Ok(Some(triangle)) => {
                    print_section_header("Sides");
                    print_named_value("a (BC)", format(triangle.sides.a, PRECISION));
                    print_named_value("b (CA)", format(triangle.sides.b, PRECISION));
                    print_named_value("c (AB)", format(triangle.sides.c, PRECISION));
                    print_section_header("Angles");
                    print_named_value("A", format(triangle.angles.a, PRECISION));
                    print_named_value("B", format(triangle.angles.b, PRECISION));
                    print_named_value("C", format(triangle.angles.c, PRECISION));
                    print_named_value("Excess", format(triangle.excess_deg(), PRECISION));
                }
                Ok(None) => {}
                Err(SkysphereError::Triangle(err)) => println!("\n{}", err),
                Err(err) => return Err(err.into()),
            },
        }
    }
    Ok(())
}

fn display_sunrise(solution: &SunriseSolution) {
    print_section_header("Sun");
    print_named_value("Latitude", format(solution.latitude, PRECISION));
    print_named_value("Declination", format(solution.declination, PRECISION));
    print_named_value("Hour angle", format_time(solution.local_hour_angle, 0));
    print_named_value("Altitude", format(solution.sun.altitude, PRECISION));
    print_named_value("Azimuth", format(solution.sun.azimuth, PRECISION));

    print_section_header("Rise and Set");
    if solution.rise_set.degenerate {
        print_named_value("Horizon", format!("{:?}", solution.rise_set.crossing));
    } else {
        print_named_value("Rise hour angle", format_time(solution.rise_set.rise_hour_angle(), 0));
        print_named_value("Set hour angle", format_time(solution.rise_set.set_hour_angle(), 0));
        print_named_value("Sunrise", format_time(solution.rise_set.rise_clock_hours(), 0));
        print_named_value("Sunset", format_time(solution.rise_set.set_clock_hours(), 0));
    }
    print_named_value("Day length", format_time(solution.rise_set.day_length_hours(), 0));
}

fn display(solution: &Solution) -> Result<()> {
    match solution {
        Solution::Explore { .. } => display_explore(solution)?,
        Solution::Earth { solution, .. } => {
            print_section_header("Isosceles Triangle");
            print_named_value("Base side c", format(solution.base_side, PRECISION));
            print_named_value("Apex angle C", format(solution.apex_angle, PRECISION));
            print_named_value("Excess", format(solution.excess, PRECISION));
            print_named_value("Area", format!("{:.3e} km²", solution.area));
            if solution.ill_conditioned {
                println!("\nWarning: inputs near 90° make this solution unreliable.");
            }
        }
        Solution::Pzs { position, .. } => {
            print_section_header("Horizontal Position");
            print_named_value("Altitude", format(position.altitude, PRECISION));
            print_named_value("Azimuth", format(position.azimuth, PRECISION));
            print_named_value("Zenith distance", format(position.zenith_distance(), PRECISION));
        }
        Solution::Sunrise(solution) => display_sunrise(solution),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SphereConfig::from_file(path)?,
        None => SphereConfig::default(),
    };

    let problem = build_problem(&args.command)?;
    let solution = problem.solve(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        display(&solution)?;
    }

    Ok(())
}
