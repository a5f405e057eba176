//! Skysphere: spherical astronomy on the celestial sphere
//!
//! This crate provides the computation core for spherical astronomy
//! exercises: sexagesimal angle notation, points and great-circle arcs on a
//! sphere, general and isosceles spherical triangles, the equatorial to
//! horizontal transform, and rise/set hour angles.
//!
//! All computations are pure functions of their inputs. Degenerate geometry
//! is reported through flags and `Result`s, never as NaN.
//!
//! ```rust
//! use skysphere::coordinates::sexagesimal;
//! use skysphere::horizon::solve_pzs;
//!
//! let latitude = sexagesimal::parse("38 42 0");
//! let position = solve_pzs(latitude, 20.0, 2.0);
//! println!("altitude {}", sexagesimal::format(position.altitude, 1));
//! ```

use thiserror::Error;

pub mod config;
pub mod constants;
pub mod coordinates;
pub mod horizon;
pub mod problem;
pub mod triangle;

// Re-export commonly used types
pub use config::SphereConfig;
pub use coordinates::Cartesian3;
pub use problem::{Problem, Solution, SolverMode};
pub use triangle::{SphericalTriangle, TriangleError};

/// Main error type for the skysphere library
#[derive(Debug, Error)]
pub enum SkysphereError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Triangle(#[from] TriangleError),
}

/// Result type for skysphere operations
pub type Result<T> = std::result::Result<T, SkysphereError>;
