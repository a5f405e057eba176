//! # Sexagesimal Angle Module
//!
//! Parsing and formatting of angles written in degree-minute-second
//! (`125° 30' 40"`) or hour-minute-second (`12h 30m 5s`) notation.
//!
//! This is the only place where text is turned into angle scalars. Parsing
//! never fails: malformed fields contribute zero, so a half-typed value in an
//! input box still produces a usable number.
//!
//! ## Examples
//!
//! ```rust
//! use skysphere::coordinates::sexagesimal::{format, parse};
//!
//! assert!((parse("125 30 40") - 125.511_111).abs() < 1e-6);
//! assert_eq!(parse(42.5), 42.5);
//! assert_eq!(format(-9.5, 1), "-9° 30' 0.0\"");
//! ```

use crate::constants::{MINUTES_PER_UNIT, SECONDS_PER_UNIT};
use lazy_static::lazy_static;
use regex::Regex;

/// Largest number of decimals honoured by [`format`] and [`format_time`]
pub const MAX_PRECISION: usize = 9;

lazy_static! {
    /// Any run of unit symbols or whitespace separates two fields
    static ref FIELD_SEPARATOR: Regex = Regex::new(r#"[°'"hms\s]+"#).unwrap();
}

/// Input accepted by [`parse`]: either an already-decimal number or text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleInput<'a> {
    /// A decimal value, returned unchanged
    Number(f64),
    /// Sexagesimal text with up to three fields
    Text(&'a str),
}

impl From<f64> for AngleInput<'_> {
    fn from(value: f64) -> Self {
        AngleInput::Number(value)
    }
}

impl<'a> From<&'a str> for AngleInput<'a> {
    fn from(text: &'a str) -> Self {
        AngleInput::Text(text)
    }
}

impl<'a> From<&'a String> for AngleInput<'a> {
    fn from(text: &'a String) -> Self {
        AngleInput::Text(text.as_str())
    }
}

/// Parses a sexagesimal angle (or time) into a decimal value
///
/// Fields are separated by whitespace or any of `° ' " h m s`. The first
/// three fields are read as units, minutes and seconds; further fields are
/// ignored and missing ones count as zero. A field that is not a finite
/// number contributes zero. The sign of the first field applies to the
/// whole value, so `"-10 30"` is `-10.5`; this intentionally differs from
/// a field-wise signed sum, which would give `-9.5`.
pub fn parse<'a>(input: impl Into<AngleInput<'a>>) -> f64 {
    let text = match input.into() {
        AngleInput::Number(value) => return value,
        AngleInput::Text(text) => text.trim(),
    };

    let mut fields = FIELD_SEPARATOR.split(text).filter(|f| !f.is_empty());

    let first = match fields.next() {
        Some(field) => field,
        None => return 0.0,
    };
    let negative = first.starts_with('-');

    let mut magnitude = parse_field(first).abs();
    for divisor in [MINUTES_PER_UNIT, SECONDS_PER_UNIT] {
        match fields.next() {
            Some(field) => magnitude += parse_field(field).abs() / divisor,
            None => break,
        }
    }

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn parse_field(field: &str) -> f64 {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Formats decimal degrees as `D° M' S.S"`
///
/// Seconds are rounded to `precision` decimals (capped at
/// [`MAX_PRECISION`]) and carried into minutes and degrees, so `59.96"`
/// never shows up as `60.0"`.
pub fn format(degrees: f64, precision: usize) -> String {
    let parts = SexagesimalParts::from_decimal(degrees, precision);
    format!(
        "{}{}° {}' {:.*}\"",
        parts.sign(),
        parts.whole,
        parts.minutes,
        parts.precision,
        parts.seconds
    )
}

/// Formats decimal hours as `Hh Mm S.Ss`
pub fn format_time(hours: f64, precision: usize) -> String {
    let parts = SexagesimalParts::from_decimal(hours, precision);
    format!(
        "{}{}h {}m {:.*}s",
        parts.sign(),
        parts.whole,
        parts.minutes,
        parts.precision,
        parts.seconds
    )
}

/// A decimal value split into whole units, minutes and rounded seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexagesimalParts {
    /// True when the rounded value is below zero
    pub negative: bool,
    /// Whole degrees or hours (integral, unbounded)
    pub whole: f64,
    /// Whole minutes, 0..60
    pub minutes: u64,
    /// Seconds rounded to `precision` decimals, 0..60
    pub seconds: f64,
    /// Number of decimals the seconds were rounded to
    pub precision: usize,
}

impl SexagesimalParts {
    /// Decomposes `value` after rounding it to whole `10^-precision` seconds
    ///
    /// Only the fractional unit is turned into integer ticks, so the
    /// minute and degree carries fall out of integer division while the
    /// whole part keeps the full `f64` range. Non-finite input is treated
    /// as zero.
    pub fn from_decimal(value: f64, precision: usize) -> Self {
        let precision = precision.min(MAX_PRECISION);
        let value = if value.is_finite() { value } else { 0.0 };

        let scale = 10u64.pow(precision as u32);
        let ticks_per_minute = 60 * scale;
        let ticks_per_unit = 3600 * scale;

        let magnitude = value.abs();
        let mut whole = magnitude.trunc();
        let mut ticks = ((magnitude - whole) * SECONDS_PER_UNIT * scale as f64).round() as u64;
        if ticks >= ticks_per_unit {
            whole += 1.0;
            ticks -= ticks_per_unit;
        }

        let minutes = ticks / ticks_per_minute;
        let second_ticks = ticks % ticks_per_minute;

        SexagesimalParts {
            negative: value < 0.0 && (whole > 0.0 || ticks > 0),
            whole,
            minutes,
            seconds: second_ticks as f64 / scale as f64,
            precision,
        }
    }

    /// Reassembles the decimal value
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.whole
            + self.minutes as f64 / MINUTES_PER_UNIT
            + self.seconds / SECONDS_PER_UNIT;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }
}
