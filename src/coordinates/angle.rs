//! # Angle Representation Module
//!
//! This module provides exact angle representation that preserves the original
//! precision and format (degrees, hours or radians) of angular measurements,
//! together with the sexagesimal decomposition used by starlists.
//!
//! ## Internal Storage
//!
//! The `Angle` struct uses an enum-based storage system:
//! - Values provided in degrees are stored exactly as degrees
//! - Values provided in hours are stored exactly as hours
//! - Values provided in radians are stored exactly as radians
//! - Conversion only occurs when explicitly requested
//!
//! ## Examples
//!
//! ```rust
//! use ukirtfs::coordinates::angle::Angle;
//!
//! let ra = Angle::from_degrees(76.155);
//! assert_eq!(ra.to_hms(3).to_starlist_string(false), "05 04 37.200");
//!
//! let dec = Angle::from_degrees(-19.617939);
//! assert_eq!(dec.to_dms(3).to_starlist_string(true), "-19 37 04.580");
//! ```

use std::f64::consts::PI;

use crate::Result;
use crate::StarlistError;

/// Internal representation format for angle values
#[derive(Debug, Clone, Copy, PartialEq)]
enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in hours of right ascension (1h = 15 degrees)
    Hours(f64),
    /// Angle stored in radians
    Radians(f64),
}

/// Represents an angular measurement with exact precision preservation
///
/// Values are stored in their original format to prevent precision loss.
/// Conversion between formats only occurs when explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    angle: AngleFormat,
}

impl Angle {
    /// Creates an angle from a value in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ukirtfs::coordinates::angle::Angle;
    ///
    /// let right_angle = Angle::from_degrees(90.0);
    /// assert_eq!(right_angle.to_degrees(), 90.0);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in hours of right ascension
    pub fn from_hours(hours: f64) -> Self {
        Angle {
            angle: AngleFormat::Hours(hours),
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Returns the angle value in degrees
    ///
    /// Angles stored as degrees return the exact original value.
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Hours(h) => h * 15.0,
            AngleFormat::Radians(rad) => rad * (180.0 / PI),
        }
    }

    /// Returns the angle value in hours
    pub fn to_hours(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg / 15.0,
            AngleFormat::Hours(h) => h,
            AngleFormat::Radians(rad) => rad * (12.0 / PI),
        }
    }

    /// Returns the angle value in radians
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg * (PI / 180.0),
            AngleFormat::Hours(h) => h * (PI / 12.0),
            AngleFormat::Radians(rad) => rad,
        }
    }

    /// Decompose into hours, minutes and seconds of time
    ///
    /// The hour angle is wrapped into [0h, 24h) both before and after
    /// rounding, so 23h59m59.9999s at 3 digits becomes 00 00 00.000.
    pub fn to_hms(&self, frac_digits: u8) -> Sexagesimal {
        let hours = self.to_hours().rem_euclid(24.0);
        let mut parts = Sexagesimal::decompose(hours, frac_digits);
        parts.whole %= 24;
        parts.negative = false;
        parts
    }

    /// Decompose into degrees, arcminutes and arcseconds
    pub fn to_dms(&self, frac_digits: u8) -> Sexagesimal {
        Sexagesimal::decompose(self.to_degrees(), frac_digits)
    }

    /// Parse a right ascension given as `HH MM SS.ss`, `HH:MM:SS`,
    /// `12h30m15s` or decimal hours.
    pub fn parse_hours(text: &str) -> Result<Self> {
        parse_sexagesimal(text).map(Angle::from_hours)
    }

    /// Parse a declination given as `+DD MM SS.ss`, `-DD:MM:SS`,
    /// `45d30m15s` or decimal degrees.
    pub fn parse_degrees(text: &str) -> Result<Self> {
        parse_sexagesimal(text).map(Angle::from_degrees)
    }
}

/// A sexagesimal (base-60) decomposition of an angle, rounded to a fixed
/// number of fractional digits of the seconds field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sexagesimal {
    pub negative: bool,
    /// Whole hours or degrees
    pub whole: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Fractional seconds, in units of 10^-frac_digits
    pub fraction: u64,
    pub frac_digits: u8,
}

impl Sexagesimal {
    fn decompose(value: f64, frac_digits: u8) -> Self {
        let scale = 10u64.pow(u32::from(frac_digits));
        let ticks = (value.abs() * 3600.0 * scale as f64).round() as u64;
        let ticks_per_minute = 60 * scale;
        let ticks_per_unit = 60 * ticks_per_minute;

        let seconds_ticks = ticks % ticks_per_minute;
        Sexagesimal {
            // Rounding to zero drops the sign so we never print "-00 00 00.000"
            negative: value < 0.0 && ticks > 0,
            whole: ticks / ticks_per_unit,
            minutes: (ticks % ticks_per_unit) / ticks_per_minute,
            seconds: seconds_ticks / scale,
            fraction: seconds_ticks % scale,
            frac_digits,
        }
    }

    /// Space separated `HH MM SS.sss` (or `+DD MM SS.sss` with `signed`).
    pub fn to_starlist_string(&self, signed: bool) -> String {
        let sign = match (signed, self.negative) {
            (true, true) => "-",
            (true, false) => "+",
            (false, _) => "",
        };
        if self.frac_digits == 0 {
            return format!(
                "{}{:02} {:02} {:02}",
                sign, self.whole, self.minutes, self.seconds
            );
        }
        format!(
            "{}{:02} {:02} {:02}.{:0width$}",
            sign,
            self.whole,
            self.minutes,
            self.seconds,
            self.fraction,
            width = self.frac_digits as usize
        )
    }
}

fn parse_sexagesimal(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let fields: Vec<&str> = body
        .split(|c: char| c.is_whitespace() || matches!(c, ':' | 'h' | 'd' | 'm' | 's'))
        .filter(|field| !field.is_empty())
        .collect();

    if fields.is_empty() || fields.len() > 3 {
        return Err(StarlistError::ParseError(format!(
            "Invalid sexagesimal angle: '{}'",
            text
        )));
    }

    let mut value = 0.0;
    let mut divisor = 1.0;
    for (i, field) in fields.iter().enumerate() {
        let number = field.parse::<f64>().map_err(|_| {
            StarlistError::ParseError(format!("Invalid sexagesimal angle: '{}'", text))
        })?;
        if number < 0.0 || (i > 0 && number >= 60.0) {
            return Err(StarlistError::ParseError(format!(
                "Sexagesimal field out of range in '{}'",
                text
            )));
        }
        value += number / divisor;
        divisor *= 60.0;
    }

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_from_degrees_exact_storage() {
        let angle = Angle::from_degrees(45.0);
        assert_eq!(angle.to_degrees(), 45.0);

        match angle.angle {
            AngleFormat::Degrees(val) => assert_eq!(val, 45.0),
            _ => panic!("Expected degrees format"),
        }
    }

    #[test]
    fn test_hours_conversion() {
        let angle = Angle::from_hours(6.0);
        assert_eq!(angle.to_degrees(), 90.0);
        assert_abs_diff_eq!(angle.to_radians(), PI / 2.0, epsilon = 1e-15);
        assert_eq!(Angle::from_degrees(180.0).to_hours(), 12.0);
    }

    #[test]
    fn test_hms_decomposition() {
        // 05h04m37.23s
        let ra = Angle::from_hours(5.0 + 4.0 / 60.0 + 37.23 / 3600.0);
        assert_eq!(ra.to_hms(3).to_starlist_string(false), "05 04 37.230");
        assert_eq!(ra.to_hms(0).to_starlist_string(false), "05 04 37");
    }

    #[test]
    fn test_hms_rounding_carries() {
        let ra = Angle::from_hours(1.0 + 59.0 / 60.0 + 59.99996 / 3600.0);
        assert_eq!(ra.to_hms(3).to_starlist_string(false), "02 00 00.000");

        let wrap = Angle::from_hours(23.0 + 59.0 / 60.0 + 59.99996 / 3600.0);
        assert_eq!(wrap.to_hms(3).to_starlist_string(false), "00 00 00.000");
    }

    #[test]
    fn test_negative_ra_wraps() {
        let ra = Angle::from_hours(-1.5);
        assert_eq!(ra.to_hms(1).to_starlist_string(false), "22 30 00.0");
    }

    #[test]
    fn test_dms_sign() {
        let dec = Angle::from_degrees(-(19.0 + 37.0 / 60.0 + 4.58 / 3600.0));
        assert_eq!(dec.to_dms(3).to_starlist_string(true), "-19 37 04.580");

        let north = Angle::from_degrees(12.0);
        assert_eq!(north.to_dms(2).to_starlist_string(true), "+12 00 00.00");

        // Just south of the equator, rounds to zero and loses the sign
        let tiny = Angle::from_degrees(-1e-9);
        assert_eq!(tiny.to_dms(3).to_starlist_string(true), "+00 00 00.000");

        let small = Angle::from_degrees(-0.5);
        assert_eq!(small.to_dms(0).to_starlist_string(true), "-00 30 00");
    }

    #[test]
    fn test_parse_hours_forms() {
        let expected = 8.0 + 47.0 / 60.0 + 42.5 / 3600.0;
        for text in ["8 47 42.5", "08:47:42.5", "8h47m42.5s", "08 47 42.50"] {
            let angle = Angle::parse_hours(text).unwrap();
            assert_abs_diff_eq!(angle.to_hours(), expected, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(
            Angle::parse_hours("12.5").unwrap().to_degrees(),
            187.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parse_degrees_sign() {
        let angle = Angle::parse_degrees("-19 37 04.58").unwrap();
        assert_abs_diff_eq!(
            angle.to_degrees(),
            -(19.0 + 37.0 / 60.0 + 4.58 / 3600.0),
            epsilon = 1e-12
        );
        let angle = Angle::parse_degrees("+34 45 04.3").unwrap();
        assert!(angle.to_degrees() > 34.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Angle::parse_hours("abc").is_err());
        assert!(Angle::parse_hours("").is_err());
        assert!(Angle::parse_degrees("10 75 00").is_err());
        assert!(Angle::parse_degrees("1 2 3 4").is_err());
    }
}
