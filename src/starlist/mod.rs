//! Keck starlist format
//!
//! A starlist line is laid out in fixed columns:
//!
//! ```text
//! S2CM006571      05 04 37.230 -19 37 04.580 2000 rmag=14.73 b-r=2.38
//! |-- name(15) --| RA (col 17)  Dec          equinox  keywords...
//! ```
//!
//! The name occupies columns 1-15 (padded or truncated), RA begins in
//! column 17, and RA, Dec, equinox and each keyword are separated by a
//! single space. Lines beginning with `#` are comments.

mod keywords;
mod parse;

pub use keywords::{KeywordValue, Keywords, DEFAULT_DECIMALS};
pub use parse::{
    parse_starlist, parse_starlist_line, verify_starlist_line, Diagnostic, Severity,
};

use crate::coordinates::Equatorial;

/// Width of the name field
pub const NAME_WIDTH: usize = 15;

/// Fractional digits of the RA seconds and Dec arcseconds fields
pub const POSITION_DIGITS: u8 = 3;

/// Comment marker
pub const COMMENT_PREFIX: char = '#';

/// Equinox field of a starlist line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equinox {
    /// Mean equinox of the given (Julian or Besselian) year
    Year(f64),
    /// Apparent coordinates, `APP`
    Apparent,
    /// No equinox given on the line
    Unspecified,
}

impl Equinox {
    pub const J2000: Equinox = Equinox::Year(2000.0);

    pub fn to_field(&self) -> String {
        match self {
            Equinox::Year(year) if year.fract() == 0.0 => format!("{:.0}", year),
            Equinox::Year(year) => format!("{}", year),
            Equinox::Apparent => "APP".to_string(),
            Equinox::Unspecified => String::new(),
        }
    }
}

/// One parsed line of a starlist
#[derive(Debug, Clone, PartialEq)]
pub struct StarlistEntry {
    pub name: String,
    pub position: Equatorial,
    pub equinox: Equinox,
    pub keywords: Keywords,
}

/// Fit a target name into the 15 column name field
pub fn format_name(name: &str) -> String {
    let name = name.trim();
    format!("{:<width$.width$}", name, width = NAME_WIDTH)
}

/// `HH MM SS.SSS +DD MM SS.SSS`
pub fn format_position(position: &Equatorial) -> String {
    format!(
        "{} {}",
        position
            .ra_angle()
            .to_hms(POSITION_DIGITS)
            .to_starlist_string(false),
        position
            .dec_angle()
            .to_dms(POSITION_DIGITS)
            .to_starlist_string(true)
    )
}

/// Render one J2000 target as a starlist line (no trailing newline)
pub fn format_starlist_line(name: &str, position: &Equatorial, keywords: &Keywords) -> String {
    let mut line = format!(
        "{} {} {}",
        format_name(name),
        format_position(position),
        Equinox::J2000.to_field()
    );
    for token in keywords.to_tokens() {
        line.push(' ');
        line.push_str(&token);
    }
    line
}
