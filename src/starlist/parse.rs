//! Parsing and linting of starlist lines

use std::io::BufRead;

use lazy_static::lazy_static;
use log::warn;
use regex::{Captures, Regex};
use serde::Serialize;

use super::{Equinox, Keywords, StarlistEntry, COMMENT_PREFIX, NAME_WIDTH};
use crate::coordinates::{Angle, Equatorial};
use crate::Result;
use crate::StarlistError;

// Permissive layout: name up to 15 chars, sexagesimal or decimal RA/Dec,
// optional equinox, then anything else is keywords.
const STARLIST_PATTERN: &str = concat!(
    r"^(?P<Name>.{1,15})\s+",
    r"(?P<RA>(?:\d{1,2}[\s:h][\s\d]?\d[\s:m][\s\d]?\d(?:\.\d+)?s?)|(?:\d+\.\d+))\s+",
    r"(?P<Dec>(?:[+-]?\d{1,2}[\s:d][\s\d]?\d[\s:m][\s\d]?\d(?:\.\d+)?s?)|(?:[+-]?\d+\.\d+))",
    r"(?:\s+(?P<Equinox>\d{4}(?:\.\d+)?|[A-Za-z]+)(?:\s+|$))?\s*",
    r"(?P<Keywords>.+)?$",
);

lazy_static! {
    static ref STARLIST_RE: Regex =
        Regex::new(STARLIST_PATTERN).expect("starlist pattern is valid");
}

fn match_line(text: &str) -> Result<Captures<'_>> {
    STARLIST_RE.captures(text).ok_or_else(|| {
        StarlistError::ParseError(format!(
            "Couldn't parse '{}', no regular expression match found.",
            text
        ))
    })
}

fn parse_equinox(field: Option<&str>) -> Result<Equinox> {
    match field {
        None => Ok(Equinox::Unspecified),
        Some("APP") => Ok(Equinox::Apparent),
        Some(year) => year.parse::<f64>().map(Equinox::Year).map_err(|_| {
            StarlistError::ParseError(format!("Unknown equinox '{}'", year))
        }),
    }
}

/// Parse a single line from a Keck formatted starlist.
///
/// Returns the trimmed target name, its position, the equinox field and
/// the trailing keywords. Keyword tokens without an `=` are skipped.
pub fn parse_starlist_line(text: &str) -> Result<StarlistEntry> {
    let text = text.trim_end_matches(['\n', '\r']);
    let caps = match_line(text)?;

    let ra = Angle::parse_hours(&caps["RA"])?;
    let dec = Angle::parse_degrees(&caps["Dec"])?;
    let equinox = parse_equinox(caps.name("Equinox").map(|m| m.as_str()))?;

    let mut keywords = Keywords::new();
    if let Some(tokens) = caps.name("Keywords") {
        for token in tokens.as_str().split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => keywords.insert(key.trim(), value.trim()),
                None => warn!("Illegal Keyword Argument: '{}'", token),
            }
        }
    }

    Ok(StarlistEntry {
        name: caps["Name"].trim().to_string(),
        position: Equatorial::from_angles(ra, dec),
        equinox,
        keywords,
    })
}

/// Parse every non-comment, non-blank line of a starlist.
pub fn parse_starlist<R: BufRead>(reader: R) -> Result<Vec<StarlistEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        }
        entries.push(parse_starlist_line(line.trim_end())?);
    }
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A single lint finding on a starlist line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The field the finding is about: Name, RA, Dec, Equinox or Keywords
    pub token: &'static str,
    pub message: String,
}

impl Diagnostic {
    fn new(severity: Severity, token: &'static str, message: String) -> Self {
        Self {
            severity,
            token,
            message,
        }
    }

    /// `[Severity][identifier Token] message`
    pub fn compose(&self, identifier: &str) -> String {
        format!(
            "[{:?}][{} {}] {}",
            self.severity, identifier, self.token, self.message
        )
    }
}

/// Verify that a line follows the strict column layout.
///
/// Fails only when the line cannot be parsed at all; layout problems are
/// returned as diagnostics.
pub fn verify_starlist_line(text: &str) -> Result<Vec<Diagnostic>> {
    let text = text.trim_end_matches(['\n', '\r']);
    let caps = match_line(text)?;
    let mut diagnostics = Vec::new();

    let name = &caps["Name"];
    let name_length = name.chars().count();
    if name_length < NAME_WIDTH {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "Name",
            format!(
                "Name should be exactly {} characters long (whitespace is ok.) len(Name)={}",
                NAME_WIDTH, name_length
            ),
        ));
    }

    let (Some(ra), Some(dec)) = (caps.name("RA"), caps.name("Dec")) else {
        return Err(StarlistError::ParseError(format!(
            "Couldn't locate RA and Dec in '{}'",
            text
        )));
    };
    if ra.start() + 1 != NAME_WIDTH + 2 {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "RA",
            format!(
                "RA must start in column {}. Start: {}",
                NAME_WIDTH + 2,
                ra.start() + 1
            ),
        ));
    }

    let gap = dec.start() - ra.end();
    if gap != 1 {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "Dec",
            format!(
                "RA and Dec should be separated by only a single space, found {} characters.",
                gap
            ),
        ));
    }

    if let Some(equinox) = caps.name("Equinox") {
        let gap = equinox.start() - dec.end();
        if gap != 1 {
            diagnostics.push(Diagnostic::new(
                Severity::Warning,
                "Equinox",
                format!(
                    "Dec and Equinox should be separated by only a single space, found {} characters.",
                    gap
                ),
            ));
        }
        if let Err(e) = parse_equinox(Some(equinox.as_str())) {
            diagnostics.push(Diagnostic::new(Severity::Error, "Equinox", e.to_string()));
        }
    }

    if let Some(tokens) = caps.name("Keywords") {
        for token in tokens.as_str().split_whitespace() {
            let count = token.matches('=').count();
            if count != 1 {
                diagnostics.push(Diagnostic::new(
                    Severity::Error,
                    "Keywords",
                    format!(
                        "Each keyword/value pair must have 1 \"=\", {} found '{}'",
                        count, token
                    ),
                ));
            }
        }
    }

    Ok(diagnostics)
}
