//! Targets and target lists in the Keck starlist format
//!
//! ```rust
//! use ukirtfs::coordinates::Equatorial;
//! use ukirtfs::targets::{Target, TargetList};
//!
//! let mut target = Target::new("GuideStar", Equatorial::from_degrees(10.0, 12.0));
//! target.keywords.insert("rmag", 12.0);
//! assert_eq!(
//!     target.to_starlist(),
//!     "GuideStar       00 40 00.000 +12 00 00.000 2000 rmag=12.00"
//! );
//!
//! let list = TargetList::from(vec![target]);
//! assert_eq!(list.names(), vec!["GuideStar"]);
//! ```

use std::fmt;
use std::io::{BufRead, Write};

use crate::coordinates::Equatorial;
use crate::starlist::{format_starlist_line, parse_starlist, Keywords, StarlistEntry};
use crate::Result;

/// A single target with a position, name and keywords
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub position: Equatorial,
    pub keywords: Keywords,
}

impl Target {
    pub fn new(name: impl Into<String>, position: Equatorial) -> Self {
        Self {
            name: name.into(),
            position,
            keywords: Keywords::new(),
        }
    }

    pub fn with_keywords(name: impl Into<String>, position: Equatorial, keywords: Keywords) -> Self {
        Self {
            name: name.into(),
            position,
            keywords,
        }
    }

    /// Render this target as a starlist line
    pub fn to_starlist(&self) -> String {
        format_starlist_line(&self.name, &self.position, &self.keywords)
    }

    pub fn from_starlist(line: &str) -> Result<Self> {
        crate::starlist::parse_starlist_line(line).map(Target::from)
    }
}

// Targets are equal when name and position agree; keywords are ignored
impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.position == other.position
    }
}

impl From<StarlistEntry> for Target {
    fn from(entry: StarlistEntry) -> Self {
        Target::with_keywords(entry.name, entry.position, entry.keywords)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Target '{}'@'{}' {}>",
            self.name,
            self.position.to_hmsdms_string(),
            self.keywords.to_tokens().join(", ")
        )
    }
}

/// An ordered list of targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }

    /// Look up the first target with the given name
    pub fn get_by_name(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Stable sort by right ascension
    pub fn sort_by_ra(&mut self) {
        self.targets
            .sort_by(|a, b| a.position.ra.total_cmp(&b.position.ra));
    }

    /// Write one starlist line per target, each terminated by `\n`
    pub fn to_starlist<W: Write>(&self, writer: &mut W) -> Result<()> {
        for target in &self.targets {
            writer.write_all(target.to_starlist().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn to_starlist_string(&self) -> String {
        self.targets
            .iter()
            .map(|t| format!("{}\n", t.to_starlist()))
            .collect()
    }

    pub fn from_starlist<R: BufRead>(reader: R) -> Result<Self> {
        Ok(parse_starlist(reader)?.into_iter().map(Target::from).collect())
    }
}

impl From<Vec<Target>> for TargetList {
    fn from(targets: Vec<Target>) -> Self {
        Self { targets }
    }
}

impl FromIterator<Target> for TargetList {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TargetList {
    type Item = Target;
    type IntoIter = std::vec::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_STARLIST: &str = "\
# A small starlist
S2CM006571      05 04 37.230 -19 37 04.580 2000 rmag=14.73 b-r=2.38 b-v=0.57
PG_0026+129     00 29 13.700 +13 16 03.720 2000 lgs=1 skip=3
tt020           09 00 20.447 +39 04 03.660 2000 rmag=13.66
";

    fn small_list() -> TargetList {
        TargetList::from_starlist(SMALL_STARLIST.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_starlist() {
        let list = small_list();
        assert_eq!(list.len(), 3);
        assert_eq!(list.names(), vec!["S2CM006571", "PG_0026+129", "tt020"]);
    }

    #[test]
    fn test_lookup_by_name() {
        let list = small_list();
        assert_eq!(list.get_by_name("S2CM006571").unwrap().name, "S2CM006571");
        assert!(list.get_by_name("OTHERNAME").is_none());
    }

    #[test]
    fn test_sort_by_ra() {
        let mut list = small_list();
        list.sort_by_ra();
        assert_eq!(list.names(), vec!["PG_0026+129", "S2CM006571", "tt020"]);
    }

    #[test]
    fn test_starlist_roundtrip() {
        let list = small_list();
        let text = list.to_starlist_string();
        let reread = TargetList::from_starlist(text.as_bytes()).unwrap();
        assert_eq!(reread.names(), list.names());
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_writer_output_matches_string() {
        let list = small_list();
        let mut buffer = Vec::new();
        list.to_starlist(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), list.to_starlist_string());
    }

    #[test]
    fn test_display() {
        let mut target = Target::new("Galaxy", Equatorial::from_degrees(10.0, 12.0));
        target.keywords.insert("vmag", 15.0);
        assert_eq!(
            target.to_string(),
            "<Target 'Galaxy'@'00h40m00.00s +12d00m00.00s' vmag=15.00>"
        );
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let mut buffer = Vec::new();
        TargetList::new().to_starlist(&mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
