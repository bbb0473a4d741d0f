//! VizieR ASU-TSV client
//!
//! Queries a VizieR catalog once and parses the tab-separated response into
//! a [`VizierTable`]. Only the first table of a response is used.

use std::time::Duration;

use log::{debug, info};

use crate::Result;
use crate::StarlistError;

/// Default VizieR ASU-TSV endpoint
pub const DEFAULT_VIZIER_URL: &str = "https://vizier.cds.unistra.fr/viz-bin/asu-tsv";

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the computed J2000 right ascension column (decimal degrees)
pub const RA_COLUMN: &str = "_RAJ2000";
/// Name of the computed J2000 declination column (decimal degrees)
pub const DEC_COLUMN: &str = "_DEJ2000";

/// Blocking VizieR client
#[derive(Debug, Clone)]
pub struct VizierClient {
    base_url: String,
    timeout: Duration,
}

impl VizierClient {
    /// Create a client for the public VizieR service
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_VIZIER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different ASU-TSV endpoint (mirror or test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters for a catalog source and its output columns.
    /// J2000 positions in decimal degrees are always requested.
    pub fn query_params(source: &str, columns: &[&str]) -> Vec<(&'static str, String)> {
        vec![
            ("-source", source.to_string()),
            ("-out", columns.join(",")),
            ("-out.add", "_RAJ,_DEJ".to_string()),
            ("-oc.form", "dec".to_string()),
            ("-out.max", "unlimited".to_string()),
        ]
    }

    /// Fetch every row of `source`, no paging and no retry
    pub fn query(&self, source: &str, columns: &[&str]) -> Result<VizierTable> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                StarlistError::ProviderError(format!("Failed to create HTTP client: {}", e))
            })?;

        let params = Self::query_params(source, columns);
        debug!("Querying VizieR {} with {:?}", self.base_url, params);

        let response = client
            .get(&self.base_url)
            .query(&params)
            .send()
            .map_err(|e| StarlistError::ProviderError(format!("Failed to query VizieR: {}", e)))?;

        if !response.status().is_success() {
            return Err(StarlistError::ProviderError(format!(
                "VizieR query for '{}' failed, status: {}",
                source,
                response.status()
            )));
        }

        let body = response.text().map_err(|e| {
            StarlistError::ProviderError(format!("Failed to read VizieR response: {}", e))
        })?;

        let table = VizierTable::parse_tsv(&body)?;
        info!(
            "Fetched {} rows from VizieR catalog '{}'",
            table.len(),
            source
        );
        Ok(table)
    }
}

impl Default for VizierClient {
    fn default() -> Self {
        Self::new()
    }
}

/// First table of an ASU-TSV response, cells kept as trimmed text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VizierTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn is_separator_line(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| c == '-' || c == '\t' || c == ' ')
}

impl VizierTable {
    /// Parse ASU-TSV text.
    ///
    /// Layout: `#` comments and blank lines, a column-name header, a units
    /// line, a dashes separator, then data rows until a blank line, a `#`
    /// line or end of input.
    pub fn parse_tsv(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.starts_with('#') || l.trim().is_empty());

        let header = lines.next().ok_or_else(|| {
            StarlistError::ProviderError("VizieR response contains no table".to_string())
        })?;
        let columns: Vec<String> = header.split('\t').map(|c| c.trim().to_string()).collect();

        let mut found_separator = false;
        for line in lines.by_ref() {
            if is_separator_line(line) {
                found_separator = true;
                break;
            }
        }
        if !found_separator {
            return Err(StarlistError::ProviderError(
                "Malformed VizieR response: missing header separator".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() || line.starts_with('#') {
                break;
            }
            let mut cells: Vec<String> = line.split('\t').map(|c| c.trim().to_string()).collect();
            if cells.len() > columns.len() {
                return Err(StarlistError::ProviderError(format!(
                    "Malformed VizieR row with {} cells, expected {}: '{}'",
                    cells.len(),
                    columns.len(),
                    line
                )));
            }
            // Trailing empty cells may be dropped by the server
            cells.resize(columns.len(), String::new());
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Fail unless every named column is present
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StarlistError::ProviderError(format!(
                "VizieR table is missing columns: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = VizierRow<'_>> {
        self.rows.iter().map(move |cells| VizierRow {
            table: self,
            cells,
        })
    }
}

/// A borrowed view of one row
#[derive(Debug, Clone, Copy)]
pub struct VizierRow<'a> {
    table: &'a VizierTable,
    cells: &'a [String],
}

impl<'a> VizierRow<'a> {
    /// Text of a cell; empty (masked) cells and unknown columns are `None`
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let cells: &'a [String] = self.cells;
        self.table
            .column_index(column)
            .map(|i| cells[i].as_str())
            .filter(|cell| !cell.is_empty())
    }

    /// Numeric cell; masked cells are `None`, unparsable ones are an error
    pub fn get_f64(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column) {
            None => Ok(None),
            Some(cell) => cell.parse::<f64>().map(Some).map_err(|_| {
                StarlistError::ProviderError(format!(
                    "Invalid numeric value '{}' in column {}",
                    cell, column
                ))
            }),
        }
    }
}
