//! Starlist generator: fetch, filter, format, write
//!
//! The catalog is fetched and fully rendered before the output sink is
//! opened, so a provider failure never creates or truncates the output file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use log::info;

use crate::catalogs::{retain_primary, CatalogProvider, VIZIER_ADS_REFERENCE, VIZIER_UKIRT_FS_CATALOG};
use crate::targets::TargetList;
use crate::Result;

/// Where the starlist goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    /// Created or overwritten
    File(PathBuf),
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputSink::File(path),
            None => OutputSink::Stdout,
        }
    }

    fn open(&self) -> Result<Box<dyn Write>> {
        Ok(match self {
            OutputSink::Stdout => Box::new(io::stdout().lock()),
            OutputSink::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        })
    }

    /// Write the full content and flush; the handle is dropped on return
    pub fn write_all(&self, content: &str) -> Result<()> {
        let mut writer = self.open()?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            OutputSink::Stdout => "standard output".to_string(),
            OutputSink::File(path) => path.display().to_string(),
        }
    }
}

/// Provenance comment block written ahead of the targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub catalog: String,
    pub reference: String,
    pub collected_on: NaiveDateTime,
}

impl Header {
    pub fn ukirt_fs(collected_on: NaiveDateTime) -> Self {
        Self {
            title: "UKIRT Faint Standard Stars".to_string(),
            catalog: VIZIER_UKIRT_FS_CATALOG.to_string(),
            reference: VIZIER_ADS_REFERENCE.to_string(),
            collected_on,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("# {}", self.title),
            format!("# Data from VIZIER catalog '{}'", self.catalog),
            format!("# ADS Reference: '{}'", self.reference),
            format!(
                "# Data collected on {}",
                self.collected_on.format("%Y-%m-%dT%H:%M:%S%.6f")
            ),
        ]
    }
}

/// Options of a generator run
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Keep only primary standards
    pub primary_only: bool,
    /// Order targets by right ascension instead of catalog order
    pub sort_by_ra: bool,
    pub header: Option<Header>,
}

/// Fetch the catalog once and turn the retained records into targets
pub fn build_target_list<P: CatalogProvider + ?Sized>(
    provider: &P,
    options: &GeneratorOptions,
) -> Result<TargetList> {
    let records = provider.list_all()?;
    let total = records.len();

    let records = if options.primary_only {
        retain_primary(records)
    } else {
        records
    };
    info!(
        "Retained {} of {} records from {}",
        records.len(),
        total,
        provider.description()
    );

    let mut targets: TargetList = records.iter().map(|r| r.to_target()).collect();
    if options.sort_by_ra {
        targets.sort_by_ra();
    }
    Ok(targets)
}

/// Header lines (if any) followed by one line per target, each `\n` terminated
pub fn render(targets: &TargetList, options: &GeneratorOptions) -> String {
    let mut content = String::new();
    if let Some(header) = &options.header {
        for line in header.lines() {
            content.push_str(&line);
            content.push('\n');
        }
    }
    content.push_str(&targets.to_starlist_string());
    content
}

/// Run the whole pipeline and return the number of targets written
pub fn generate<P: CatalogProvider + ?Sized>(
    provider: &P,
    options: &GeneratorOptions,
    sink: &OutputSink,
) -> Result<usize> {
    let targets = build_target_list(provider, options)?;
    let content = render(&targets, options);
    sink.write_all(&content)?;
    info!("Wrote {} targets to {}", targets.len(), sink.describe());
    Ok(targets.len())
}
