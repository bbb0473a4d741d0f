//! ukirtfs: Keck starlists of the UKIRT Faint Standard stars
//!
//! This crate fetches the UKIRT Faint Standards from VizieR and writes them
//! as a Keck-format starlist. It also provides the starlist format itself:
//! formatting, parsing and linting of starlist lines.

use thiserror::Error;

pub mod catalogs;
pub mod coordinates;
pub mod data;
pub mod generator;
pub mod starlist;
pub mod targets;

// Re-export commonly used types
pub use catalogs::{CatalogProvider, StarRecord, StaticCatalog, UkirtFaintStandards};
pub use coordinates::Equatorial;
pub use generator::{generate, GeneratorOptions, Header, OutputSink};
pub use targets::{Target, TargetList};

/// Main error type for the ukirtfs library
#[derive(Debug, Error)]
pub enum StarlistError {
    #[error("Catalog provider error: {0}")]
    ProviderError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Starlist parse error: {0}")]
    ParseError(String),
}

/// Result type for ukirtfs operations
pub type Result<T> = std::result::Result<T, StarlistError>;
