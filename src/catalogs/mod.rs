//! Star catalogs module
//!
//! This module defines the star records consumed by the starlist generator
//! and the provider seam through which catalogs deliver them.

pub mod ukirt_fs;

pub use ukirt_fs::{UkirtFaintStandards, VIZIER_ADS_REFERENCE, VIZIER_UKIRT_FS_CATALOG};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::coordinates::Equatorial;
use crate::starlist::{KeywordValue, Keywords};
use crate::targets::Target;
use crate::Result;

/// Decimals used for proper motion keywords
const PROPER_MOTION_DECIMALS: u8 = 4;

/// Photometric band of a catalog magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    J,
    H,
    K,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::J => "J",
            Band::H => "H",
            Band::K => "K",
        }
    }
}

/// A magnitude and its uncertainty in one band; either may be masked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    pub band: Band,
    pub value: Option<f64>,
    pub error: Option<f64>,
}

/// One star as delivered by a catalog provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Identifier, used as the starlist target name
    pub name: String,
    /// J2000 position
    pub position: Equatorial,
    /// Proper motion in RA, mas/yr (includes the cos(dec) factor)
    pub pm_ra: Option<f64>,
    /// Proper motion in declination, mas/yr
    pub pm_dec: Option<f64>,
    pub photometry: Vec<Magnitude>,
    pub spectral_type: Option<String>,
    /// Catalog-local designation, when it differs from `name`
    pub catalog_name: Option<String>,
    /// Whether this is a primary standard
    pub primary: bool,
}

impl StarRecord {
    pub fn new(name: impl Into<String>, ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            name: name.into(),
            position: Equatorial::from_degrees(ra_deg, dec_deg),
            pm_ra: None,
            pm_dec: None,
            photometry: Vec::new(),
            spectral_type: None,
            catalog_name: None,
            primary: false,
        }
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Proper motion in RA in seconds of time per year, as starlists expect
    ///
    /// Undefined at the celestial poles, where the value is dropped.
    pub fn pm_ra_seconds_per_year(&self) -> Option<f64> {
        let pm = self.pm_ra?;
        let cos_dec = self.position.dec.cos();
        if cos_dec.abs() < 1e-9 {
            warn!(
                "Dropping pmra={} mas/yr for {}: undefined at the pole",
                pm, self.name
            );
            return None;
        }
        Some(pm / 1000.0 / 15.0 / cos_dec)
    }

    /// Proper motion in declination in arcseconds per year
    pub fn pm_dec_arcsec_per_year(&self) -> Option<f64> {
        self.pm_dec.map(|pm| pm / 1000.0)
    }

    /// Starlist keywords: magnitudes and errors per band, proper motion,
    /// then spectral type and catalog name. Masked values are omitted.
    pub fn keywords(&self) -> Keywords {
        let mut keywords = Keywords::new();
        for magnitude in &self.photometry {
            let band = magnitude.band.label();
            if let Some(value) = magnitude.value {
                keywords.insert(format!("{}mag", band), value);
            }
            if let Some(error) = magnitude.error {
                keywords.insert(format!("e_{}mag", band), error);
            }
        }
        if let Some(pmra) = self.pm_ra_seconds_per_year() {
            keywords.insert(
                "pmra",
                KeywordValue::with_decimals(pmra, PROPER_MOTION_DECIMALS),
            );
        }
        if let Some(pmdec) = self.pm_dec_arcsec_per_year() {
            keywords.insert(
                "pmdec",
                KeywordValue::with_decimals(pmdec, PROPER_MOTION_DECIMALS),
            );
        }
        if let Some(sp_type) = &self.spectral_type {
            keywords.insert("SpType", sp_type.as_str());
        }
        if let Some(catalog_name) = &self.catalog_name {
            keywords.insert("Name", catalog_name.as_str());
        }
        keywords
    }

    pub fn to_target(&self) -> Target {
        Target::with_keywords(self.name.clone(), self.position, self.keywords())
    }
}

/// A source of star records with a single "list all records" operation
pub trait CatalogProvider {
    /// Human readable description, used in logs and headers
    fn description(&self) -> String;

    /// Every record of the catalog, in catalog order
    fn list_all(&self) -> Result<Vec<StarRecord>>;
}

/// An in-memory catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    description: String,
    records: Vec<StarRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<StarRecord>, description: &str) -> Self {
        Self {
            description: description.to_string(),
            records,
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn list_all(&self) -> Result<Vec<StarRecord>> {
        Ok(self.records.clone())
    }
}

/// Keep only primary records, preserving order
pub fn retain_primary(records: Vec<StarRecord>) -> Vec<StarRecord> {
    records.into_iter().filter(|r| r.primary).collect()
}
