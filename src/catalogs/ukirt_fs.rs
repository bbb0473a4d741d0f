//! UKIRT Faint Standards (Leggett et al. 2006), served by VizieR
//!
//! A record is a primary standard when its SIMBAD name carries the `FS`
//! designation.

use log::debug;

use super::{Band, CatalogProvider, Magnitude, StarRecord};
use crate::coordinates::Equatorial;
use crate::data::{VizierClient, VizierRow, VizierTable, DEC_COLUMN, RA_COLUMN};
use crate::Result;
use crate::StarlistError;

/// VizieR catalog identifier
pub const VIZIER_UKIRT_FS_CATALOG: &str = "J/MNRAS/373/781";

/// ADS bibcode of the catalog paper
pub const VIZIER_ADS_REFERENCE: &str = "2006MNRAS.373..781L";

/// Prefix of the SIMBAD name marking primary standards
pub const PRIMARY_PREFIX: &str = "FS";

const SIMBAD_NAME: &str = "SimbadName";

/// Columns requested from VizieR
pub const COLUMNS: [&str; 11] = [
    SIMBAD_NAME,
    "Name",
    "SpType",
    "Jmag",
    "e_Jmag",
    "Hmag",
    "e_Hmag",
    "Kmag",
    "e_Kmag",
    "pmRA",
    "pmDE",
];

const BANDS: [Band; 3] = [Band::J, Band::H, Band::K];

/// The UKIRT Faint Standards catalog provider
#[derive(Debug, Clone, Default)]
pub struct UkirtFaintStandards {
    client: VizierClient,
}

impl UkirtFaintStandards {
    pub fn new(client: VizierClient) -> Self {
        Self { client }
    }

    /// Convert a fetched table into records, in table order
    pub fn records_from_table(table: &VizierTable) -> Result<Vec<StarRecord>> {
        table.require_columns(&[SIMBAD_NAME, RA_COLUMN, DEC_COLUMN])?;
        table.rows().map(|row| record_from_row(&row)).collect()
    }
}

pub fn is_primary_name(simbad_name: &str) -> bool {
    simbad_name.starts_with(PRIMARY_PREFIX)
}

fn required_f64(row: &VizierRow<'_>, column: &str, name: &str) -> Result<f64> {
    row.get_f64(column)?.ok_or_else(|| {
        StarlistError::ProviderError(format!("Star '{}' has no {} value", name, column))
    })
}

fn record_from_row(row: &VizierRow<'_>) -> Result<StarRecord> {
    let name = row
        .get(SIMBAD_NAME)
        .ok_or_else(|| StarlistError::ProviderError("Row without a SIMBAD name".to_string()))?;

    let ra = required_f64(row, RA_COLUMN, name)?;
    let dec = required_f64(row, DEC_COLUMN, name)?;
    if !(0.0..360.0).contains(&ra) || !(-90.0..=90.0).contains(&dec) {
        return Err(StarlistError::ProviderError(format!(
            "Star '{}' has out of range coordinates ({}, {})",
            name, ra, dec
        )));
    }

    let mut photometry = Vec::with_capacity(BANDS.len());
    for band in BANDS {
        let label = band.label();
        photometry.push(Magnitude {
            band,
            value: row.get_f64(&format!("{}mag", label))?,
            error: row.get_f64(&format!("e_{}mag", label))?,
        });
    }

    let record = StarRecord {
        name: name.to_string(),
        position: Equatorial::from_degrees(ra, dec),
        pm_ra: row.get_f64("pmRA")?,
        pm_dec: row.get_f64("pmDE")?,
        photometry,
        spectral_type: row.get("SpType").map(str::to_string),
        catalog_name: row.get("Name").map(str::to_string),
        primary: is_primary_name(name),
    };
    debug!(
        "Read {} at {} (primary: {})",
        record.name,
        record.position.to_hmsdms_string(),
        record.primary
    );
    Ok(record)
}

impl CatalogProvider for UkirtFaintStandards {
    fn description(&self) -> String {
        format!(
            "UKIRT Faint Standard Stars (VizieR '{}')",
            VIZIER_UKIRT_FS_CATALOG
        )
    }

    fn list_all(&self) -> Result<Vec<StarRecord>> {
        let table = self.client.query(VIZIER_UKIRT_FS_CATALOG, &COLUMNS)?;
        Self::records_from_table(&table)
    }
}
