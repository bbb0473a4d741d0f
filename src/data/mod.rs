//! Data module for querying remote astronomical catalogs
//!
//! This module provides the VizieR client used to fetch catalog tables.

mod vizier;

pub use vizier::{
    VizierClient, VizierRow, VizierTable, DEC_COLUMN, DEFAULT_TIMEOUT, DEFAULT_VIZIER_URL,
    RA_COLUMN,
};
