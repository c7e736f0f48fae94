//! services/api/src/catalog.rs
//!
//! The document catalog: the fixed list of newspaper PDFs exposed to
//! clients. Loaded once at startup from a JSON file so catalog changes
//! do not require a code change; entries are immutable at runtime and
//! the `filename` field is the join key to the physical PDF on disk.

use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Failed to parse catalog file {0}: {1}")]
    Parse(String, serde_json::Error),
}

/// One newspaper in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub id: u32,
    pub title: String,
    pub filename: String,
    /// Source language tag, e.g. "english", "arabic".
    pub language: String,
    /// Publication date as written in the catalog file.
    pub date: String,
    pub country: String,
}

/// Loads the catalog from a JSON array file.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Io(path.display().to_string(), e))?;
    serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(path.display().to_string(), e))
}
