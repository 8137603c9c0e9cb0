use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying the recipe catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No recipe matches the requested slug
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// The catalog source could not be reached or refused the request
    #[error("Catalog source unavailable: {0}")]
    SourceUnavailable(String),

    /// Failed to fetch the catalog over HTTP
    #[error("Failed to fetch catalog: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to read a catalog file from disk
    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source returned data that does not decode into recipe records
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),

    /// The CSV upload was rejected locally or by the generation backend
    #[error("Ingest failed: {0}")]
    IngestError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl CatalogError {
    /// True when the catalog source failed to produce a collection.
    ///
    /// These errors must never be confused with an empty catalog.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::SourceUnavailable(_)
                | CatalogError::FetchError(_)
                | CatalogError::IoError { .. }
                | CatalogError::MalformedData(_)
        )
    }
}
