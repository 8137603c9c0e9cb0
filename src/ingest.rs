//! Relay admin CSV uploads to the recipe generation backend.
//!
//! A submission is one multipart POST with no retries and no alternate
//! endpoints. The backend acknowledges with `{"message": ...}` and generates
//! recipes in the background; anything else counts as a refusal.

use csv::ReaderBuilder;
use log::{info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CatalogError;

/// The backend reads the first three columns as Product, Brand and Category
pub const MIN_CSV_COLUMNS: usize = 3;

/// A CSV upload waiting to be forwarded
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub file_name: String,
    pub csv: Vec<u8>,
    /// Let the backend call its language model for recipe text
    pub use_ai: bool,
    /// Process at most this many rows; 0 means all
    pub limit: u32,
}

/// Backend acknowledgment of an accepted job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestAck {
    pub accepted: bool,
    pub message: String,
    /// Data rows the backend will process
    pub rows: usize,
}

#[derive(Deserialize)]
struct BackendAck {
    message: String,
}

/// Check an upload before it leaves the site.
///
/// Returns the number of data records after the header. Quoted fields may
/// contain commas and line breaks; records whose fields are all blank are
/// not counted.
pub fn validate_csv(csv: &[u8]) -> Result<usize, CatalogError> {
    let text = std::str::from_utf8(csv)
        .map_err(|e| CatalogError::IngestError(format!("CSV is not valid UTF-8: {}", e)))?;
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(CatalogError::IngestError("CSV file is empty".to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = reader.headers().map_err(malformed)?.len();
    if columns < MIN_CSV_COLUMNS {
        return Err(CatalogError::IngestError(format!(
            "CSV needs at least {} columns (product, brand, category), found {}",
            MIN_CSV_COLUMNS, columns
        )));
    }

    let mut rows = 0;
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        if record.iter().any(|field| !field.trim().is_empty()) {
            rows += 1;
        }
    }
    if rows == 0 {
        return Err(CatalogError::IngestError(
            "CSV has a header but no rows".to_string(),
        ));
    }
    Ok(rows)
}

fn malformed(err: csv::Error) -> CatalogError {
    CatalogError::IngestError(format!("CSV is malformed: {}", err))
}

/// Client for the generation backend's upload endpoint
pub struct IngestClient {
    client: Client,
    backend_url: String,
}

impl IngestClient {
    pub fn new(backend_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, backend_url))
    }

    pub fn with_client(client: Client, backend_url: impl Into<String>) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            backend_url,
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/admin/upload-csv/", self.backend_url)
    }

    /// Validate and forward one upload
    pub async fn submit(&self, request: IngestRequest) -> Result<IngestAck, CatalogError> {
        let rows = validate_csv(&request.csv)?;
        let rows = match request.limit {
            0 => rows,
            limit => rows.min(limit as usize),
        };

        let file = Part::bytes(request.csv)
            .file_name(request.file_name.clone())
            .mime_str("text/csv")?;
        let form = Form::new()
            .part("file", file)
            .text("use_ai", request.use_ai.to_string())
            .text("limit", request.limit.to_string());

        let url = self.upload_url();
        info!(
            "Submitting {} ({} rows, use_ai={}) to {}",
            request.file_name, rows, request.use_ai, url
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation backend refused upload: {} {}", status, body);
            return Err(CatalogError::IngestError(format!(
                "generation backend returned {}",
                status
            )));
        }

        let ack: BackendAck = response.json().await.map_err(|e| {
            CatalogError::IngestError(format!("generation backend sent no acknowledgment: {}", e))
        })?;

        info!("Upload accepted: {}", ack.message);
        Ok(IngestAck {
            accepted: true,
            message: ack.message,
            rows,
        })
    }
}
