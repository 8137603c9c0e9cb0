//! JSON request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /api/recipes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipesQuery {
    pub action: Option<String>,
    pub query: Option<String>,
    pub slug: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Reply to an accepted CSV upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub message: String,
    pub success: bool,
    pub rows: usize,
}

/// Non-secret view of how the server is wired
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvCheckResponse {
    pub source: String,
    pub source_location: String,
    pub backend_url: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}
