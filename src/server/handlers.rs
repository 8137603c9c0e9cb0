use axum::{
    extract::{rejection::QueryRejection, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::types::*;
use crate::catalog::Catalog;
use crate::config::{SiteConfig, SourceConfig};
use crate::error::CatalogError;
use crate::facets::{sort_recipes, SortOrder};
use crate::ingest::{validate_csv, IngestClient, IngestRequest};
use crate::model::Recipe;
use crate::sources::SourceFactory;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    /// `None` when no generation backend is configured
    pub ingest: Option<Arc<IngestClient>>,
    /// Where the catalog comes from, for the env-check endpoint
    pub source_location: String,
    /// `use_ai` value for uploads that do not send one
    pub default_use_ai: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, ingest: Option<IngestClient>) -> Self {
        Self {
            catalog,
            ingest: ingest.map(Arc::new),
            source_location: String::new(),
            default_use_ai: true,
        }
    }

    /// Wire the catalog source and ingest client from configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self, CatalogError> {
        let source = SourceFactory::from_config(config)?;
        let catalog = Catalog::new(source, config.default_image.clone());

        let ingest = config
            .ingest
            .backend_url
            .as_deref()
            .map(|url| IngestClient::new(url, config.request_timeout()))
            .transpose()?;

        let source_location = match &config.source {
            SourceConfig::Remote { base_url } => base_url.clone(),
            SourceConfig::Local { directory } => directory.display().to_string(),
        };

        Ok(Self {
            source_location,
            default_use_ai: config.ingest.use_ai,
            ..Self::new(catalog, ingest)
        })
    }
}

/// Handler failure, rendered as `{"error": ...}` with a matching status
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    BadRequest(String),
    /// A brand or category slug with no match
    FacetNotFound(&'static str),
    IngestNotConfigured,
    IngestRefused(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Catalog(CatalogError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Recipe not found".to_string())
            }
            ApiError::Catalog(err) if err.is_source_failure() => {
                error!("Catalog source failure: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Recipe catalog unavailable".to_string(),
                )
            }
            ApiError::Catalog(err) => {
                error!("API error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::FacetNotFound(kind) => (StatusCode::NOT_FOUND, format!("{} not found", kind)),
            ApiError::IngestNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CSV ingest is not configured".to_string(),
            ),
            ApiError::IngestRefused(message) => (StatusCode::BAD_GATEWAY, message),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Recipe catalog endpoint
///
/// GET /api/recipes
///
/// Parameters are checked in a fixed order: `action=count`,
/// `action=search&query`, `action=suggestions&query`, `action=brand&slug`,
/// `action=category&slug`, `slug`, `brand`, `action=brands`,
/// `action=categories`, `category`; with none of them the full list is
/// returned. `sort` reorders list responses and is ignored everywhere else.
pub async fn recipes(
    State(state): State<AppState>,
    params: Result<Query<RecipesQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    debug!("Recipes request: {:?}", params);
    let catalog = &state.catalog;

    let action = params.action.as_deref().unwrap_or_default();
    let query = non_empty(&params.query);
    let slug = non_empty(&params.slug);

    let response = match (action, query, slug) {
        ("count", _, _) => Json(CountResponse {
            count: catalog.count().await?,
        })
        .into_response(),
        ("search", Some(query), _) => Json(catalog.search(query).await?).into_response(),
        ("suggestions", Some(query), _) => {
            Json(catalog.suggestions(query).await?).into_response()
        }
        ("brand", _, Some(slug)) => {
            let brand = catalog.brand_by_slug(slug).await?;
            Json(brand.ok_or(ApiError::FacetNotFound("Brand"))?).into_response()
        }
        ("category", _, Some(slug)) => {
            let category = catalog.category_by_slug(slug).await?;
            Json(category.ok_or(ApiError::FacetNotFound("Category"))?).into_response()
        }
        (_, _, Some(slug)) => Json(catalog.recipe_by_slug(slug).await?).into_response(),
        _ => {
            if let Some(brand) = non_empty(&params.brand) {
                listing(catalog.recipes_by_brand(brand).await?, sort_order(&params)?)
            } else if action == "brands" {
                Json(catalog.brands().await?).into_response()
            } else if action == "categories" {
                Json(catalog.categories().await?).into_response()
            } else if let Some(category) = non_empty(&params.category) {
                listing(
                    catalog.recipes_in_category(category).await?,
                    sort_order(&params)?,
                )
            } else {
                match sort_order(&params)? {
                    Some(order) => Json(catalog.recipes_sorted(order).await?).into_response(),
                    None => Json(catalog.recipes().await?).into_response(),
                }
            }
        }
    };

    Ok(response)
}

/// `sort` is only validated for the listings that use it
fn sort_order(params: &RecipesQuery) -> Result<Option<SortOrder>, ApiError> {
    non_empty(&params.sort)
        .map(|s| s.parse::<SortOrder>())
        .transpose()
        .map_err(ApiError::BadRequest)
}

fn listing(mut recipes: Vec<Recipe>, sort: Option<SortOrder>) -> Response {
    if let Some(order) = sort {
        debug!("Sorting {} recipes by {}", recipes.len(), order.as_str());
        sort_recipes(&mut recipes, order);
    }
    Json(recipes).into_response()
}

/// Configuration summary without secrets
///
/// GET /api/env-check
pub async fn env_check(State(state): State<AppState>) -> Json<EnvCheckResponse> {
    Json(EnvCheckResponse {
        source: state.catalog.source_name().to_string(),
        source_location: state.source_location.clone(),
        backend_url: state.ingest.as_ref().map(|client| client.backend_url().to_string()),
        message: "Configuration retrieved successfully".to_string(),
    })
}

fn parse_flag(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        other => Err(ApiError::BadRequest(format!("Invalid use_ai value: {}", other))),
    }
}

/// Forward an admin CSV upload to the generation backend
///
/// POST /api/admin/upload-csv (multipart: `file`, `use_ai`, `limit`)
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let client = state.ingest.clone().ok_or(ApiError::IngestNotConfigured)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut use_ai = state.default_use_ai;
    let mut limit = 0u32;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            }
            "use_ai" | "limit" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                if name == "use_ai" {
                    use_ai = parse_flag(&text)?;
                } else {
                    limit = text.trim().parse().map_err(|_| {
                        ApiError::BadRequest(format!("Invalid limit value: {}", text))
                    })?;
                }
            }
            other => debug!("Ignoring upload field '{}'", other),
        }
    }

    let (file_name, csv) =
        file.ok_or_else(|| ApiError::BadRequest("No CSV file provided".to_string()))?;

    match validate_csv(&csv) {
        Err(CatalogError::IngestError(message)) => return Err(ApiError::BadRequest(message)),
        Err(other) => return Err(other.into()),
        Ok(_) => {}
    }

    let request = IngestRequest {
        file_name,
        csv,
        use_ai,
        limit,
    };

    match client.submit(request).await {
        Ok(ack) => {
            // generated recipes land in the source later; drop any cached copy
            state.catalog.invalidate().await;
            info!("CSV upload forwarded: {} rows", ack.rows);
            Ok(Json(UploadResponse {
                message: ack.message,
                success: ack.accepted,
                rows: ack.rows,
            }))
        }
        Err(e) => {
            warn!("CSV upload failed: {}", e);
            Err(ApiError::IngestRefused(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
