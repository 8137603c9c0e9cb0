use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::CatalogError;
use crate::model::RawRecipe;
use crate::sources::CatalogSource;

/// The backend answers either `{"recipes": [...]}` or a bare list.
///
/// Any other body, including an object without `recipes`, is malformed.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipesResponse {
    Wrapped { recipes: Vec<RawRecipe> },
    List(Vec<RawRecipe>),
}

impl RecipesResponse {
    fn into_recipes(self) -> Vec<RawRecipe> {
        match self {
            RecipesResponse::Wrapped { recipes } => recipes,
            RecipesResponse::List(recipes) => recipes,
        }
    }
}

/// Fetches `{base_url}/recipes` from the recipe backend.
pub struct RemoteSource {
    client: Client,
    base_url: String,
}

impl RemoteSource {
    /// Create a remote source; `timeout` bounds every fetch
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("knockoff-recipes/1.0")
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn recipes_url(&self) -> String {
        format!("{}/recipes", self.base_url)
    }
}

#[async_trait]
impl CatalogSource for RemoteSource {
    fn source_name(&self) -> &str {
        "remote"
    }

    async fn load_all(&self) -> Result<Vec<RawRecipe>, CatalogError> {
        let url = self.recipes_url();
        debug!("Fetching recipes from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Recipe backend request to {} failed: {}", url, e);
            CatalogError::FetchError(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Recipe backend returned {} for {}", status, url);
            return Err(CatalogError::SourceUnavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        let body = response.bytes().await?;
        let parsed: RecipesResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Recipe backend sent undecodable data: {}", e);
            CatalogError::MalformedData(e.to_string())
        })?;

        let recipes = parsed.into_recipes();
        debug!("Fetched {} recipes from {}", recipes.len(), url);
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn source(url: &str) -> RemoteSource {
        RemoteSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_wrapped_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"recipes": [{"title": "Homemade Oreos", "brand_name": "Oreo"}]}"#)
            .create_async()
            .await;

        let recipes = source(&server.url()).load_all().await.unwrap();
        mock.assert_async().await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].brand_name.as_deref(), Some("Oreo"));
    }

    #[tokio::test]
    async fn test_bare_list_response_and_trailing_slash() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_body(r#"[{"title": "A"}, {"title": "B"}]"#)
            .create_async()
            .await;

        let recipes = source(&format!("{}/", server.url())).load_all().await.unwrap();
        assert_eq!(recipes.len(), 2);
    }

    #[tokio::test]
    async fn test_object_without_recipes_key_is_malformed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "database connection lost"}"#)
            .create_async()
            .await;

        let err = source(&server.url()).load_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedData(_)));
        assert!(err.is_source_failure());
    }

    #[tokio::test]
    async fn test_empty_list_is_empty_catalog() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_body(r#"{"recipes": []}"#)
            .create_async()
            .await;

        assert!(source(&server.url()).load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes")
            .with_status(503)
            .create_async()
            .await;

        let err = source(&server.url()).load_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable(_)));
        assert!(err.is_source_failure());
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = source(&server.url()).load_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedData(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_fetch_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let err = source("http://127.0.0.1:9").load_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::FetchError(_)));
    }
}
