//! The catalog service: one source plus the derivations over it.

use log::{debug, error};
use std::sync::Arc;

use crate::error::CatalogError;
use crate::facets::{self, SortOrder};
use crate::model::{Brand, Category, Recipe};
use crate::normalize::normalize;
use crate::search;
use crate::sources::CatalogSource;

/// Recipe catalog backed by a [`CatalogSource`].
///
/// Every query reloads the collection from the source (or its cache) and
/// recomputes facets from scratch. `Ok` with an empty list means the source
/// has no recipes; a source that cannot answer yields `Err`.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
    default_image: String,
}

impl Catalog {
    pub fn new(source: Arc<dyn CatalogSource>, default_image: impl Into<String>) -> Self {
        Self {
            source,
            default_image: default_image.into(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// All recipes, in source order
    pub async fn recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        let raw = self.source.load_all().await.map_err(|e| {
            error!("Catalog source '{}' failed: {}", self.source_name(), e);
            e
        })?;
        let recipes = normalize(raw, &self.default_image);
        debug!(
            "Loaded {} recipes from {} source",
            recipes.len(),
            self.source_name()
        );
        Ok(recipes)
    }

    pub async fn recipes_sorted(&self, order: SortOrder) -> Result<Vec<Recipe>, CatalogError> {
        let mut recipes = self.recipes().await?;
        facets::sort_recipes(&mut recipes, order);
        Ok(recipes)
    }

    pub async fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.recipes().await?.len())
    }

    /// First recipe with `slug`, or [`CatalogError::NotFound`]
    pub async fn recipe_by_slug(&self, slug: &str) -> Result<Recipe, CatalogError> {
        let recipes = self.recipes().await?;
        facets::find_by_slug(&recipes, slug)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    pub async fn recipes_by_brand(&self, brand: &str) -> Result<Vec<Recipe>, CatalogError> {
        Ok(facets::recipes_by_brand(&self.recipes().await?, brand))
    }

    pub async fn recipes_in_category(&self, category: &str) -> Result<Vec<Recipe>, CatalogError> {
        Ok(facets::recipes_in_category(&self.recipes().await?, category))
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, CatalogError> {
        Ok(facets::brands_of(&self.recipes().await?))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(facets::categories_of(&self.recipes().await?))
    }

    pub async fn brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, CatalogError> {
        Ok(facets::brand_by_slug(&self.recipes().await?, slug))
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogError> {
        Ok(facets::category_by_slug(&self.recipes().await?, slug))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, CatalogError> {
        Ok(search::search(&self.recipes().await?, query))
    }

    /// Autocomplete candidates; short queries return before touching the source
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, CatalogError> {
        if !search::accepts_suggestion_query(query) {
            return Ok(Vec::new());
        }
        Ok(search::suggestions(&self.recipes().await?, query))
    }

    /// Forget cached loads, e.g. after new recipes were generated
    pub async fn invalidate(&self) {
        self.source.invalidate().await;
    }
}
