//! Catalog backend for a copycat recipe site.
//!
//! Raw recipe records come from a [`sources::CatalogSource`] (a local
//! directory of JSON files or the recipe backend's HTTP API) and are reshaped
//! into browsable recipes, brand and category facets, search results and
//! autocomplete suggestions. The [`server`] module exposes all of it as JSON.

pub mod catalog;
pub mod config;
pub mod error;
pub mod facets;
pub mod formatting;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod search;
pub mod server;
pub mod sources;

pub use catalog::Catalog;
pub use config::SiteConfig;
pub use error::CatalogError;
pub use model::{Brand, Category, RawRecipe, Recipe};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::formatting::{slugify, Difficulty};
    use crate::model::{Ingredients, NutritionalInfo, Recipe};

    /// Minimal recipe for derivation tests
    pub fn recipe(id: u32, title: &str, brand: &str, category: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            brand_name: brand.to_string(),
            category: category.to_string(),
            image_url: "/images/default-recipe.png".to_string(),
            prep_time: "10 min".to_string(),
            cook_time: "10 min".to_string(),
            total_time: "20 min".to_string(),
            difficulty: Difficulty::Easy,
            slug: slugify(title),
            yield_amount: "4 servings".to_string(),
            ingredients: Ingredients::default(),
            instructions: String::new(),
            storage_instructions: String::new(),
            recipe_variations: String::new(),
            special_equipment: String::new(),
            pro_tips: String::new(),
            nutritional_info: NutritionalInfo::default(),
            faq: Vec::new(),
            serving_suggestions: String::new(),
            cost_comparison: String::new(),
            introduction: String::new(),
            seo_meta_description: String::new(),
        }
    }
}
