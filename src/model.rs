use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::formatting::Difficulty;

/// A recipe record as produced by the catalog source.
///
/// Every field is optional: the generation backend and hand-written JSON files
/// disagree on which fields they fill in, so gaps are resolved during
/// normalization instead of failing the whole load.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RawRecipe {
    pub title: Option<String>,
    pub brand_name: Option<String>,
    pub category: Option<String>,
    /// Minutes; numbers or numeric strings
    pub prep_time: Value,
    pub cook_time: Value,
    pub total_time: Value,
    #[serde(rename = "yield", alias = "yield_amount")]
    pub yield_amount: Option<String>,
    pub ingredients: Option<RawIngredients>,
    pub instructions: Option<String>,
    pub storage_instructions: Option<String>,
    pub recipe_variations: Option<String>,
    pub special_equipment: Option<String>,
    pub pro_tips: Option<String>,
    /// Either `{"text": ...}` or an object of nutrient fields
    pub nutritional_info: Option<Value>,
    pub faq: Option<Vec<FaqItem>>,
    pub serving_suggestions: Option<String>,
    pub cost_comparison: Option<String>,
    pub introduction: Option<String>,
    pub seo_meta_description: Option<String>,
    pub image_url: Option<String>,
}

/// Ingredient list as it appears on the wire
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawIngredients {
    Wrapped {
        #[serde(default)]
        items: Vec<String>,
    },
    List(Vec<String>),
}

impl RawIngredients {
    pub fn into_items(self) -> Vec<String> {
        match self {
            RawIngredients::Wrapped { items } => items,
            RawIngredients::List(items) => items,
        }
    }
}

/// A browsable recipe, normalized from a [`RawRecipe`].
///
/// Field names match the JSON the site's pages consume, which mixes
/// snake_case and camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Position in the loaded collection, starting at 1; not stable across reloads
    pub id: u32,
    pub title: String,
    pub brand_name: String,
    pub category: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    pub difficulty: Difficulty,
    pub slug: String,
    #[serde(rename = "yield")]
    pub yield_amount: String,
    pub ingredients: Ingredients,
    pub instructions: String,
    pub storage_instructions: String,
    pub recipe_variations: String,
    pub special_equipment: String,
    pub pro_tips: String,
    pub nutritional_info: NutritionalInfo,
    pub faq: Vec<FaqItem>,
    pub serving_suggestions: String,
    pub cost_comparison: String,
    pub introduction: String,
    pub seo_meta_description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ingredients {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionalInfo {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Brand facet: one entry per distinct `brand_name`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Category facet: one entry per distinct `category`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: usize,
    pub description: String,
}
