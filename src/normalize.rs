//! Reshape raw source records into the [`Recipe`] view model.

use serde_json::Value;

use crate::formatting::{format_minutes, parse_minutes, slugify_or, Difficulty};
use crate::model::{Ingredients, NutritionalInfo, RawRecipe, Recipe};

/// Category given to recipes whose source record has none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Yield shown when the source record has none
pub const DEFAULT_YIELD: &str = "4 servings";

/// Normalize a freshly loaded collection.
///
/// Ids are assigned from load order, so they only identify a recipe within
/// this one collection.
pub fn normalize(raw: Vec<RawRecipe>, default_image: &str) -> Vec<Recipe> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| normalize_one(record, index, default_image))
        .collect()
}

fn normalize_one(raw: RawRecipe, index: usize, default_image: &str) -> Recipe {
    let id = u32::try_from(index + 1).unwrap_or(u32::MAX);

    let prep = parse_minutes(&raw.prep_time);
    let cook = parse_minutes(&raw.cook_time);
    let total = prep.saturating_add(cook);

    let title = raw.title.unwrap_or_default();
    let slug = slugify_or(&title, format!("recipe-{}", id));

    Recipe {
        id,
        slug,
        title,
        brand_name: raw.brand_name.unwrap_or_default(),
        category: non_empty_or(raw.category, UNCATEGORIZED),
        image_url: non_empty_or(raw.image_url, default_image),
        prep_time: format_minutes(i64::from(prep)),
        cook_time: format_minutes(i64::from(cook)),
        total_time: format_minutes(i64::from(total)),
        difficulty: Difficulty::from_total(total),
        yield_amount: non_empty_or(raw.yield_amount, DEFAULT_YIELD),
        ingredients: Ingredients {
            items: raw
                .ingredients
                .map(|ingredients| ingredients.into_items())
                .unwrap_or_default(),
        },
        instructions: raw.instructions.unwrap_or_default(),
        storage_instructions: raw.storage_instructions.unwrap_or_default(),
        recipe_variations: raw.recipe_variations.unwrap_or_default(),
        special_equipment: raw.special_equipment.unwrap_or_default(),
        pro_tips: raw.pro_tips.unwrap_or_default(),
        nutritional_info: NutritionalInfo {
            text: raw
                .nutritional_info
                .as_ref()
                .map(nutrition_text)
                .unwrap_or_default(),
        },
        faq: raw.faq.unwrap_or_default(),
        serving_suggestions: raw.serving_suggestions.unwrap_or_default(),
        cost_comparison: raw.cost_comparison.unwrap_or_default(),
        introduction: raw.introduction.unwrap_or_default(),
        seo_meta_description: raw.seo_meta_description.unwrap_or_default(),
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Render nutrition data as a single display line.
///
/// `{"text": "..."}` is used verbatim; a nutrient object such as
/// `{"calories": 120, "protein": "2g"}` becomes `"Calories: 120, Protein: 2g"`,
/// keeping the key order of the source record.
fn nutrition_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return text.clone();
            }

            map.iter()
                .filter_map(|(key, value)| {
                    let rendered = match value {
                        Value::Null => return None,
                        Value::String(s) if s.trim().is_empty() => return None,
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Some(format!("{}: {}", label(key), rendered))
                })
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => String::new(),
    }
}

/// `"saturated_fat"` → `"Saturated fat"`
fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let recipes = normalize(
            vec![raw(json!({
                "title": "Homemade Pringles Original Copycat Recipe",
                "brand_name": "Pringles",
                "category": "Chips",
                "prep_time": 20,
                "cook_time": 25,
                "total_time": 999,
                "yield": "6 servings",
                "ingredients": {"items": ["2 potatoes", "1 tsp salt"]},
                "instructions": "Slice.\nBake.",
                "faq": [{"question": "Vegan?", "answer": "Yes."}],
                "image_url": "https://cdn.example.com/pringles.png"
            }))],
            "/images/default-recipe.png",
        );

        let recipe = &recipes[0];
        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.slug, "homemade-pringles-original-copycat-recipe");
        assert_eq!(recipe.prep_time, "20 min");
        assert_eq!(recipe.cook_time, "25 min");
        // total is always prep + cook, never the source's total_time
        assert_eq!(recipe.total_time, "45 min");
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.yield_amount, "6 servings");
        assert_eq!(recipe.ingredients.items.len(), 2);
        assert_eq!(recipe.faq[0].answer, "Yes.");
        assert_eq!(recipe.image_url, "https://cdn.example.com/pringles.png");
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let recipes = normalize(vec![raw(json!({"title": "Mystery Snack"}))], "/img/none.png");

        let recipe = &recipes[0];
        assert_eq!(recipe.brand_name, "");
        assert_eq!(recipe.category, UNCATEGORIZED);
        assert_eq!(recipe.yield_amount, DEFAULT_YIELD);
        assert_eq!(recipe.image_url, "/img/none.png");
        assert_eq!(recipe.prep_time, "0 min");
        assert_eq!(recipe.total_time, "0 min");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert!(recipe.ingredients.items.is_empty());
        assert!(recipe.faq.is_empty());
        assert_eq!(recipe.nutritional_info.text, "");
    }

    #[test]
    fn test_ids_follow_load_order() {
        let recipes = normalize(
            vec![
                raw(json!({"title": "A"})),
                raw(json!({"title": "B"})),
                raw(json!({"title": "C"})),
            ],
            "/img.png",
        );
        let ids: Vec<u32> = recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_title_gets_fallback_slug() {
        let recipes = normalize(
            vec![raw(json!({"title": "Real Title"})), raw(json!({"title": "???"}))],
            "/img.png",
        );
        assert_eq!(recipes[0].slug, "real-title");
        assert_eq!(recipes[1].slug, "recipe-2");
    }

    #[test]
    fn test_blank_image_url_uses_default() {
        let recipes = normalize(vec![raw(json!({"image_url": "  "}))], "/images/knockoff.png");
        assert_eq!(recipes[0].image_url, "/images/knockoff.png");
    }

    #[test]
    fn test_nutrition_text_is_passed_through() {
        let recipes = normalize(
            vec![raw(json!({"nutritional_info": {"text": "About 140 kcal per serving"}}))],
            "/img.png",
        );
        assert_eq!(recipes[0].nutritional_info.text, "About 140 kcal per serving");
    }

    #[test]
    fn test_nutrition_object_is_rendered() {
        let recipes = normalize(
            vec![raw(json!({"nutritional_info": {
                "calories": 150,
                "protein": "2g",
                "fiber": null,
                "saturated_fat": "1g"
            }}))],
            "/img.png",
        );
        assert_eq!(
            recipes[0].nutritional_info.text,
            "Calories: 150, Protein: 2g, Saturated fat: 1g"
        );
    }

    #[test]
    fn test_nutrition_keeps_source_key_order() {
        let record: RawRecipe = serde_json::from_str(
            r#"{"nutritional_info": {"calories": 120, "protein": "2g", "carbs": "15g", "fat": "8g", "sugar": "1g", "fiber": "1g", "sodium": "180mg"}}"#,
        )
        .unwrap();

        let recipes = normalize(vec![record], "/img.png");
        assert_eq!(
            recipes[0].nutritional_info.text,
            "Calories: 120, Protein: 2g, Carbs: 15g, Fat: 8g, Sugar: 1g, Fiber: 1g, Sodium: 180mg"
        );
    }

    #[test]
    fn test_string_times_and_long_durations() {
        let recipes = normalize(
            vec![raw(json!({"prep_time": "30", "cook_time": 60}))],
            "/img.png",
        );
        assert_eq!(recipes[0].prep_time, "30 min");
        assert_eq!(recipes[0].cook_time, "1 hr");
        assert_eq!(recipes[0].total_time, "1 hr 30 min");
        assert_eq!(recipes[0].difficulty, Difficulty::Hard);
    }
}
