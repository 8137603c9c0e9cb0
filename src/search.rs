//! Substring search and autocomplete suggestions over the recipe collection.

use std::collections::HashSet;

use crate::facets::{brands_of, categories_of};
use crate::model::Recipe;

/// Queries shorter than this (after trimming) get no suggestions
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Upper bound on the combined suggestion list
pub const MAX_SUGGESTIONS: usize = 10;

const MAX_TITLE_SUGGESTIONS: usize = 5;
const MAX_BRAND_SUGGESTIONS: usize = 3;
const MAX_CATEGORY_SUGGESTIONS: usize = 3;

/// True when `query` is long enough to be worth suggesting for
pub fn accepts_suggestion_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_SUGGESTION_QUERY_LEN
}

/// Recipes matching ANY whitespace-separated term of `query`.
///
/// A term matches when it is a case-insensitive substring of the title, brand
/// name or category, so "spicy nonsense" still finds "Spicy Chips". The
/// OR-across-terms behavior is what the site has always shipped.
pub fn search(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|term| term.to_lowercase())
        .collect();

    if terms.is_empty() {
        return Vec::new();
    }

    recipes
        .iter()
        .filter(|recipe| {
            let title = recipe.title.to_lowercase();
            let brand = recipe.brand_name.to_lowercase();
            let category = recipe.category.to_lowercase();
            terms.iter().any(|term| {
                title.contains(term.as_str())
                    || brand.contains(term.as_str())
                    || category.contains(term.as_str())
            })
        })
        .cloned()
        .collect()
}

/// Autocomplete candidates for `query`.
///
/// Up to five recipe titles, then up to three brand names, then up to three
/// category names, all containing the whole (trimmed) query ignoring case.
/// Duplicates keep their first position and the list is capped at
/// [`MAX_SUGGESTIONS`].
pub fn suggestions(recipes: &[Recipe], query: &str) -> Vec<String> {
    if !accepts_suggestion_query(query) {
        return Vec::new();
    }
    let needle = query.trim().to_lowercase();
    let matches = |text: &str| text.to_lowercase().contains(&needle);

    let titles = recipes
        .iter()
        .filter(|recipe| matches(&recipe.title))
        .map(|recipe| recipe.title.clone())
        .take(MAX_TITLE_SUGGESTIONS);

    let brands = brands_of(recipes)
        .into_iter()
        .filter(|brand| matches(&brand.name))
        .map(|brand| brand.name)
        .take(MAX_BRAND_SUGGESTIONS);

    let categories = categories_of(recipes)
        .into_iter()
        .filter(|category| matches(&category.name))
        .map(|category| category.name)
        .take(MAX_CATEGORY_SUGGESTIONS);

    let mut seen = HashSet::new();
    titles
        .chain(brands)
        .chain(categories)
        .filter(|candidate| seen.insert(candidate.clone()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
