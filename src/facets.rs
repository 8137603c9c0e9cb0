//! Brand and category facets, slug lookups and list ordering.
//!
//! Everything here is recomputed from the full collection on each call.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::str::FromStr;

use crate::formatting::slugify_or;
use crate::model::{Brand, Category, Recipe};

/// Group `keys` by exact value, counting occurrences.
///
/// Empty keys are skipped. Output order is the order in which each key was
/// first seen.
fn group_counts<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize)> = Vec::new();

    for key in keys.filter(|key| !key.is_empty()) {
        match positions.get(key) {
            Some(&pos) => groups[pos].1 += 1,
            None => {
                positions.insert(key, groups.len());
                groups.push((key, 1));
            }
        }
    }

    groups
}

/// Brands present in `recipes`, in first-seen order.
///
/// Grouping is case-sensitive: "Lays" and "lays" are separate brands that
/// share a slug. Recipes without a brand are left out.
pub fn brands_of(recipes: &[Recipe]) -> Vec<Brand> {
    group_counts(recipes.iter().map(|r| r.brand_name.as_str()))
        .into_iter()
        .enumerate()
        .map(|(pos, (name, count))| Brand {
            name: name.to_string(),
            slug: slugify_or(name, format!("brand-{}", pos + 1)),
            count,
        })
        .collect()
}

/// Categories present in `recipes`, in first-seen order.
///
/// Same grouping rules as [`brands_of`].
pub fn categories_of(recipes: &[Recipe]) -> Vec<Category> {
    group_counts(recipes.iter().map(|r| r.category.as_str()))
        .into_iter()
        .enumerate()
        .map(|(pos, (name, count))| Category {
            name: name.to_string(),
            slug: slugify_or(name, format!("category-{}", pos + 1)),
            count,
            description: category_description(name),
        })
        .collect()
}

pub fn category_description(name: &str) -> String {
    format!(
        "Delicious homemade {} recipes that taste just like your favorite store-bought brands but healthier and more affordable.",
        name.to_lowercase()
    )
}

/// First recipe with this slug, in collection order
pub fn find_by_slug<'a>(recipes: &'a [Recipe], slug: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|recipe| recipe.slug == slug)
}

/// Recipes whose brand matches `brand` exactly
pub fn recipes_by_brand(recipes: &[Recipe], brand: &str) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.brand_name == brand)
        .cloned()
        .collect()
}

/// Recipes in `category`, ignoring case
pub fn recipes_in_category(recipes: &[Recipe], category: &str) -> Vec<Recipe> {
    let wanted = category.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| recipe.category.to_lowercase() == wanted)
        .cloned()
        .collect()
}

pub fn brand_by_slug(recipes: &[Recipe], slug: &str) -> Option<Brand> {
    brands_of(recipes).into_iter().find(|brand| brand.slug == slug)
}

pub fn category_by_slug(recipes: &[Recipe], slug: &str) -> Option<Category> {
    categories_of(recipes)
        .into_iter()
        .find(|category| category.slug == slug)
}

/// Ordering for recipe listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Title A-Z, ignoring case
    #[default]
    Alphabetical,
    /// Title Z-A, ignoring case
    AlphabeticalDesc,
    /// Most recently loaded first
    Newest,
    /// No popularity data exists yet, so source order is kept
    Popular,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::AlphabeticalDesc => "alphabetical-desc",
            SortOrder::Newest => "newest",
            SortOrder::Popular => "popular",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(SortOrder::Alphabetical),
            "alphabetical-desc" => Ok(SortOrder::AlphabeticalDesc),
            "newest" => Ok(SortOrder::Newest),
            "popular" => Ok(SortOrder::Popular),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Sort a listing in place. Stable, so ties keep source order.
pub fn sort_recipes(recipes: &mut [Recipe], order: SortOrder) {
    match order {
        SortOrder::Alphabetical => recipes.sort_by_cached_key(|r| r.title.to_lowercase()),
        SortOrder::AlphabeticalDesc => {
            recipes.sort_by_cached_key(|r| Reverse(r.title.to_lowercase()))
        }
        SortOrder::Newest => recipes.sort_by_key(|r| Reverse(r.id)),
        SortOrder::Popular => {}
    }
}
