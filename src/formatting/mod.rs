//! Pure display helpers shared by the catalog: slugs, times and difficulty.

mod difficulty;
mod slug;
mod time;

pub use difficulty::Difficulty;
pub use slug::{slugify, slugify_or};
pub use time::{format_minutes, parse_minutes};
