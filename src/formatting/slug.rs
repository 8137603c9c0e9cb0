/// Turn a display name into a URL-safe slug.
///
/// Lowercases the text, drops everything that is not a word character,
/// whitespace or `-`, collapses runs of whitespace, `_` and `-` into a single
/// `-` and trims hyphens from both ends. Distinct inputs may collide; callers
/// that look recipes up by slug get the first match.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
        // anything else is stripped without breaking the current word
    }

    slug
}

/// Like [`slugify`], but never returns an empty slug.
///
/// Empty slugs break routing, so `fallback` is used whenever the text
/// contains no slug-worthy characters at all.
pub fn slugify_or(text: &str, fallback: impl Into<String>) -> String {
    let slug = slugify(text);
    if slug.is_empty() {
        fallback.into()
    } else {
        slug
    }
}
