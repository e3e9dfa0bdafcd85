//! Query normalization shared by every search surface.

/// Queries shorter than this (in characters, after trimming) match nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Trim and lowercase a query, or `None` when it is too short to search.
pub fn normalize_query(query: &str, min_chars: usize) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.chars().count() < min_chars {
        return None;
    }
    Some(trimmed.to_lowercase())
}
