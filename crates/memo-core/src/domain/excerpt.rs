/// Maximum number of characters kept in a listing excerpt.
pub const EXCERPT_LIMIT: usize = 200;

/// Appended after a truncated excerpt. Not counted against the limit.
pub const EXCERPT_MARKER: &str = "...";

/// Shorten already-stripped text for listing views.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn shorten(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], EXCERPT_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_text_is_cut_and_marked() {
        let text = "a".repeat(250);
        let excerpt = shorten(&text);
        assert_eq!(excerpt, format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_short_text_is_unchanged() {
        let text = "b".repeat(150);
        assert_eq!(shorten(&text), text);
    }

    #[test]
    fn test_exact_limit_gets_no_marker() {
        let text = "c".repeat(EXCERPT_LIMIT);
        assert_eq!(shorten(&text), text);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let excerpt = shorten(&text);
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT + EXCERPT_MARKER.len());
        assert!(excerpt.ends_with("é..."));
    }
}
