/// Excerpts longer than this many characters are cut.
pub const EXCERPT_LENGTH: usize = 100;

/// Appended to cut excerpts.
pub const ELLIPSIS: &str = "...";

/// Shorten paragraph-only markup for list views.
///
/// `stripped` must already be reduced to `<p>` tags; the tags count toward
/// the length.
pub fn excerpt(stripped: &str) -> String {
    if stripped.chars().count() < EXCERPT_LENGTH {
        return stripped.to_string();
    }

    let mut cut: String = stripped.chars().take(EXCERPT_LENGTH).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_is_unchanged() {
        let body = format!("<p>{}</p>", "a".repeat(43));
        assert_eq!(body.chars().count(), 50);
        assert_eq!(excerpt(&body), body);
    }

    #[test]
    fn test_long_body_is_cut_with_ellipsis() {
        let body = format!("<p>{}</p>", "a".repeat(143));
        assert_eq!(body.chars().count(), 150);

        let cut = excerpt(&body);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with(ELLIPSIS));
        assert!(cut.starts_with("<p>aaa"));
    }

    #[test]
    fn test_exactly_limit_is_cut() {
        let body = "b".repeat(EXCERPT_LENGTH);
        assert_eq!(excerpt(&body), format!("{body}..."));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let body = "é".repeat(120);
        let cut = excerpt(&body);
        assert_eq!(cut.chars().count(), 103);
    }
}
