//! Text cleanup for raw feed field values.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"<[^>]+>"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\s+"));

/// Compiles a regex at static init; panics on invalid pattern.
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Strips markup tags, collapses whitespace runs to a single space and trims.
///
/// `None` yields an empty string. The function is idempotent:
/// `normalize(Some(&normalize(x))) == normalize(x)`.
///
/// # Example
///
/// ```
/// use feedmap_core::text::normalize;
///
/// assert_eq!(normalize(Some("<p>Deep\n\n  learning</p> ")), "Deep learning");
/// assert_eq!(normalize(None), "");
/// ```
#[must_use]
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let stripped = MARKUP_RE.replace_all(raw, "");
    WHITESPACE_RE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Shortens `value` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &value[..byte_index]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_none_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_normalize_strips_markup() {
        assert_eq!(
            normalize(Some("<p>Abs <b>bold</b> text</p>")),
            "Abs bold text"
        );
    }

    #[test]
    fn test_normalize_collapses_newlines_and_tabs() {
        assert_eq!(normalize(Some("a\n\tb   c\r\nd")), "a b c d");
    }

    #[test]
    fn test_normalize_trims_edges() {
        assert_eq!(normalize(Some("   padded  ")), "padded");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(normalize(Some(" \n\t ")), "");
    }

    #[test]
    fn test_normalize_keeps_lone_angle_brackets() {
        // "a < b" has no closing bracket, so nothing is stripped
        assert_eq!(normalize(Some("a < b")), "a < b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "<div>\n  <p>First</p>\n  <p>Second</p>\n</div>",
            "<<a>b>",
            "x<  >y",
            "<a<t>b> tail",
            "plain",
            "\u{a0}nbsp\u{a0}\u{a0}runs\u{a0}",
            "",
        ];
        for sample in samples {
            let once = normalize(Some(sample));
            let twice = normalize(Some(&once));
            assert_eq!(once, twice, "normalize must be idempotent for {sample:?}");
            assert!(!once.contains("  "), "no double spaces in {once:?}");
        }
    }

    #[test]
    fn test_truncate_chars_short_value_unchanged() {
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_truncate_chars_long_value_gets_ellipsis() {
        let long = "a".repeat(150);
        let truncated = truncate_chars(&long, 100);
        assert_eq!(truncated.len(), 103);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let value = "é".repeat(5);
        assert_eq!(truncate_chars(&value, 3), "ééé...");
    }
}
