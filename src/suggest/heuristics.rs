//! Greedy, priority-ordered tag-name heuristics for bootstrapping a mapping.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::mapping::{CanonicalField, FieldRule};
use crate::text::compile_static_regex;

struct FieldHint {
    field: CanonicalField,
    whole: Regex,
    partial: Regex,
}

impl FieldHint {
    fn new(field: CanonicalField, pattern: &str) -> Self {
        Self {
            field,
            whole: compile_static_regex(&format!("(?i)^(?:{pattern})$")),
            partial: compile_static_regex(&format!("(?i){pattern}")),
        }
    }
}

// Evaluated in this order; a tag is bound to the first field that claims it.
static FIELD_HINTS: LazyLock<Vec<FieldHint>> = LazyLock::new(|| {
    vec![
        FieldHint::new(CanonicalField::Title, "title"),
        FieldHint::new(CanonicalField::Authors, "creator|author"),
        FieldHint::new(
            CanonicalField::Abstract,
            "description|summary|abstract|content:encoded",
        ),
        FieldHint::new(CanonicalField::PublishedDate, "date|published|pubDate|updated"),
        FieldHint::new(CanonicalField::DoiUrl, "doi|link"),
        FieldHint::new(CanonicalField::Link, "link"),
    ]
});

/// Proposed target for one discovered tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedTag {
    /// Native tag name.
    pub tag: String,
    /// Proposed output field: a canonical name or the tag itself.
    pub target: String,
    /// Canonical field that claimed the tag, if any.
    pub matched: Option<CanonicalField>,
}

/// Heuristic mapping for a feed, in tag discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    tags: Vec<SuggestedTag>,
}

impl Suggestion {
    /// Proposed targets in discovery order.
    #[must_use]
    pub fn tags(&self) -> &[SuggestedTag] {
        &self.tags
    }

    /// Proposed target for `tag`.
    #[must_use]
    pub fn target_for(&self, tag: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|s| s.tag == tag)
            .map(|s| s.target.as_str())
    }

    /// Canonical fields no tag was matched to.
    #[must_use]
    pub fn unmatched_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::PRIORITY
            .into_iter()
            .filter(|field| !self.tags.iter().any(|s| s.matched == Some(*field)))
            .collect()
    }

    /// The suggestion accepted as-is: every tag single-valued.
    #[must_use]
    pub fn to_rules(&self) -> Vec<FieldRule> {
        self.tags
            .iter()
            .map(|s| FieldRule::single(s.tag.as_str(), s.target.as_str()))
            .collect()
    }
}

/// Proposes a target field for every tag.
///
/// For each canonical field in priority order (`title`, `authors`,
/// `abstract`, `published_date`, `doi_url`, `link`), the first unclaimed tag
/// whose whole name matches the field's pattern is claimed; failing that, the
/// first unclaimed tag containing a match. Tags left unclaimed map to
/// themselves. The assignment is greedy: an ambiguous tag goes to whichever
/// field comes first, never to a globally better fit.
///
/// # Example
///
/// ```
/// use feedmap_core::suggest::suggest_mapping;
///
/// let suggestion = suggest_mapping(&["title", "dc:creator", "description"]);
/// assert_eq!(suggestion.target_for("dc:creator"), Some("authors"));
/// ```
#[must_use]
pub fn suggest_mapping<S: AsRef<str>>(tags: &[S]) -> Suggestion {
    let mut claimed: Vec<Option<CanonicalField>> = vec![None; tags.len()];

    for hint in FIELD_HINTS.iter() {
        let unclaimed = |index: &usize| claimed[*index].is_none();
        let winner = (0..tags.len())
            .filter(unclaimed)
            .find(|&i| hint.whole.is_match(tags[i].as_ref()))
            .or_else(|| {
                (0..tags.len())
                    .filter(unclaimed)
                    .find(|&i| hint.partial.is_match(tags[i].as_ref()))
            });

        if let Some(index) = winner {
            debug!(tag = tags[index].as_ref(), field = %hint.field, "Heuristic match");
            claimed[index] = Some(hint.field);
        }
    }

    let tags = tags
        .iter()
        .zip(claimed)
        .map(|(tag, matched)| {
            let tag = tag.as_ref().to_string();
            SuggestedTag {
                target: matched.map_or_else(|| tag.clone(), |field| field.as_str().to_string()),
                tag,
                matched,
            }
        })
        .collect();

    Suggestion { tags }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_typical_rss_item() {
        let suggestion =
            suggest_mapping(&["title", "dc:creator", "description", "pubDate", "link"]);

        assert_eq!(suggestion.target_for("title"), Some("title"));
        assert_eq!(suggestion.target_for("dc:creator"), Some("authors"));
        assert_eq!(suggestion.target_for("description"), Some("abstract"));
        assert_eq!(suggestion.target_for("pubDate"), Some("published_date"));
        // doi_url outranks link and claims the only link-like tag
        assert_eq!(suggestion.target_for("link"), Some("doi_url"));
        assert_eq!(suggestion.unmatched_fields(), vec![CanonicalField::Link]);
    }

    #[test]
    fn test_suggest_prefers_whole_name_match() {
        // "dc:title" contains "title" but "title" matches exactly
        let suggestion = suggest_mapping(&["dc:title", "title"]);
        assert_eq!(suggestion.target_for("title"), Some("title"));
        assert_eq!(suggestion.target_for("dc:title"), Some("dc:title"));
    }

    #[test]
    fn test_suggest_falls_back_to_substring() {
        let suggestion = suggest_mapping(&["articleTitle", "prism:doi", "alternateLink"]);
        assert_eq!(suggestion.target_for("articleTitle"), Some("title"));
        assert_eq!(suggestion.target_for("prism:doi"), Some("doi_url"));
        assert_eq!(suggestion.target_for("alternateLink"), Some("link"));
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let suggestion = suggest_mapping(&["TITLE", "Author"]);
        assert_eq!(suggestion.target_for("TITLE"), Some("title"));
        assert_eq!(suggestion.target_for("Author"), Some("authors"));
    }

    #[test]
    fn test_suggest_unclaimed_tags_pass_through() {
        let suggestion = suggest_mapping(&["title", "category", "guid"]);
        assert_eq!(suggestion.target_for("category"), Some("category"));
        assert_eq!(suggestion.target_for("guid"), Some("guid"));
        assert_eq!(suggestion.tags()[1].matched, None);
    }

    #[test]
    fn test_suggest_each_tag_claimed_once() {
        // "updated" could only be a date; "published" too, but only one wins
        let suggestion = suggest_mapping(&["published", "updated"]);
        assert_eq!(suggestion.target_for("published"), Some("published_date"));
        assert_eq!(suggestion.target_for("updated"), Some("updated"));
    }

    #[test]
    fn test_suggest_keeps_discovery_order() {
        let suggestion = suggest_mapping(&["link", "title"]);
        let order: Vec<_> = suggestion.tags().iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(order, ["link", "title"]);
    }

    #[test]
    fn test_to_rules_single_valued() {
        let rules = suggest_mapping(&["title"]).to_rules();
        assert_eq!(rules, vec![FieldRule::single("title", "title")]);
    }

    #[test]
    fn test_suggest_empty_tag_list() {
        let suggestion = suggest_mapping::<&str>(&[]);
        assert!(suggestion.tags().is_empty());
        assert_eq!(suggestion.unmatched_fields().len(), 6);
    }
}
