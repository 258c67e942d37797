//! Tag discovery on a sample feed item.

use std::collections::HashSet;

use crate::feed::FeedItem;
use crate::text::truncate_chars;

/// Longest sample value shown before truncation.
pub const SAMPLE_MAX_CHARS: usize = 100;

/// Marker shown instead of a sample when a tag starts with nested elements rather than text.
pub const SUBTREE_MARKER: &str = "[XML subtree]";

/// A distinct child tag of the sample item and a preview of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTag {
    /// Tag name without namespace prefix.
    pub name: String,
    /// Trimmed first value, at most [`SAMPLE_MAX_CHARS`] characters plus `...`.
    pub sample: String,
}

/// Lists the item's direct child tags in document order.
///
/// Namespace prefixes are stripped and tags are deduplicated by stripped
/// name, so `dc:title` and `title` collapse into the first one seen.
#[must_use]
pub fn discover_tags(item: &FeedItem) -> Vec<DiscoveredTag> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for field in item.fields() {
        if !seen.insert(field.local_name.as_str()) {
            continue;
        }

        let first = field.value.as_values().first().map_or("", |v| v.trim());
        let sample = if field.has_children {
            SUBTREE_MARKER.to_string()
        } else {
            truncate_chars(first, SAMPLE_MAX_CHARS)
        };

        tags.push(DiscoveredTag {
            name: field.local_name.clone(),
            sample,
        });
    }

    tags
}
