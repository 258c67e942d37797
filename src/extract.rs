//! Field extraction: one rule applied to one item.

use tracing::trace;

use crate::feed::{FieldValue, ItemAccessor};
use crate::mapping::{Cardinality, FieldRule};
use crate::text::normalize;

/// Produces the output value of `rule` for `item`.
///
/// Single-valued rules return the normalized value of the tag; when the tag
/// occurs several times the first non-empty occurrence is used. Multi-valued
/// rules normalize every occurrence, drop empty ones and join the rest with
/// the rule's delimiter in document order.
///
/// Extraction never fails: an absent or empty tag yields an empty string so
/// that one bad field cannot stop the remaining fields or items.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use feedmap_core::extract::extract;
/// use feedmap_core::feed::FieldValue;
/// use feedmap_core::mapping::FieldRule;
///
/// let mut item = HashMap::new();
/// item.insert("dc:creator".to_string(), FieldValue::from(vec!["A", "  B  "]));
///
/// let rule = FieldRule::multi("dc:creator", "authors", "; ");
/// assert_eq!(extract(&item, &rule), "A; B");
/// ```
#[must_use]
pub fn extract(item: &impl ItemAccessor, rule: &FieldRule) -> String {
    let Some(value) = item.lookup(&rule.source_tag) else {
        trace!(tag = %rule.source_tag, "Tag absent; field left empty");
        return String::new();
    };

    match &rule.cardinality {
        Cardinality::Single => extract_single(value),
        Cardinality::Multi { join_with } => value
            .as_values()
            .into_iter()
            .filter(|raw| !raw.is_empty())
            .map(|raw| normalize(Some(raw)))
            .filter(|clean| !clean.is_empty())
            .collect::<Vec<_>>()
            .join(join_with),
    }
}

fn extract_single(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => normalize(Some(text)),
        FieldValue::List(values) => values
            .iter()
            .map(|raw| normalize(Some(raw)))
            .find(|clean| !clean.is_empty())
            .unwrap_or_default(),
    }
}
