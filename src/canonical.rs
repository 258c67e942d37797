//! Canonical article records and the canonicalizer that builds them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::extract::extract;
use crate::feed::ItemAccessor;
use crate::mapping::{CanonicalField, FieldRule};

/// One article in canonical form: field name to cleaned string value.
///
/// Keys are canonical field names or, for pass-through rules, native tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleRecord {
    fields: BTreeMap<String, String>,
}

impl ArticleRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field`, replacing any earlier value.
    pub fn insert(&mut self, field: impl Into<String>, value: String) {
        self.fields.insert(field.into(), value);
    }

    /// Value of a canonical field, if the record has it.
    #[must_use]
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.get_field(field.as_str())
    }

    /// Value of any field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Fields that are not canonical, sorted by name.
    pub fn passthrough_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(name, _)| name.parse::<CanonicalField>().is_err())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when the record has a non-empty title and some other non-empty field.
    #[must_use]
    pub fn is_substantive(&self) -> bool {
        let has_title = self.get(CanonicalField::Title).is_some_and(|t| !t.is_empty());
        has_title
            && self
                .fields
                .iter()
                .any(|(name, value)| name != CanonicalField::Title.as_str() && !value.is_empty())
    }
}

/// Builds the record for one entry by applying `rules` in order.
///
/// Every rule writes its target even when the extracted value is empty; a
/// later rule with the same target overwrites an earlier one.
#[must_use]
pub fn canonicalize_item(entry: &impl ItemAccessor, rules: &[FieldRule]) -> ArticleRecord {
    let mut record = ArticleRecord::new();
    for rule in rules {
        record.insert(rule.target_field.as_str(), extract(entry, rule));
    }
    record
}

/// Lazily converts entries into records, one per entry, in entry order.
///
/// No entry is dropped here, even a degenerate one; filtering belongs to the
/// reporting layer (see [`ArticleRecord::is_substantive`]).
pub fn canonicalize<'r, I>(
    entries: I,
    rules: &'r [FieldRule],
) -> impl Iterator<Item = ArticleRecord> + 'r
where
    I: IntoIterator,
    I::Item: ItemAccessor,
    I::IntoIter: 'r,
{
    entries.into_iter().enumerate().map(move |(index, entry)| {
        let record = canonicalize_item(&entry, rules);
        debug!(index, fields = record.fields.len(), "Canonicalized entry");
        record
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::feed::FieldValue;

    fn entry(pairs: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_end_to_end_single_item() {
        let item = entry(&[
            ("title", FieldValue::from("T")),
            ("dc:creator", FieldValue::from(vec!["A", "B"])),
            ("description", FieldValue::from("<p>Abs</p>")),
        ]);
        let rules = vec![
            FieldRule::single("title", "title"),
            FieldRule::multi("dc:creator", "authors", ", "),
            FieldRule::single("description", "abstract"),
        ];

        let records: Vec<_> = canonicalize(vec![item], &rules).collect();

        let mut expected = ArticleRecord::new();
        expected.insert("title", "T".to_string());
        expected.insert("authors", "A, B".to_string());
        expected.insert("abstract", "Abs".to_string());
        assert_eq!(records, vec![expected]);
    }

    #[test]
    fn test_last_write_wins_for_shared_target() {
        let item = entry(&[("author", FieldValue::from("Second Source"))]);
        let rules = vec![
            FieldRule::single("dc:creator", "authors"),
            FieldRule::single("author", "authors"),
        ];

        let record = canonicalize_item(&item, &rules);
        assert_eq!(record.get(CanonicalField::Authors), Some("Second Source"));
    }

    #[test]
    fn test_later_empty_value_still_overwrites() {
        let item = entry(&[("dc:creator", FieldValue::from("First"))]);
        let rules = vec![
            FieldRule::single("dc:creator", "authors"),
            FieldRule::single("author", "authors"),
        ];

        let record = canonicalize_item(&item, &rules);
        assert_eq!(record.get(CanonicalField::Authors), Some(""));
    }

    #[test]
    fn test_canonicalize_preserves_order_and_keeps_degenerate_entries() {
        let entries = vec![
            entry(&[("title", FieldValue::from("One"))]),
            entry(&[]),
            entry(&[("title", FieldValue::from("Three"))]),
        ];
        let rules = vec![FieldRule::single("title", "title")];

        let titles: Vec<_> = canonicalize(entries, &rules)
            .map(|r| r.get(CanonicalField::Title).unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, ["One", "", "Three"]);
    }

    #[test]
    fn test_passthrough_field_keyed_by_tag_name() {
        let item = entry(&[("prism:volume", FieldValue::from("12"))]);
        let rules = vec![FieldRule::single("prism:volume", "prism:volume")];

        let record = canonicalize_item(&item, &rules);
        let passthrough: Vec<_> = record.passthrough_fields().collect();
        assert_eq!(passthrough, [("prism:volume", "12")]);
    }

    #[test]
    fn test_is_substantive() {
        let mut record = ArticleRecord::new();
        record.insert("title", "T".to_string());
        assert!(!record.is_substantive(), "title alone is not enough");

        record.insert("abstract", "A".to_string());
        assert!(record.is_substantive());

        let mut untitled = ArticleRecord::new();
        untitled.insert("abstract", "A".to_string());
        assert!(!untitled.is_substantive());
    }

    #[test]
    fn test_record_serializes_as_flat_object() {
        let mut record = ArticleRecord::new();
        record.insert("title", "T".to_string());
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"title": "T"}));
    }
}
