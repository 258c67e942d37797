//! Feed item representation and the lookup capability the extractor depends on.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Raw value of one native tag on one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Tag occurred once.
    Text(String),
    /// Tag occurred several times, values in document order.
    List(Vec<String>),
}

impl FieldValue {
    /// Returns the values as a slice-like sequence regardless of shape.
    #[must_use]
    pub fn as_values(&self) -> Vec<&str> {
        match self {
            Self::Text(value) => vec![value.as_str()],
            Self::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Text(first) => {
                let first = std::mem::take(first);
                *self = Self::List(vec![first, value]);
            }
            Self::List(values) => values.push(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(String::from).collect())
    }
}

/// Named-tag lookup on a single feed entry.
///
/// Implemented by parsed XML items (element-style access) and by plain
/// string-keyed maps (key-style access), so extraction works the same on both.
pub trait ItemAccessor {
    /// Returns the raw value for `tag`, or `None` when the item lacks it.
    fn lookup(&self, tag: &str) -> Option<&FieldValue>;
}

impl ItemAccessor for HashMap<String, FieldValue> {
    fn lookup(&self, tag: &str) -> Option<&FieldValue> {
        self.get(tag)
    }
}

impl ItemAccessor for BTreeMap<String, FieldValue> {
    fn lookup(&self, tag: &str) -> Option<&FieldValue> {
        self.get(tag)
    }
}

impl<T: ItemAccessor + ?Sized> ItemAccessor for &T {
    fn lookup(&self, tag: &str) -> Option<&FieldValue> {
        (**self).lookup(tag)
    }
}

/// One direct child tag of an item, with all its occurrences merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemField {
    /// Name as written in the document, e.g. `dc:creator`.
    pub name: String,
    /// Name without namespace prefix, e.g. `creator`.
    pub local_name: String,
    /// Collected value(s).
    pub value: FieldValue,
    /// True when the first occurrence opened with a nested element before any text.
    pub has_children: bool,
}

/// A single `<item>` or `<entry>` from a parsed feed.
///
/// Fields keep document order of first occurrence. A field is found by its
/// qualified name first and by its local name as a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    fields: Vec<ItemField>,
}

impl FeedItem {
    /// Creates an empty item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of a child tag.
    ///
    /// Repeated tags accumulate into a [`FieldValue::List`].
    pub fn push_child(&mut self, name: &str, value: String, has_children: bool) {
        if let Some(existing) = self.fields.iter_mut().find(|field| field.name == name) {
            existing.value.push(value);
            return;
        }
        self.fields.push(ItemField {
            name: name.to_string(),
            local_name: strip_namespace(name).to_string(),
            value: FieldValue::Text(value),
            has_children,
        });
    }

    /// Child tags in document order.
    #[must_use]
    pub fn fields(&self) -> &[ItemField] {
        &self.fields
    }
}

impl ItemAccessor for FeedItem {
    fn lookup(&self, tag: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == tag)
            .or_else(|| self.fields.iter().find(|field| field.local_name == tag))
            .map(|field| &field.value)
    }
}

/// Removes an XML namespace prefix (`dc:creator`) or Clark notation (`{uri}creator`).
#[must_use]
pub fn strip_namespace(name: &str) -> &str {
    if let Some((_, local)) = name.rsplit_once('}') {
        return local;
    }
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
