//! Canonical article field names shared by every feed schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A normalized output field.
///
/// The set is open: rules may target any other name, which then passes
/// through to the record unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Title,
    Authors,
    Abstract,
    PublishedDate,
    DoiUrl,
    Link,
}

impl CanonicalField {
    /// All canonical fields in heuristic-matching priority order.
    pub const PRIORITY: [Self; 6] = [
        Self::Title,
        Self::Authors,
        Self::Abstract,
        Self::PublishedDate,
        Self::DoiUrl,
        Self::Link,
    ];

    /// Stable string label used in mapping files and records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Authors => "authors",
            Self::Abstract => "abstract",
            Self::PublishedDate => "published_date",
            Self::DoiUrl => "doi_url",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("'{s}' is not a canonical field"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_field_round_trips_through_label() {
        for field in CanonicalField::PRIORITY {
            assert_eq!(field.as_str().parse::<CanonicalField>().unwrap(), field);
        }
    }

    #[test]
    fn test_canonical_field_unknown_label_rejected() {
        assert!("journal".parse::<CanonicalField>().is_err());
    }

    #[test]
    fn test_canonical_field_serde_uses_snake_case() {
        let json = serde_json::to_string(&CanonicalField::PublishedDate).unwrap();
        assert_eq!(json, r#""published_date""#);
    }

    #[test]
    fn test_priority_order_is_fixed() {
        let labels: Vec<_> = CanonicalField::PRIORITY.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            labels,
            ["title", "authors", "abstract", "published_date", "doi_url", "link"]
        );
    }
}
