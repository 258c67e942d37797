//! Field rules: how one native tag of one feed maps onto an output field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::MappingError;

/// Delimiter used when a multi-valued rule does not name one.
pub const DEFAULT_JOIN_DELIMITER: &str = ", ";

/// How many values a native tag carries per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    /// One value; extra occurrences are ignored.
    Single,
    /// Several values, joined into one string.
    Multi {
        /// Text placed between joined values
        join_with: String,
    },
}

/// Maps one native tag onto one output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Native tag name, e.g. `dc:creator`.
    pub source_tag: String,
    /// Output field; a canonical name or the tag's own name for pass-through.
    pub target_field: String,
    /// Single or multi-valued.
    pub cardinality: Cardinality,
}

impl FieldRule {
    /// Creates a single-valued rule.
    #[must_use]
    pub fn single(source_tag: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_tag: source_tag.into(),
            target_field: target_field.into(),
            cardinality: Cardinality::Single,
        }
    }

    /// Creates a multi-valued rule joined with `join_with`.
    #[must_use]
    pub fn multi(
        source_tag: impl Into<String>,
        target_field: impl Into<String>,
        join_with: impl Into<String>,
    ) -> Self {
        Self {
            source_tag: source_tag.into(),
            target_field: target_field.into(),
            cardinality: Cardinality::Multi {
                join_with: join_with.into(),
            },
        }
    }

    /// Returns true when values of the tag are joined.
    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        matches!(self.cardinality, Cardinality::Multi { .. })
    }

    /// Serialized form stored under `source_tag` in a feed entry.
    #[must_use]
    pub fn to_spec(&self) -> RuleSpec {
        match &self.cardinality {
            Cardinality::Single => RuleSpec::Target(self.target_field.clone()),
            Cardinality::Multi { join_with } => RuleSpec::Structured {
                target: self.target_field.clone(),
                join_with: Some(join_with.clone()),
            },
        }
    }
}

/// On-disk shape of one rule.
///
/// A plain string names a single-valued target. An object with `join_with`
/// is multi-valued; an object without it is single-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Target(String),
    Structured {
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        join_with: Option<String>,
    },
}

impl RuleSpec {
    fn into_rule(self, source_tag: &str) -> FieldRule {
        match self {
            Self::Target(target) | Self::Structured { target, join_with: None } => {
                FieldRule::single(source_tag, target)
            }
            Self::Structured {
                target,
                join_with: Some(join_with),
            } => FieldRule::multi(source_tag, target, join_with),
        }
    }
}

/// Decodes one feed entry into rules, keeping declaration order.
///
/// # Errors
///
/// Returns [`MappingError::InvalidRule`] when the entry is not an object or
/// a rule has an unsupported shape.
pub fn rules_from_entry(feed_id: &str, entry: &Value) -> Result<Vec<FieldRule>, MappingError> {
    let Value::Object(tags) = entry else {
        return Err(MappingError::invalid_rule(
            feed_id,
            "*",
            "feed entry must be an object of tag -> rule",
        ));
    };

    tags.iter()
        .map(|(source_tag, spec)| {
            serde_json::from_value::<RuleSpec>(spec.clone())
                .map(|spec| spec.into_rule(source_tag))
                .map_err(|_| {
                    MappingError::invalid_rule(
                        feed_id,
                        source_tag,
                        "expected a field name or {\"target\": ..., \"join_with\": ...}",
                    )
                })
        })
        .collect()
}

/// Encodes rules into a feed entry object, keeping their order.
///
/// Rules with a repeated `source_tag` collapse into one key; the later rule wins.
///
/// # Errors
///
/// Returns [`MappingError::Serialize`] if a rule cannot be encoded.
pub fn rules_to_entry(rules: &[FieldRule]) -> Result<Value, MappingError> {
    let mut entry = Map::new();
    for rule in rules {
        entry.insert(rule.source_tag.clone(), serde_json::to_value(rule.to_spec())?);
    }
    Ok(Value::Object(entry))
}
