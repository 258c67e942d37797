//! Per-feed mapping configuration: canonical fields, field rules and the store.
//!
//! A mapping file holds one entry per feed id. Each entry maps native tag
//! names to a target field, either as a plain string or, for tags that occur
//! several times per item, as `{"target": ..., "join_with": ...}`:
//!
//! ```json
//! {
//!     "my_feed_id": {
//!         "title": "title",
//!         "dc:creator": {"target": "authors", "join_with": ", "},
//!         "description": "abstract"
//!     }
//! }
//! ```

mod error;
mod field;
mod rule;
mod store;

pub use error::MappingError;
pub use field::CanonicalField;
pub use rule::{
    Cardinality, DEFAULT_JOIN_DELIMITER, FieldRule, RuleSpec, rules_from_entry, rules_to_entry,
};
pub use store::{DEFAULT_MAPPING_FILE, JsonFileStore, MappingDocument, MappingStore, WriteMode};

use tracing::{info, instrument};

/// Loads the rules for `feed_id` in the order they are declared in the store.
///
/// Later rules that target the same field as earlier ones take precedence
/// during canonicalization, so the order is significant.
///
/// # Errors
///
/// - [`MappingError::UnknownFeed`] when the store has no entry for `feed_id`
/// - [`MappingError::StoreNotFound`] when the store does not exist
/// - [`MappingError::InvalidDocument`] / [`MappingError::InvalidRule`] on bad content
#[instrument(skip(store), fields(mapping_file = %store.location().display()))]
pub fn resolve(feed_id: &str, store: &impl MappingStore) -> Result<Vec<FieldRule>, MappingError> {
    let document = store.load()?;
    let Some(rules) = document.rules(feed_id)? else {
        return Err(MappingError::UnknownFeed {
            feed_id: feed_id.to_string(),
            path: store.location().to_path_buf(),
            known: document.feed_ids().map(String::from).collect(),
        });
    };
    info!(rules = rules.len(), "Resolved feed mapping");
    Ok(rules)
}

/// Writes `rules` as the entry for `feed_id` with a read-merge-write of the store.
///
/// Any previous entry for `feed_id` is replaced; entries for other feeds are
/// written back exactly as read. A missing store starts from an empty
/// document. An unreadable or unparseable store is an error and is left
/// untouched.
///
/// # Errors
///
/// Returns [`MappingError`] when the store cannot be read, parsed or written.
#[instrument(skip(rules, store), fields(rule_count = rules.len(), mapping_file = %store.location().display()))]
pub fn persist(
    feed_id: &str,
    rules: &[FieldRule],
    store: &impl MappingStore,
) -> Result<(), MappingError> {
    let mut document = store.load_or_default()?;
    let replaced = document.contains(feed_id);
    document.set_rules(feed_id, rules)?;
    store.save(&document)?;
    info!(replaced, "Persisted feed mapping");
    Ok(())
}
