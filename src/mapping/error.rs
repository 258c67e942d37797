//! Error types for mapping configuration operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, resolving or persisting feed mappings.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The requested feed id has no entry in the mapping store.
    #[error(
        "feed id '{feed_id}' not found in {}\n  Known feed ids: {}\n  Suggestion: run `feedmap suggest <source> {feed_id} --update-json` to create a mapping",
        .path.display(),
        known_list(.known)
    )]
    UnknownFeed {
        /// Requested id
        feed_id: String,
        /// Store location
        path: PathBuf,
        /// Ids present in the store, in document order
        known: Vec<String>,
    },

    /// The mapping store file does not exist.
    #[error("mapping file '{}' does not exist", .path.display())]
    StoreNotFound {
        /// Expected store location
        path: PathBuf,
    },

    /// The store exists but is not a JSON object of feed entries.
    #[error("mapping file '{}' is invalid: {reason}", .path.display())]
    InvalidDocument {
        /// Store location
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// One rule inside a feed entry has an unsupported shape.
    #[error("invalid rule for tag '{source_tag}' in feed '{feed_id}': {reason}")]
    InvalidRule {
        /// Feed whose entry holds the rule
        feed_id: String,
        /// Native tag the rule is keyed by
        source_tag: String,
        /// What is wrong with it
        reason: String,
    },

    /// Reading or writing the store failed.
    #[error("mapping file '{}' I/O error: {source}", .path.display())]
    Io {
        /// Store location
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Serializing the document failed.
    #[error("failed to serialize mapping document: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn known_list(known: &[String]) -> String {
    if known.is_empty() {
        "(none)".to_string()
    } else {
        known.join(", ")
    }
}

impl MappingError {
    /// Creates an `InvalidRule` error.
    #[must_use]
    pub fn invalid_rule(feed_id: &str, source_tag: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            feed_id: feed_id.to_string(),
            source_tag: source_tag.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for the configuration class: the feed id is not configured.
    #[must_use]
    pub fn is_unknown_feed(&self) -> bool {
        matches!(self, Self::UnknownFeed { .. })
    }
}
