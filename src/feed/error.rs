//! Error types for feed retrieval and parsing.

use thiserror::Error;

/// Errors that abort a whole scan of one feed.
///
/// Problems with a single field of a single item never surface here; those
/// degrade to an empty value during extraction.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document parsed, but contains no `<item>` or `<entry>` elements.
    #[error(
        "no <item> or <entry> elements found (root: <{root}>, top-level: [{}])\n  Suggestion: the feed may use an unsupported format; inspect it and author the mapping by hand",
        .top_level.join(", ")
    )]
    NoItems {
        /// Root element name as written in the document
        root: String,
        /// Names of the root's direct children, in document order
        top_level: Vec<String>,
    },

    /// The document is not well-formed XML.
    #[error("feed is not well-formed XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader diagnostic
        message: String,
    },

    /// HTTP retrieval failed or returned a non-success status.
    #[error("failed to fetch feed '{url}': {reason}")]
    Fetch {
        /// Requested URL
        url: String,
        /// Transport error or status description
        reason: String,
    },

    /// Local feed file could not be read.
    #[error("failed to read feed file '{path}': {source}")]
    Read {
        /// Path as given by the operator
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    /// Creates a `Fetch` error from any displayable cause.
    #[must_use]
    pub fn fetch(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for the malformed-feed class (not well-formed, or no items).
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::NoItems { .. } | Self::Xml { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_items_message_lists_diagnostics() {
        let err = FeedError::NoItems {
            root: "html".to_string(),
            top_level: vec!["head".to_string(), "body".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("<html>"), "should name root: {msg}");
        assert!(msg.contains("head, body"), "should list children: {msg}");
        assert!(err.is_malformed());
    }

    #[test]
    fn test_fetch_error_is_not_malformed() {
        let err = FeedError::fetch("https://example.com/rss", "HTTP 503");
        assert!(err.to_string().contains("HTTP 503"));
        assert!(!err.is_malformed());
    }
}
