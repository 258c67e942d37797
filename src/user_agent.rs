//! User-Agent string for feed requests.
//!
//! Journal feed endpoints sometimes reject anonymous clients, so requests
//! identify the tool and its version.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/feedmap";

/// Default User-Agent for feed requests.
#[must_use]
pub(crate) fn default_feed_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("feedmap/{version} (literature-monitoring-tool; +{PROJECT_UA_URL})")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_ua_contains_version_and_project_url() {
        let ua = default_feed_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL");
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("feedmap/")
                .and_then(|s| s.split(' ').next())
                .expect("feed UA has version"),
            "UA must contain crate version"
        );
    }

    #[test]
    fn test_feed_ua_identifies_tool_purpose() {
        let ua = default_feed_user_agent();
        assert!(
            ua.contains("literature-monitoring-tool"),
            "UA must identify the tool: {ua}"
        );
    }
}
