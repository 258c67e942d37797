//! Feed retrieval from an HTTP(S) URL or a local file.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::error::FeedError;
use crate::user_agent;

/// Default whole-request timeout for feed downloads.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where feed bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Remote feed fetched with HTTP GET.
    Url(Url),
    /// Feed stored on disk.
    File(PathBuf),
}

impl FeedSource {
    /// Classifies an operator-supplied argument.
    ///
    /// Only `http` and `https` URLs are fetched remotely; everything else,
    /// including strings that fail to parse as URLs, is treated as a path.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(arg)),
        }
    }

    /// Reads the raw feed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Fetch`] on transport failure or non-success status,
    /// and [`FeedError::Read`] when a local file cannot be read.
    #[instrument(skip(self, client), fields(source = %self))]
    pub async fn fetch(&self, client: &FeedClient) -> Result<Vec<u8>, FeedError> {
        match self {
            Self::Url(url) => client.get(url).await,
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| FeedError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                debug!(bytes = bytes.len(), "Read feed file");
                Ok(bytes)
            }
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP client for feed downloads.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Builds a client with the shared user agent and the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Fetch`] when the underlying client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(user_agent::default_feed_user_agent())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| FeedError::fetch("<client>", format!("HTTP client construction failed: {e}")))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>, FeedError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedError::fetch(url.as_str(), e))?;
        info!(url = %url, bytes = bytes.len(), "Fetched feed");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg_http_is_url() {
        let source = FeedSource::from_arg("https://example.com/rss.xml");
        assert!(matches!(source, FeedSource::Url(_)));
    }

    #[test]
    fn test_from_arg_relative_path_is_file() {
        assert_eq!(
            FeedSource::from_arg("feeds/nature.xml"),
            FeedSource::File(PathBuf::from("feeds/nature.xml"))
        );
    }

    #[test]
    fn test_from_arg_other_scheme_is_file() {
        // file:// and ftp:// are not fetched remotely
        assert!(matches!(
            FeedSource::from_arg("ftp://example.com/feed.xml"),
            FeedSource::File(_)
        ));
    }

    #[test]
    fn test_display_shows_location() {
        assert_eq!(
            FeedSource::from_arg("/tmp/feed.xml").to_string(),
            "/tmp/feed.xml"
        );
    }
}
