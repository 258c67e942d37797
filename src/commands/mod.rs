//! CLI command handlers.

mod config;
mod inspect;
mod scan;
mod suggest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use feedmap_core::feed::{DEFAULT_HTTP_TIMEOUT_SECS, FeedClient, FeedSource, ParsedFeed, parse_feed};
use feedmap_core::mapping::{DEFAULT_MAPPING_FILE, JsonFileStore, WriteMode};
use tracing::info;

use crate::app_config::FileConfig;

pub use config::run_config_show_command;
pub use inspect::run_inspect_command;
pub use scan::run_scan_command;
pub use suggest::run_suggest_command;

/// Report directory used when neither the CLI nor the config names one.
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Effective settings after applying config file values over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mapping_path: PathBuf,
    pub output_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub write_mode: WriteMode,
    pub skip_empty: bool,
}

impl Settings {
    #[must_use]
    pub fn from_file_config(config: &FileConfig) -> Self {
        Self {
            mapping_path: config
                .mapping_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE)),
            output_dir: config
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            http_timeout_secs: config.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            write_mode: if config.atomic_writes.unwrap_or(false) {
                WriteMode::AtomicRename
            } else {
                WriteMode::InPlace
            },
            skip_empty: config.skip_empty.unwrap_or(false),
        }
    }

    /// Mapping store at `path_override`, or the configured path.
    #[must_use]
    pub fn mapping_store(&self, path_override: Option<&Path>) -> JsonFileStore {
        let path = path_override.unwrap_or(self.mapping_path.as_path());
        JsonFileStore::new(path).with_write_mode(self.write_mode)
    }
}

/// Fetches and parses the feed named by `source`.
async fn load_feed(source: &str, settings: &Settings) -> Result<ParsedFeed> {
    let source = FeedSource::from_arg(source);
    let client = FeedClient::new(settings.http_timeout_secs)?;
    let bytes = source
        .fetch(&client)
        .await
        .with_context(|| format!("Cannot load feed from '{source}'"))?;
    let feed = parse_feed(&bytes).with_context(|| format!("Cannot parse feed from '{source}'"))?;
    info!(root = %feed.root, items = feed.len(), "Parsed feed");
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_without_config() {
        let settings = Settings::from_file_config(&FileConfig::default());
        assert_eq!(settings.mapping_path, PathBuf::from(DEFAULT_MAPPING_FILE));
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(settings.write_mode, WriteMode::InPlace);
        assert!(!settings.skip_empty);
    }

    #[test]
    fn test_settings_apply_config_values() {
        let config = FileConfig {
            mapping_path: Some(PathBuf::from("maps/feeds.json")),
            http_timeout_secs: Some(5),
            atomic_writes: Some(true),
            skip_empty: Some(true),
            ..FileConfig::default()
        };
        let settings = Settings::from_file_config(&config);
        assert_eq!(settings.mapping_path, PathBuf::from("maps/feeds.json"));
        assert_eq!(settings.http_timeout_secs, 5);
        assert_eq!(settings.write_mode, WriteMode::AtomicRename);
        assert!(settings.skip_empty);
    }

    #[test]
    fn test_mapping_store_prefers_override() {
        use feedmap_core::mapping::MappingStore;

        let settings = Settings::from_file_config(&FileConfig::default());
        let store = settings.mapping_store(Some(Path::new("other.json")));
        assert_eq!(store.location(), Path::new("other.json"));
        let store = settings.mapping_store(None);
        assert_eq!(store.location(), Path::new(DEFAULT_MAPPING_FILE));
    }
}
