//! Mapping configuration document and its JSON file store.
//!
//! The store is read whole and rewritten whole. Nothing locks the file: two
//! processes that both read, modify and write will race, and the later write
//! silently discards the earlier one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::MappingError;
use super::rule::{FieldRule, rules_from_entry, rules_to_entry};

/// Default store file name, relative to the working directory.
pub const DEFAULT_MAPPING_FILE: &str = "column_mapping.json";

/// In-memory mapping configuration: `feed_id -> tag -> rule`.
///
/// Entries are kept as raw JSON so that rewriting one feed leaves every other
/// entry exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingDocument {
    feeds: Map<String, Value>,
}

impl MappingDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidDocument`] when the text is not a JSON object.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, MappingError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| MappingError::InvalidDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        match value {
            Value::Object(feeds) => Ok(Self { feeds }),
            other => Err(MappingError::InvalidDocument {
                path: path.to_path_buf(),
                reason: format!("expected an object of feed entries, found {}", json_kind(&other)),
            }),
        }
    }

    /// Serializes with four-space indentation and unescaped non-ASCII text.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Serialize`] on encoder failure.
    pub fn to_json(&self) -> Result<String, MappingError> {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.feeds.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Feed ids in document order.
    pub fn feed_ids(&self) -> impl Iterator<Item = &str> {
        self.feeds.keys().map(String::as_str)
    }

    /// Returns true when `feed_id` has an entry.
    #[must_use]
    pub fn contains(&self, feed_id: &str) -> bool {
        self.feeds.contains_key(feed_id)
    }

    /// Decoded rules for `feed_id` in declaration order, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidRule`] when the entry cannot be decoded.
    pub fn rules(&self, feed_id: &str) -> Result<Option<Vec<FieldRule>>, MappingError> {
        self.feeds
            .get(feed_id)
            .map(|entry| rules_from_entry(feed_id, entry))
            .transpose()
    }

    /// Replaces the entry for `feed_id`, leaving all other entries untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Serialize`] if a rule cannot be encoded.
    pub fn set_rules(&mut self, feed_id: &str, rules: &[FieldRule]) -> Result<(), MappingError> {
        let entry = rules_to_entry(rules)?;
        self.feeds.insert(feed_id.to_string(), entry);
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Persistent home of a [`MappingDocument`].
pub trait MappingStore {
    /// Human-readable location used in diagnostics.
    fn location(&self) -> &Path;

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::StoreNotFound`] when nothing is stored yet,
    /// or another [`MappingError`] when reading or parsing fails.
    fn load(&self) -> Result<MappingDocument, MappingError>;

    /// Replaces the whole stored document.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when encoding or writing fails.
    fn save(&self, document: &MappingDocument) -> Result<(), MappingError>;

    /// Like [`MappingStore::load`], but an absent store reads as empty.
    ///
    /// # Errors
    ///
    /// Propagates every error except [`MappingError::StoreNotFound`].
    fn load_or_default(&self) -> Result<MappingDocument, MappingError> {
        match self.load() {
            Err(MappingError::StoreNotFound { .. }) => Ok(MappingDocument::new()),
            other => other,
        }
    }
}

/// How [`JsonFileStore`] replaces the file on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the file directly.
    #[default]
    InPlace,
    /// Write a sibling temporary file, then rename it over the store.
    ///
    /// Readers never observe a half-written file. Concurrent writers still race.
    AtomicRename,
}

/// Mapping store backed by one UTF-8 JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_mode: WriteMode,
}

impl JsonFileStore {
    /// Creates a store for `path` using in-place writes.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::default(),
        }
    }

    /// Selects how saves replace the file.
    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    fn io_error(&self, source: std::io::Error) -> MappingError {
        MappingError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl MappingStore for JsonFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<MappingDocument, MappingError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MappingError::StoreNotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let document = MappingDocument::from_json(&raw, &self.path)?;
        debug!(path = %self.path.display(), feeds = document.feeds.len(), "Loaded mapping file");
        Ok(document)
    }

    fn save(&self, document: &MappingDocument) -> Result<(), MappingError> {
        let json = document.to_json()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        match self.write_mode {
            WriteMode::InPlace => fs::write(&self.path, json).map_err(|e| self.io_error(e))?,
            WriteMode::AtomicRename => {
                let mut tmp_name = self.path.as_os_str().to_owned();
                tmp_name.push(".tmp");
                let tmp_path = PathBuf::from(tmp_name);
                fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
                fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
            }
        }

        info!(path = %self.path.display(), mode = ?self.write_mode, "Saved mapping file");
        Ok(())
    }
}
