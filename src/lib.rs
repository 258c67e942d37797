//! Feedmap Core Library
//!
//! This library maps the native tags of journal RSS/Atom feeds onto a
//! canonical article record through a declarative per-feed mapping file.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`text`] - Markup stripping and whitespace normalization
//! - [`feed`] - Feed retrieval and item parsing
//! - [`mapping`] - Canonical fields, field rules and the mapping store
//! - [`extract`] - Single-field extraction from one item
//! - [`canonical`] - Item to canonical record conversion
//! - [`suggest`] - Tag discovery and mapping suggestion for new feeds
//! - [`report`] - Markdown/JSON report rendering

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canonical;
pub mod extract;
pub mod feed;
pub mod mapping;
pub mod report;
pub mod suggest;
pub mod text;
mod user_agent;

// Re-export commonly used types
pub use canonical::{ArticleRecord, canonicalize, canonicalize_item};
pub use extract::extract;
pub use feed::{FeedClient, FeedError, FeedItem, FeedSource, FieldValue, ItemAccessor, parse_feed};
pub use mapping::{
    CanonicalField, FieldRule, JsonFileStore, MappingError, MappingStore, persist, resolve,
};
pub use report::ReportFormat;
pub use suggest::{SuggestError, Suggestion, discover_tags, refine, suggest_mapping};
pub use text::normalize;
