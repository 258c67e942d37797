//! Feed input: retrieval, XML parsing and the item model.
//!
//! Bytes come from a [`FeedSource`], [`parse_feed`] turns them into
//! [`FeedItem`]s, and everything downstream reads items only through the
//! [`ItemAccessor`] trait.

mod error;
mod item;
mod parser;
mod source;

pub use error::FeedError;
pub use item::{FeedItem, FieldValue, ItemAccessor, ItemField, strip_namespace};
pub use parser::{ParsedFeed, parse_feed};
pub use source::{DEFAULT_HTTP_TIMEOUT_SECS, FeedClient, FeedSource};
