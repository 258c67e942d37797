//! Mapping suggestion for feeds that have no mapping yet.
//!
//! The flow is: [`discover_tags`] on a sample item, [`suggest_mapping`] over
//! the discovered names, optionally [`refine`] with the operator, then
//! [`crate::mapping::persist`] the resulting rules under the feed id.

mod console;
mod discovery;
mod heuristics;
mod refine;

pub use console::{suggestion_block, write_discovered_tags, write_guide};
pub use discovery::{DiscoveredTag, SAMPLE_MAX_CHARS, SUBTREE_MARKER, discover_tags};
pub use heuristics::{SuggestedTag, Suggestion, suggest_mapping};
pub use refine::{SuggestError, refine};
