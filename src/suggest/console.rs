//! Console output for suggestion mode.

use std::io::{self, Write};

use super::discovery::DiscoveredTag;
use super::heuristics::Suggestion;
use crate::mapping::{MappingDocument, MappingError};

/// Prints `- tag: sample` for every discovered tag.
///
/// # Errors
///
/// Returns an error when writing fails.
pub fn write_discovered_tags<W: Write>(out: &mut W, tags: &[DiscoveredTag]) -> io::Result<()> {
    writeln!(
        out,
        "\nDetected columns/tags in <item>/<entry> (sample values shown):"
    )?;
    for tag in tags {
        writeln!(out, "- {}: {}", tag.name, tag.sample)?;
    }
    Ok(())
}

/// Renders the suggestion as a mapping-file document for `feed_id`.
///
/// The block is valid JSON and can be pasted into an empty mapping file, or
/// its inner entry merged into an existing one.
///
/// # Errors
///
/// Returns [`MappingError::Serialize`] on encoder failure.
pub fn suggestion_block(feed_id: &str, suggestion: &Suggestion) -> Result<String, MappingError> {
    let mut document = MappingDocument::new();
    document.set_rules(feed_id, &suggestion.to_rules())?;
    document.to_json()
}

/// Prints the mapping guide shown after a suggestion.
///
/// # Errors
///
/// Returns an error when writing fails.
pub fn write_guide<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "---")?;
    writeln!(out, "Guide:")?;
    writeln!(out, "- title: usually the article title")?;
    writeln!(
        out,
        "- authors: may be multiple creator/author tags; declare them multi-valued to join them"
    )?;
    writeln!(out, "- abstract: often description, summary, or content:encoded")?;
    writeln!(out, "- published_date: pubDate, published, or date")?;
    writeln!(out, "- doi_url or link: the article link or DOI")?;
    writeln!(
        out,
        "- Multi-valued tags use {{\"target\": \"<field>\", \"join_with\": \", \"}} instead of a plain field name."
    )?;
    Ok(())
}
