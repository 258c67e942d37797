//! Report rendering and output file naming for canonical records.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use regex::Regex;
use tracing::info;

use crate::canonical::ArticleRecord;
use crate::mapping::CanonicalField;
use crate::text::compile_static_regex;

static UNSAFE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"[^A-Za-z0-9]+"));

/// Output format of a scan report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One Markdown section per article.
    #[default]
    #[value(name = "md", alias = "markdown")]
    Markdown,
    /// A JSON array of records.
    Json,
}

impl ReportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// Renders `records` generated at `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn render(self, records: &[ArticleRecord], generated_at: DateTime<Local>) -> Result<String> {
        match self {
            Self::Markdown => Ok(render_markdown(records, generated_at)),
            Self::Json => serde_json::to_string_pretty(records).context("Failed to encode records as JSON"),
        }
    }
}

/// Renders records as Markdown.
///
/// Each article gets a `##` heading with its title (or `No Title`), then one
/// line per non-empty canonical field, then its non-empty pass-through fields
/// as `name: value`, then a `---` separator.
#[must_use]
pub fn render_markdown(records: &[ArticleRecord], generated_at: DateTime<Local>) -> String {
    let mut markdown = format!("Generated at: {}\n\n", generated_at.format("%Y-%m-%d %H:%M:%S"));

    for record in records {
        let title = non_empty(record, CanonicalField::Title).unwrap_or("No Title");
        let _ = write!(markdown, "## {title}\n\n");
        if let Some(authors) = non_empty(record, CanonicalField::Authors) {
            let _ = write!(markdown, "Authors: {authors}\n\n");
        }
        if let Some(published) = non_empty(record, CanonicalField::PublishedDate) {
            let _ = write!(markdown, "Published: {published}\n\n");
        }
        if let Some(doi) = non_empty(record, CanonicalField::DoiUrl) {
            let _ = write!(markdown, "DOI: [{doi}]({doi})\n\n");
        }
        if let Some(link) = non_empty(record, CanonicalField::Link) {
            let _ = write!(markdown, "Link: [{link}]({link})\n\n");
        }
        if let Some(abstract_text) = non_empty(record, CanonicalField::Abstract) {
            let _ = write!(markdown, "Abstract:\n{abstract_text}\n\n");
        }
        for (name, value) in record.passthrough_fields().filter(|(_, value)| !value.is_empty()) {
            let _ = write!(markdown, "{name}: {value}\n\n");
        }
        markdown.push_str("---\n\n");
    }

    markdown
}

fn non_empty(record: &ArticleRecord, field: CanonicalField) -> Option<&str> {
    record.get(field).filter(|value| !value.is_empty())
}

/// Builds `<base>_articles_<YYYYmmdd_HHMMSS>.<ext>`.
///
/// The base is the journal name lowercased with every run of
/// non-alphanumeric characters replaced by `_`, or the feed id when no
/// journal name is given.
#[must_use]
pub fn report_file_name(
    feed_id: &str,
    journal: Option<&str>,
    format: ReportFormat,
    generated_at: DateTime<Local>,
) -> String {
    let base = journal
        .map(|name| UNSAFE_NAME_RE.replace_all(name.trim(), "_").to_lowercase())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| feed_id.to_string());
    format!(
        "{base}_articles_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Writes `content` to `dir/file_name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_report(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .with_context(|| format!("Cannot write report '{}'", path.display()))?;
    info!(path = %path.display(), "Report saved");
    Ok(path)
}
