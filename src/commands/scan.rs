//! Scan command: feed -> canonical records -> report.

use anyhow::{Context, Result};
use chrono::Local;
use feedmap_core::canonical::{ArticleRecord, canonicalize};
use feedmap_core::mapping::resolve;
use feedmap_core::report::{report_file_name, save_report};
use tracing::{info, warn};

use super::{Settings, load_feed};
use crate::cli::ScanArgs;

pub async fn run_scan_command(args: &ScanArgs, settings: &Settings) -> Result<()> {
    // Mapping first: a missing entry should fail before any network traffic.
    let store = settings.mapping_store(args.mapping.as_deref());
    let rules = resolve(&args.feed_id, &store)?;

    let feed = load_feed(&args.source, settings).await?;
    let skip_empty = args.skip_empty || settings.skip_empty;

    let mut records: Vec<ArticleRecord> = canonicalize(feed.items.iter(), &rules).collect();
    let total = records.len();
    if skip_empty {
        records.retain(ArticleRecord::is_substantive);
        let dropped = total - records.len();
        if dropped > 0 {
            warn!(dropped, "Dropped records without a title and content");
        }
    }
    info!(total, kept = records.len(), feed_id = %args.feed_id, "Canonicalized feed");

    let generated_at = Local::now();
    let report = args.format.render(&records, generated_at)?;

    if args.dry_run {
        print!("{report}");
        return Ok(());
    }

    let output_dir = args.output_dir.as_deref().unwrap_or(settings.output_dir.as_path());
    let file_name = report_file_name(
        &args.feed_id,
        args.journal.as_deref(),
        args.format,
        generated_at,
    );
    let path = save_report(output_dir, &file_name, &report)
        .with_context(|| format!("Cannot save report for feed '{}'", args.feed_id))?;
    println!("Report saved to {} ({} articles)", path.display(), records.len());

    Ok(())
}
