//! Inspect command: list the tags of a feed's first item.

use std::io::{self, Write};

use anyhow::Result;
use feedmap_core::suggest::{discover_tags, write_discovered_tags};

use super::{Settings, load_feed};
use crate::cli::InspectArgs;

pub async fn run_inspect_command(args: &InspectArgs, settings: &Settings) -> Result<()> {
    let feed = load_feed(&args.source, settings).await?;
    // parse_feed rejects feeds without items
    let Some(first) = feed.first_item() else {
        return Ok(());
    };

    let tags = discover_tags(first);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Feed root: <{}>, {} items", feed.root, feed.len())?;
    write_discovered_tags(&mut stdout, &tags)?;
    Ok(())
}
