//! Suggest command: discover tags, propose a mapping, optionally refine and save it.

use std::io::{self, Write};

use anyhow::{Context, Result};
use feedmap_core::mapping::{MappingStore, persist};
use feedmap_core::suggest::{
    discover_tags, refine, suggest_mapping, suggestion_block, write_discovered_tags, write_guide,
};
use tracing::info;

use super::{Settings, load_feed};
use crate::cli::SuggestArgs;

pub async fn run_suggest_command(args: &SuggestArgs, settings: &Settings) -> Result<()> {
    let feed = load_feed(&args.source, settings).await?;
    let Some(first) = feed.first_item() else {
        return Ok(());
    };

    let discovered = discover_tags(first);
    let tag_names: Vec<&str> = discovered.iter().map(|tag| tag.name.as_str()).collect();
    let suggestion = suggest_mapping(&tag_names);
    let store = settings.mapping_store(args.mapping.as_deref());

    {
        let mut stdout = io::stdout().lock();
        write_discovered_tags(&mut stdout, &discovered)?;
        writeln!(
            stdout,
            "\nSuggested mapping for {}:\n",
            store.location().display()
        )?;
        writeln!(stdout, "{}", suggestion_block(&args.feed_id, &suggestion)?)?;
        write_guide(&mut stdout)?;
        stdout.flush()?;
    }

    let unmatched = suggestion.unmatched_fields();
    if !unmatched.is_empty() {
        info!(?unmatched, "Canonical fields without a matching tag");
    }

    if !args.update_json {
        return Ok(());
    }

    let rules = if args.yes {
        suggestion.to_rules()
    } else {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        refine(&suggestion, &mut stdin, &mut stdout)?
    };

    persist(&args.feed_id, &rules, &store).with_context(|| {
        format!(
            "Cannot save mapping for '{}' to '{}'",
            args.feed_id,
            store.location().display()
        )
    })?;
    println!("Updated mapping saved to {}", store.location().display());

    Ok(())
}
