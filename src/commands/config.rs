//! Config command handlers: show effective configuration.

use anyhow::Result;
use feedmap_core::mapping::WriteMode;

use super::Settings;
use crate::app_config::{LoadedConfig, VerbositySetting};

pub fn run_config_show_command(loaded_config: &LoadedConfig, settings: &Settings) -> Result<()> {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    let verbosity = loaded_config
        .config
        .as_ref()
        .and_then(|config| config.verbosity)
        .unwrap_or(VerbositySetting::Default);

    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("mapping_path = {}", settings.mapping_path.display());
    println!("output_dir = {}", settings.output_dir.display());
    println!("verbosity = {}", verbosity.as_str());
    println!("http_timeout_secs = {}", settings.http_timeout_secs);
    println!(
        "atomic_writes = {}",
        settings.write_mode == WriteMode::AtomicRename
    );
    println!("skip_empty = {}", settings.skip_empty);

    Ok(())
}
