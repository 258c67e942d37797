//! CLI entry point for the feedmap tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;

use app_config::{VerbositySetting, load_default_file_config};
use cli::{Cli, Command, ConfigCommand};
use commands::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();
    let loaded_config = load_default_file_config()?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let config_verbosity = loaded_config
        .config
        .as_ref()
        .and_then(|config| config.verbosity);
    let default_level = default_log_level(cli.quiet, cli.verbose, config_verbosity);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?cli, "CLI arguments parsed");

    let settings = Settings::from_file_config(&loaded_config.file_config());
    debug!(?settings, config_loaded = loaded_config.loaded_from_file, "Settings resolved");

    match &cli.command {
        Command::Scan(args) => commands::run_scan_command(args, &settings).await,
        Command::Inspect(args) => commands::run_inspect_command(args, &settings).await,
        Command::Suggest(args) => commands::run_suggest_command(args, &settings).await,
        Command::Config {
            command: ConfigCommand::Show,
        } => commands::run_config_show_command(&loaded_config, &settings),
    }
}

fn default_log_level(quiet: bool, verbose: u8, config: Option<VerbositySetting>) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config.map_or("info", VerbositySetting::filter_level),
        1 => "debug",
        _ => "trace",
    }
}
