//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use feedmap_core::report::ReportFormat;

/// Scan journal RSS/Atom feeds into canonical article reports.
///
/// Each feed's native tags are mapped onto canonical fields (title, authors,
/// abstract, published_date, doi_url, link) through a per-feed mapping file.
#[derive(Parser, Debug)]
#[command(name = "feedmap")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a feed, canonicalize its items and write a report
    Scan(ScanArgs),

    /// List the tags of a feed's first item with sample values
    Inspect(InspectArgs),

    /// Suggest a mapping for a feed and optionally save it
    Suggest(SuggestArgs),

    /// Inspect effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print effective configuration values
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Feed URL (http/https) or local file path
    pub source: String,

    /// Mapping entry to apply
    pub feed_id: String,

    /// Journal name used in the report file name
    #[arg(short, long)]
    pub journal: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// Directory to write the report to (default: config `output_dir` or "output")
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Mapping file (default: config `mapping_path` or column_mapping.json)
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    /// Drop records without a title and at least one other field
    #[arg(long)]
    pub skip_empty: bool,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Feed URL (http/https) or local file path
    pub source: String,
}

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Feed URL (http/https) or local file path
    pub source: String,

    /// Mapping entry the suggestion is written under
    #[arg(default_value = "your_feed")]
    pub feed_id: String,

    /// Save the mapping into the mapping file after refinement.
    /// A typed join delimiter is stored with its spaces, e.g. "; "
    #[arg(long)]
    pub update_json: bool,

    /// Save the suggestion as-is without prompting
    #[arg(short, long, requires = "update_json")]
    pub yes: bool,

    /// Mapping file (default: config `mapping_path` or column_mapping.json)
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_scan_parses_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["feedmap", "scan", "feed.xml", "nature"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        let Command::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.source, "feed.xml");
        assert_eq!(args.feed_id, "nature");
        assert_eq!(args.format, ReportFormat::Markdown);
        assert!(args.journal.is_none());
        assert!(args.mapping.is_none());
        assert!(!args.skip_empty);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_scan_all_flags() {
        let cli = Cli::try_parse_from([
            "feedmap",
            "scan",
            "https://example.org/rss",
            "cell",
            "--journal",
            "Cell Reports",
            "--format",
            "json",
            "--output-dir",
            "out",
            "--mapping",
            "m.json",
            "--skip-empty",
            "--dry-run",
        ])
        .unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.journal.as_deref(), Some("Cell Reports"));
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.mapping, Some(PathBuf::from("m.json")));
        assert!(args.skip_empty);
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_format_accepts_md_and_markdown() {
        for value in ["md", "markdown"] {
            let cli =
                Cli::try_parse_from(["feedmap", "scan", "f.xml", "x", "-f", value]).unwrap();
            let Command::Scan(args) = cli.command else {
                panic!("expected scan command");
            };
            assert_eq!(args.format, ReportFormat::Markdown);
        }
    }

    #[test]
    fn test_cli_invalid_format_rejected() {
        let err = Cli::try_parse_from(["feedmap", "scan", "f.xml", "x", "-f", "html"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_scan_requires_feed_id() {
        let err = Cli::try_parse_from(["feedmap", "scan", "feed.xml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_suggest_default_feed_id() {
        let cli = Cli::try_parse_from(["feedmap", "suggest", "feed.xml"]).unwrap();
        let Command::Suggest(args) = cli.command else {
            panic!("expected suggest command");
        };
        assert_eq!(args.feed_id, "your_feed");
        assert!(!args.update_json);
        assert!(!args.yes);
    }

    #[test]
    fn test_cli_suggest_yes_requires_update_json() {
        let err = Cli::try_parse_from(["feedmap", "suggest", "feed.xml", "n", "--yes"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli =
            Cli::try_parse_from(["feedmap", "suggest", "feed.xml", "n", "--update-json", "-y"])
                .unwrap();
        let Command::Suggest(args) = cli.command else {
            panic!("expected suggest command");
        };
        assert!(args.update_json && args.yes);
    }

    #[test]
    fn test_cli_verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["feedmap", "inspect", "feed.xml", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["feedmap", "--quiet", "inspect", "feed.xml"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_config_show() {
        let cli = Cli::try_parse_from(["feedmap", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Show
            }
        ));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Cli::try_parse_from(["feedmap", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Cli::try_parse_from(["feedmap", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["feedmap"]).is_err());
    }
}
