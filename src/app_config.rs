//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// File configuration for feedmap defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Mapping file used when `--mapping` is not given.
    pub mapping_path: Option<PathBuf>,
    /// Directory reports are written to.
    pub output_dir: Option<PathBuf>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Feed HTTP request timeout in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Write the mapping file through a temp file and rename.
    pub atomic_writes: Option<bool>,
    /// Drop records without a title and at least one other field.
    pub skip_empty: Option<bool>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.http_timeout_secs
            && !(1..=600).contains(&timeout)
        {
            bail!("Invalid config value for `http_timeout_secs`: {timeout}. Expected range: 1..=600");
        }
        validate_non_empty_path("mapping_path", self.mapping_path.as_deref())?;
        validate_non_empty_path("output_dir", self.output_dir.as_deref())?;
        Ok(())
    }
}

fn validate_non_empty_path(field: &str, value: Option<&Path>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.as_os_str().is_empty() {
        bail!("Invalid config value for `{field}`: path must not be empty");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Tracing filter level used when neither `RUST_LOG` nor a flag is set.
    #[must_use]
    pub fn filter_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

impl LoadedConfig {
    /// The parsed config, or defaults when no file was loaded.
    #[must_use]
    pub fn file_config(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/feedmap/config.toml`
/// 2. `$HOME/.config/feedmap/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    let non_empty = |name: &str| env::var_os(name).filter(|value| !value.is_empty());
    let base = non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("feedmap").join("config.toml"))
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(existing) if existing.exists() => Some(load_file_config(existing)?),
        _ => None,
    };
    Ok(LoadedConfig {
        loaded_from_file: config.is_some(),
        path,
        config,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

const CONFIG_KEYS: [&str; 6] = [
    "mapping_path",
    "output_dir",
    "verbosity",
    "http_timeout_secs",
    "atomic_writes",
    "skip_empty",
];

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_number, raw_line) in (1..).zip(raw.lines()) {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .with_context(|| {
                format!("Invalid config syntax on line {line_number}: expected key = value")
            })?;
        if !CONFIG_KEYS.contains(&key) {
            bail!("Unknown configuration key: '{key}' on line {line_number}");
        }
        apply_setting(&mut cfg, key, value)
            .with_context(|| format!("Invalid `{key}` value on line {line_number}"))?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn apply_setting(cfg: &mut FileConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "mapping_path" => cfg.mapping_path = Some(quoted(value)?.into()),
        "output_dir" => cfg.output_dir = Some(quoted(value)?.into()),
        "verbosity" => cfg.verbosity = Some(quoted(value)?.parse::<VerbositySetting>()?),
        "http_timeout_secs" => {
            cfg.http_timeout_secs = Some(value.parse::<u64>().context("Expected a non-negative integer")?);
        }
        "atomic_writes" => cfg.atomic_writes = Some(boolean(value)?),
        "skip_empty" => cfg.skip_empty = Some(boolean(value)?),
        other => bail!("Unknown configuration key: '{other}'"),
    }
    Ok(())
}

/// Cuts a `#` comment that is not inside a double-quoted string.
fn strip_inline_comment(line: &str) -> &str {
    let mut quotes = 0_usize;
    line.char_indices()
        .find(|&(_, ch)| {
            if ch == '"' {
                quotes += 1;
            }
            ch == '#' && quotes % 2 == 0
        })
        .map_or(line, |(index, _)| &line[..index])
}

fn quoted(value: &str) -> Result<&str> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .context("Expected double-quoted string")
}

fn boolean(value: &str) -> Result<bool> {
    value.parse::<bool>().context("Expected 'true' or 'false'")
}

impl std::str::FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        [Self::Default, Self::Verbose, Self::Quiet, Self::Debug]
            .into_iter()
            .find(|setting| setting.as_str() == value)
            .with_context(|| {
                format!("Unknown verbosity '{value}'; expected one of: default, verbose, quiet, debug")
            })
    }
}
