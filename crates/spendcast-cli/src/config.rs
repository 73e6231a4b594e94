//! CLI configuration
//!
//! Loaded from TOML, first match wins:
//! 1. `--config <FILE>`
//! 2. `<data_local_dir>/spendcast/config.toml`
//! 3. Built-in default (`config/spendcast.toml`)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Default config embedded at compile time
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendcast.toml");

const DEFAULT_MONTHS_AHEAD: usize = 3;

/// How reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {} (use table or json)", s)),
        }
    }
}

/// Resolved CLI settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub expenses: PathBuf,
    pub budgets: PathBuf,
    pub output: OutputFormat,
    pub months_ahead: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expenses: PathBuf::from("expenses.csv"),
            budgets: PathBuf::from("budgets.csv"),
            output: OutputFormat::Table,
            months_ahead: DEFAULT_MONTHS_AHEAD,
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendcast").join("config.toml"))
}

/// Load configuration (explicit path, then override location, then default)
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        debug!(path = %path.display(), "Using config file");
        return parse_config(&content);
    }

    if let Some(path) = default_config_path() {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            debug!(path = %path.display(), "Using config override");
            return parse_config(&content);
        }
    }

    parse_config(DEFAULT_CONFIG)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    data: Option<RawData>,
    output: Option<RawOutput>,
    projection: Option<RawProjection>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    expenses: Option<PathBuf>,
    budgets: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    months_ahead: Option<usize>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content).context("Invalid config TOML")?;

    let mut config = Config::default();

    if let Some(data) = raw.data {
        if let Some(expenses) = data.expenses {
            config.expenses = expenses;
        }
        if let Some(budgets) = data.budgets {
            config.budgets = budgets;
        }
    }

    if let Some(format) = raw.output.and_then(|o| o.format) {
        config.output = format.parse().map_err(anyhow::Error::msg)?;
    }

    if let Some(months) = raw.projection.and_then(|p| p.months_ahead) {
        config.months_ahead = months;
    }

    Ok(config)
}
