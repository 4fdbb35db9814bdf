//! Configuration for the feedback dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/feedlens/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod chart;
mod observability;
mod serialization;
mod table;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use chart::FileChart;
pub use observability::{FileLogging, LoggingConfig};
pub use table::{FileTable, FileTui, TuiConfig};

use feedlens::{LayoutConfig, TableConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Chart layout policy (preset, breakpoints, height bounds)
    pub chart: LayoutConfig,

    /// Table paging and cell settings
    pub table: TableConfig,

    /// Terminal-to-viewport scaling
    pub tui: TuiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [chart] section
    pub chart: Option<FileChart>,

    /// Optional [table] section
    pub table: Option<FileTable>,

    /// Optional [tui] section
    pub tui: Option<FileTui>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// ~/.config/feedlens/config.toml, on every platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("feedlens").join("config.toml"))
    }

    /// Write the commented default template unless a file is already there
    ///
    /// Returns whether a new file was written.
    pub fn ensure_config_exists() -> anyhow::Result<bool> {
        let path = Self::config_path().context("Could not determine config path")?;
        write_template_if_missing(&path)
    }

    /// Effective configuration: env > config file > defaults
    ///
    /// A missing file means defaults; an unreadable or malformed one is an
    /// error rather than a silent fallback.
    pub fn load() -> anyhow::Result<Self> {
        let file = match Self::config_path() {
            Some(path) => read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file config with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Preset: env > file > default ("classic")
        let preset_override = env("FEEDLENS_PRESET");
        let chart = chart::layout_from_file(file.chart, preset_override);

        // Page size: env > file > default
        let page_size_override = env("FEEDLENS_PAGE_SIZE").and_then(|v| v.parse().ok());
        let table = table::table_from_file(file.table, page_size_override);

        let tui = TuiConfig::from_file(file.tui);

        // Log level: env > file > default
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("FEEDLENS_LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            chart,
            table,
            tui,
            logging,
        }
    }
}

fn write_template_if_missing(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
        }
    };
    toml::from_str(&contents).with_context(|| {
        format!(
            "Invalid config file {} (run `feedlens config --reset` to start over)",
            path.display()
        )
    })
}
