//! Table and terminal settings

use feedlens::table::MAX_PAGE_SIZE;
use feedlens::TableConfig;
use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Table Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Table settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTable {
    pub page_size: Option<usize>,
    pub page_size_options: Option<Vec<usize>>,
    pub message_limit: Option<usize>,
}

/// Merge `[table]` with defaults; sizes are clamped to `1..=MAX_PAGE_SIZE`
pub(super) fn table_from_file(file: Option<FileTable>, page_size_override: Option<usize>) -> TableConfig {
    let file = file.unwrap_or_default();
    let defaults = TableConfig::default();

    let page_size = page_size_override
        .or(file.page_size)
        .unwrap_or(defaults.page_size)
        .clamp(1, MAX_PAGE_SIZE);

    let mut page_size_options: Vec<usize> = file
        .page_size_options
        .unwrap_or(defaults.page_size_options)
        .into_iter()
        .map(|n| n.clamp(1, MAX_PAGE_SIZE))
        .collect();
    // The active size is always selectable
    page_size_options.push(page_size);
    page_size_options.sort_unstable();
    page_size_options.dedup();

    TableConfig {
        page_size,
        page_size_options,
        message_limit: file
            .message_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.message_limit),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How terminal cells map to viewport units for the layout policy
#[derive(Debug, Clone, PartialEq)]
pub struct TuiConfig {
    /// Viewport units per terminal column
    pub cell_width: f64,
    /// Viewport units per terminal row
    pub cell_height: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

/// Terminal settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTui {
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
}

impl TuiConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTui>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            cell_width: file
                .cell_width
                .filter(|w| *w > 0.0)
                .unwrap_or(defaults.cell_width),
            cell_height: file
                .cell_height
                .filter(|h| *h > 0.0)
                .unwrap_or(defaults.cell_height),
        }
    }
}
