//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, VERSION};
use feedlens::LayoutConfig;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# feedlens {version} configuration

# ─────────────────────────────────────────────────────────────────────────────
# CHART LAYOUT
# ─────────────────────────────────────────────────────────────────────────────
# Preset: classic (line chart on narrow screens), compact (pie chart)
# FEEDLENS_PRESET overrides this value.
[chart]
preset = {preset}
# Explicit narrow-screen chart, overrides the preset: line, pie
{mobile_variant}# Viewport width below which the layout counts as mobile
mobile_breakpoint = {mobile_breakpoint:?}
# Series size above which an area chart replaces bars and lines
dense_threshold = {dense_threshold}
# Characters kept of category labels on narrow screens
tick_label_limit = {tick_label_limit}

# Chart height = min(max(viewport_height * height_factor, min_height), max_height)
[chart.mobile]
height_factor = {mobile_factor:?}
min_height = {mobile_min:?}
max_height = {mobile_max:?}

[chart.desktop]
height_factor = {desktop_factor:?}
min_height = {desktop_min:?}
max_height = {desktop_max:?}

# ─────────────────────────────────────────────────────────────────────────────
# TABLE
# ─────────────────────────────────────────────────────────────────────────────
# FEEDLENS_PAGE_SIZE overrides page_size.
[table]
page_size = {page_size}
page_size_options = {page_size_options:?}
# Characters of a message shown in its cell before "..."
message_limit = {message_limit}

# Terminal cells are scaled to viewport units for the layout policy
[tui]
cell_width = {cell_width:?}
cell_height = {cell_height:?}

# Logging configuration (RUST_LOG and FEEDLENS_LOG_LEVEL override)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            version = VERSION,
            preset = quoted(&self.chart.preset),
            // Only pinned when it differs from what the preset implies
            mobile_variant = if self.chart.mobile_variant
                == LayoutConfig::preset(&self.chart.preset).mobile_variant
            {
                format!("# mobile_variant = \"{}\"\n", self.chart.mobile_variant.as_str())
            } else {
                format!("mobile_variant = \"{}\"\n", self.chart.mobile_variant.as_str())
            },
            mobile_breakpoint = self.chart.mobile_breakpoint,
            dense_threshold = self.chart.dense_threshold,
            tick_label_limit = self.chart.tick_label_limit,
            mobile_factor = self.chart.mobile.height_factor,
            mobile_min = self.chart.mobile.min_height,
            mobile_max = self.chart.mobile.max_height,
            desktop_factor = self.chart.desktop.height_factor,
            desktop_min = self.chart.desktop.min_height,
            desktop_max = self.chart.desktop.max_height,
            page_size = self.table.page_size,
            page_size_options = self.table.page_size_options,
            message_limit = self.table.message_limit,
            cell_width = self.tui.cell_width,
            cell_height = self.tui.cell_height,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}

/// TOML string with backslashes and quotes escaped (Windows paths)
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_owned()).to_string()
}
