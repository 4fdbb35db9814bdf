// CLI module - command-line argument parsing and handlers
//
// Provides subcommands:
// - view: Interactive terminal dashboard for a feedback snapshot
// - summary: Headless stats and chart description
// - page: Headless sorted/filtered/paginated table page
// - config --show|--path|--reset|--edit|--update: Configuration management

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use feedlens::feedback::parse_snapshot;
use feedlens::table::{Action, FilterValue, SortDirection};
use feedlens::{Dashboard, Viewport};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// feedlens - Feedback ratings dashboard
#[derive(Parser)]
#[command(name = "feedlens")]
#[command(version = VERSION)]
#[command(about = "Charts and tables for project feedback", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard for a snapshot file
    View {
        /// JSON snapshot: a record array or {"project": .., "feedbacks": [..]}
        file: PathBuf,
    },

    /// Print summary badges and the chart description
    Summary {
        file: PathBuf,

        /// Viewport width used for the layout decision
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height used for the layout decision
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print one page of the feedback table
    Page {
        file: PathBuf,

        /// Sort column, optionally with direction: rating:desc
        #[arg(long)]
        sort: Option<String>,

        /// Column filter, repeatable: message=slow, rating=4..5
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot commands
// ─────────────────────────────────────────────────────────────────────────────

/// Read and validate a snapshot file into a dashboard
pub fn load_dashboard(path: &Path, config: &Config) -> Result<Dashboard> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = parse_snapshot(&json)
        .with_context(|| format!("Invalid feedback snapshot {}", path.display()))?;
    Ok(Dashboard::from_snapshot(snapshot, &config.chart, &config.table))
}

/// Summary badges plus the chart that would be drawn at `viewport`
pub fn render_summary(dashboard: &Dashboard, viewport: Viewport, json: bool) -> Result<String> {
    let summary = dashboard.summary();
    let layout = dashboard.chart_layout(viewport);
    let chart = dashboard.chart(viewport);

    if json {
        let value = serde_json::json!({
            "summary": summary,
            "layout": layout,
            "mode": dashboard.aggregation().mode,
            "chart": chart,
        });
        return serde_json::to_string_pretty(&value).context("Failed to serialize summary");
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", summary.project.title()));
    if let Some(description) = &summary.project.description {
        out.push_str(&format!("{}\n", description));
    }
    out.push_str(&format!(
        "{} | {}\n\n",
        summary.count_badge(),
        summary.rating_badge()
    ));
    out.push_str(&format!(
        "Chart: {} ({:.0} tall, {}), {} points\n",
        chart.variant().as_str(),
        chart.height,
        if layout.is_mobile() { "mobile" } else { "desktop" },
        chart.series.len()
    ));
    out.push_str(&format!(
        "Axis: {}..{}, legend \"{}\"\n",
        chart.axis_domain[0], chart.axis_domain[1], chart.legend
    ));

    let width = chart
        .tick_labels
        .iter()
        .map(|l| unicode_width::UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);
    for (label, point) in chart.tick_labels.iter().zip(&chart.series) {
        let pad = width - unicode_width::UnicodeWidthStr::width(label.as_str());
        out.push_str(&format!(
            "  {}{}  {:>5.2}  {}\n",
            label,
            " ".repeat(pad),
            point.value,
            point.detail
        ));
    }
    Ok(out)
}

/// Options for a headless table page
pub struct PageRequest<'a> {
    pub sort: Option<&'a str>,
    pub filters: &'a [String],
    /// 1-based
    pub page: usize,
    pub page_size: Option<usize>,
    pub json: bool,
}

/// Parse `column` or `column:asc|desc`
pub fn parse_sort(arg: &str) -> Result<(String, SortDirection)> {
    match arg.split_once(':') {
        None => Ok((arg.to_string(), SortDirection::Asc)),
        Some((column, dir)) => match SortDirection::from_str(dir) {
            Some(direction) => Ok((column.to_string(), direction)),
            None => bail!("Invalid sort direction '{}' (expected asc or desc)", dir),
        },
    }
}

/// Drive the table state machine from CLI flags and print the page
pub fn render_page(dashboard: &Dashboard, request: &PageRequest<'_>) -> Result<String> {
    let table = dashboard.table();
    let known = || {
        table
            .columns()
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut state = dashboard.initial_view_state();
    if let Some(size) = request.page_size {
        state = table.apply(&state, Action::SetPageSize(size));
    }

    if let Some(sort) = request.sort {
        let (column, direction) = parse_sort(sort)?;
        match table.column(&column) {
            Some(col) if col.can_sort => {}
            Some(_) => bail!("Column '{}' is not sortable", column),
            None => bail!("Unknown column '{}' (columns: {})", column, known()),
        }
        state = table.apply(&state, Action::SetSort(column, Some(direction)));
    }

    for filter in request.filters {
        let Some((column, input)) = filter.split_once('=') else {
            bail!("Invalid filter '{}' (expected COLUMN=VALUE)", filter);
        };
        let Some(col) = table.column(column) else {
            bail!("Unknown column '{}' (columns: {})", column, known());
        };
        if !col.can_filter {
            bail!("Column '{}' is not filterable", column);
        }
        let Some(value) = FilterValue::parse(col.kind, input) else {
            bail!(
                "Invalid range '{}' for {} (expected min..max, min.., ..max or a number)",
                input,
                column
            );
        };
        state = table.apply(&state, Action::SetFilter(column.to_string(), value));
    }

    state = table.apply(&state, Action::SetPageIndex(request.page.saturating_sub(1)));
    let page = table.page(&state);

    if request.json {
        return serde_json::to_string_pretty(&page).context("Failed to serialize page");
    }

    let mut out = String::new();
    let headers: Vec<String> = page
        .headers
        .iter()
        .map(|h| match h.sort {
            Some(direction) => format!("{} {}", h.header, direction.arrow()),
            None => h.header.to_string(),
        })
        .collect();
    out.push_str(&headers.join(" | "));
    out.push('\n');
    if page.rows.is_empty() {
        out.push_str("No results.\n");
    }
    for row in &page.rows {
        out.push_str(&row.cells.join(" | "));
        out.push('\n');
    }
    out.push_str(&format!(
        "\nPage {} of {} ({} of {} rows)\n",
        page.page_index + 1,
        page.page_count,
        page.filtered_count,
        page.total_count
    ));
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, edit: bool, update: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else if edit {
        handle_config_edit()
    } else if update {
        handle_config_update()
    } else {
        // No flag provided, show help
        println!("Usage: feedlens config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("[chart]");
    println!("preset = {:?}", config.chart.preset);
    println!("mobile_variant = {:?}", config.chart.mobile_variant.as_str());
    println!("mobile_breakpoint = {}", config.chart.mobile_breakpoint);
    println!("dense_threshold = {}", config.chart.dense_threshold);
    println!("tick_label_limit = {}", config.chart.tick_label_limit);
    println!("mobile = {:?}", config.chart.mobile);
    println!("desktop = {:?}", config.chart.desktop);
    println!();
    println!("[table]");
    println!("page_size = {}", config.table.page_size);
    println!("page_size_options = {:?}", config.table.page_size_options);
    println!("message_limit = {}", config.table.message_limit);
    println!();
    println!("[tui]");
    println!("cell_width = {}", config.tui.cell_width);
    println!("cell_height = {}", config.tui.cell_height);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Write the default config (using Config's single source of truth)
    Config::default()
        .save()
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if Config::ensure_config_exists()? {
        println!("Created new config file: {}", path.display());
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}'; set $EDITOR to your preferred editor",
            editor
        )
    })?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

fn handle_config_update() -> Result<()> {
    let path = config_path()?;

    if Config::ensure_config_exists()? {
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // Regenerate the template around the user's current values
    let existing = Config::load()?;

    // Backup existing
    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    existing
        .save()
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}
