// feedlens - Feedback ratings dashboard
//
// Loads a snapshot of a project's feedback records and presents it as
// summary badges, a rating chart that adapts to the terminal size, and a
// sortable/filterable/paginated table.
//
// Architecture:
// - Library (feedlens): record model, aggregation, layout policy, chart
//   description, table state machine, presentation shell
// - CLI (clap): interactive `view` plus headless `summary` and `page`
// - TUI (ratatui): synchronous crossterm event loop over the dashboard
// - Config/logging: TOML config file and tracing subscribers

mod cli;
mod config;
mod logging;
mod tui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, PageRequest};
use config::{Config, LoggingConfig};
use feedlens::Viewport;
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing
///
/// In TUI mode logs are captured to the buffer (prevents garbling the
/// display); headless commands write them to stderr so stdout stays clean
/// for output. File logging optionally adds a rotating JSON log.
///
/// Precedence: RUST_LOG env var > config file > default "info".
/// The returned guard must be kept alive so file logs flush.
fn init_tracing(
    logging: &LoggingConfig,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<WorkerGuard> {
    let default_filter = format!("feedlens={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (tui_layer, stderr_layer) = if tui_mode {
        (Some(TuiLogLayer::new(log_buffer.clone())), None)
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    // Set up file logging if enabled (non-blocking writer with rotation)
    let (file_layer, guard) = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                (None, None)
            }
            Ok(()) => {
                let file_appender = logging
                    .file_rotation
                    .appender(&logging.file_dir, &logging.file_prefix);

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Config management runs before anything reads the config file
    if let Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    } = command
    {
        return cli::handle_config(show, reset, edit, update, path);
    }

    // First run writes a commented template; the dashboard works without it
    if let Err(e) = Config::ensure_config_exists() {
        eprintln!("Warning: {:#}", e);
    }
    let config = Config::load()?;

    let log_buffer = LogBuffer::new();
    let tui_mode = matches!(command, Commands::View { .. });
    let _file_guard = init_tracing(&config.logging, tui_mode, &log_buffer);

    match command {
        Commands::View { file } => {
            let dashboard = cli::load_dashboard(&file, &config)?;
            tui::run_tui(dashboard, log_buffer, &config)?;
        }
        Commands::Summary {
            file,
            width,
            height,
            json,
        } => {
            let dashboard = cli::load_dashboard(&file, &config)?;
            print!(
                "{}",
                cli::render_summary(&dashboard, Viewport::new(width, height), json)?
            );
        }
        Commands::Page {
            file,
            sort,
            filters,
            page,
            page_size,
            json,
        } => {
            let dashboard = cli::load_dashboard(&file, &config)?;
            let request = PageRequest {
                sort: sort.as_deref(),
                filters: &filters,
                page,
                page_size,
                json,
            };
            print!("{}", cli::render_page(&dashboard, &request)?);
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
