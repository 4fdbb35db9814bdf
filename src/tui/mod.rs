// TUI module - Terminal User Interface
//
// This module manages the terminal dashboard using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, resizes, timer ticks)
// - Mapping keys onto table actions and chart hover

pub mod app;
pub mod clipboard;
pub mod components;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, InputMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use feedlens::table::Action;
use feedlens::Dashboard;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

/// How long to wait for input before redrawing (toast expiry)
const TICK: Duration = Duration::from_millis(200);

/// Run the dashboard until the user quits
///
/// The terminal is restored even when the event loop fails.
pub fn run_tui(dashboard: Dashboard, log_buffer: LogBuffer, config: &Config) -> Result<()> {
    let mut app = App::new(dashboard, log_buffer, &config.tui);
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    app.resize(cols, rows);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Dashboard started for {}", app.dashboard.context().title());

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop: draw, then wait up to one tick for input
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        if event::poll(TICK).context("Failed to poll terminal events")? {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key_event) => handle_key_event(app, key_event),
                Event::Resize(cols, rows) => app.resize(cols, rows),
                _ => {}
            }
        }
        app.tick();

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: filter editor → global keys → table/chart keys
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Terminals that report releases would otherwise trigger twice
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: the filter editor captures all input when open
    if matches!(app.input, InputMode::Filter { .. }) {
        match key_event.code {
            KeyCode::Enter => app.submit_filter(),
            KeyCode::Esc => app.cancel_filter(),
            KeyCode::Backspace => app.filter_pop(),
            KeyCode::Char(c) => app.filter_push(c),
            _ => {}
        }
        return;
    }

    // Layer 2: global keys
    if key_event.code == KeyCode::Char('q')
        || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.should_quit = true;
        return;
    }

    // Layer 3: table and chart
    match key_event.code {
        KeyCode::Left | KeyCode::Char('h') => app.prev_column(),
        KeyCode::Right | KeyCode::Char('l') => app.next_column(),
        KeyCode::Up | KeyCode::Char('k') => app.prev_row(),
        KeyCode::Down | KeyCode::Char('j') => app.next_row(),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Char('x') => app.clear_filter(),
        KeyCode::Char('X') => app.dispatch(Action::ResetFilters),
        KeyCode::Char('n') | KeyCode::PageDown => app.dispatch(Action::NextPage),
        KeyCode::Char('p') | KeyCode::PageUp => app.dispatch(Action::PreviousPage),
        KeyCode::Char('g') | KeyCode::Home => app.dispatch(Action::FirstPage),
        KeyCode::Char('G') | KeyCode::End => app.dispatch(Action::LastPage),
        KeyCode::Char('+') | KeyCode::Char('=') => app.cycle_page_size(true),
        KeyCode::Char('-') => app.cycle_page_size(false),
        KeyCode::Char('t') => app.hover_next(),
        KeyCode::Esc => app.hovered = None,
        KeyCode::Char('y') => app.copy_selected(),
        _ => {}
    }
}
