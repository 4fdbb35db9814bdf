// UI rendering - screen layout for the dashboard
//
// Top to bottom: title bar, chart, table, status bar. The chart height comes
// from the layout policy (viewport units scaled back to terminal rows); the
// table always keeps at least a header and a few rows.

use super::app::App;
use super::components::{status_bar, table_panel, title_bar};
use feedlens::chart::ChartPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

const TITLE_ROWS: u16 = 3;
const STATUS_ROWS: u16 = 1;
/// Borders + header + three rows
const MIN_TABLE_ROWS: u16 = 6;
/// Below this the chart is dropped instead of squashed
const MIN_CHART_ROWS: u16 = 5;

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let spare = area
        .height
        .saturating_sub(TITLE_ROWS + STATUS_ROWS + MIN_TABLE_ROWS);
    let chart_rows = match app.chart_rows().min(spare) {
        rows if rows < MIN_CHART_ROWS => 0,
        rows => rows,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_ROWS),
            Constraint::Length(chart_rows),
            Constraint::Min(0),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(area);

    title_bar::render(f, chunks[0], app);
    if chart_rows > 0 {
        ChartPanel::render(f, chunks[1], &app.chart(), app.hovered);
    }
    table_panel::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    if let Some(toast) = &app.toast {
        toast.render(f, area);
    }
}
