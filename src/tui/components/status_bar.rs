// Status bar component
//
// Bottom line of the screen. While a filter is being edited it becomes the
// input prompt; otherwise it shows key hints and the latest log entry.

use crate::logging::LogLevel;
use crate::tui::app::{App, InputMode};
use feedlens::util::truncate_display;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS_FULL: &str =
    " ←→ column  ↑↓ row  s sort  / filter  x clear  X reset  n/p page  g/G first/last  +/- size  t tooltip  y copy  q quit";
const HINTS_SHORT: &str = " s sort  / filter  n/p page  t tip  q quit";

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if let InputMode::Filter { column, buffer } = &app.input {
        let header = app
            .dashboard
            .table()
            .column(column)
            .map_or(*column, |c| c.header);
        let prompt = Line::from(vec![
            Span::styled(
                format!(" Filter {}: ", header),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(buffer.as_str()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled(
                "  Enter apply · Esc cancel",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(prompt), area);
        return;
    }

    let hints = if area.width >= 120 { HINTS_FULL } else { HINTS_SHORT };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    if let Some(entry) = app.latest_log() {
        let width = chunks[1].width.saturating_sub(1) as usize;
        let line = truncate_display(&entry.status_line(), width);
        f.render_widget(
            Paragraph::new(line)
                .style(level_style(entry.level))
                .alignment(Alignment::Right),
            chunks[1],
        );
    }
}

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Gray),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}
