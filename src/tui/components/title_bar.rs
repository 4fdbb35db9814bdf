// Title bar component
//
// Renders the project header: name, description, feedback count badge and
// average rating badge.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.dashboard.summary();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", summary.project.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", summary.count_badge()),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", summary.rating_badge()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
    ];
    if let Some(description) = &summary.project.description {
        spans.push(Span::styled(
            format!("  {}", description),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title_top(Line::from(" feedlens ").right_aligned()),
    );

    f.render_widget(title, area);
}
