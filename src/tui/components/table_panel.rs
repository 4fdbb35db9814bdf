// Table panel component
//
// Draws the visible page of the feedback table. Headers carry the sort
// arrow and a filter marker; the selected column header is reversed and
// the pager line sits in the bottom border.

use crate::tui::app::App;
use feedlens::table::{ColumnKind, HeaderMeta};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Marker appended to headers with an active filter
const FILTER_MARKER: &str = "⧩";

/// Header label with sort and filter markers
pub fn header_label(meta: &HeaderMeta) -> String {
    let mut label = meta.header.to_string();
    if let Some(direction) = meta.sort {
        label.push(' ');
        label.push_str(direction.arrow());
    }
    if meta.filter.is_some() {
        label.push(' ');
        label.push_str(FILTER_MARKER);
    }
    label
}

fn column_width(meta: &HeaderMeta) -> Constraint {
    match (meta.id, meta.kind) {
        (_, ColumnKind::Numeric) => Constraint::Length(10),
        ("userName", _) => Constraint::Percentage(18),
        ("userEmail", _) => Constraint::Percentage(24),
        _ => Constraint::Min(20),
    }
}

/// Render the table page
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let page = app.page();

    let header = Row::new(page.headers.iter().enumerate().map(|(i, meta)| {
        let style = if i == app.selected_column {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(header_label(meta)).style(style)
    }))
    .style(Style::default().fg(Color::Cyan));

    let rows: Vec<Row> = if page.rows.is_empty() {
        vec![Row::new(vec![Cell::from("No results.")])
            .style(Style::default().fg(Color::DarkGray))]
    } else {
        page.rows
            .iter()
            .map(|row| Row::new(row.cells.iter().map(|c| Cell::from(c.as_str()))))
            .collect()
    };

    let widths: Vec<Constraint> = page.headers.iter().map(column_width).collect();

    let pager = format!(
        " Page {} of {} · {} of {} rows · {} per page {}{}",
        page.page_index + 1,
        page.page_count,
        page.filtered_count,
        page.total_count,
        page.page_size,
        if page.can_previous { "◀" } else { " " },
        if page.can_next { "▶ " } else { "  " },
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Feedback ")
                .title_bottom(Line::from(pager).right_aligned()),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let selected = (!page.rows.is_empty()).then_some(app.selected_row);
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}
