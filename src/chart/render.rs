// Chart panel - draws a ChartSpec into a ratatui frame
//
// Bar, line and area variants share one Chart widget so they all get the
// fixed 0-5 value axis. The pie variant has no axes: it is drawn as one
// proportional share bar per rating.

use super::{ChartKind, ChartSpec, PieSlice, Tooltip};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, LegendPosition, Paragraph, Wrap,
    },
    Frame,
};

const TITLE: &str = " Feedback Ratings Distribution ";
const SERIES_COLOR: Color = Color::Cyan;
const FILL_COLOR: Color = Color::Blue;
const HOVER_COLOR: Color = Color::Yellow;
const AXIS_COLOR: Color = Color::DarkGray;

/// Width of the share bar drawn for each pie slice
const SHARE_BAR_WIDTH: usize = 30;

/// Panel drawing the rating chart
pub struct ChartPanel;

impl ChartPanel {
    /// Render the chart; `hovered` selects the point whose tooltip is shown
    pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec, hovered: Option<usize>) {
        let points: Vec<(f64, f64)> = spec
            .series
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect();
        let highlight: Vec<(f64, f64)> = hovered
            .and_then(|i| points.get(i).copied())
            .into_iter()
            .collect();
        let legend = spec.legend.as_str();
        let series_style = Style::default().fg(SERIES_COLOR);

        match &spec.kind {
            // === Bar: one vertical bar per point ===
            ChartKind::Bar => {
                let bars = Dataset::default()
                    .name(legend)
                    .marker(symbols::Marker::HalfBlock)
                    .graph_type(GraphType::Bar)
                    .style(series_style)
                    .data(&points);
                Self::render_axes(frame, area, spec, vec![bars], &highlight);
            }
            // === Line: braille trend with a dot per point ===
            ChartKind::Line => {
                let line = Dataset::default()
                    .name(legend)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(series_style)
                    .data(&points);
                let dots = Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(series_style.add_modifier(Modifier::BOLD))
                    .data(&points);
                Self::render_axes(frame, area, spec, vec![line, dots], &highlight);
            }
            // === Area: filled region under a line, no dots ===
            ChartKind::Area => {
                let fill = Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Bar)
                    .style(Style::default().fg(FILL_COLOR))
                    .data(&points);
                let line = Dataset::default()
                    .name(legend)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(series_style)
                    .data(&points);
                Self::render_axes(frame, area, spec, vec![fill, line], &highlight);
            }
            ChartKind::Pie { slices } => Self::render_shares(frame, area, legend, slices),
        }

        if let Some(tooltip) = hovered.and_then(|i| spec.tooltip(i)) {
            Self::render_tooltip(frame, area, &tooltip);
        }
    }

    fn render_axes<'a>(
        frame: &mut Frame,
        area: Rect,
        spec: &'a ChartSpec,
        mut datasets: Vec<Dataset<'a>>,
        highlight: &'a [(f64, f64)],
    ) {
        if !highlight.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(HOVER_COLOR))
                    .data(highlight),
            );
        }

        // Points sit on integer x positions; keep a non-degenerate range
        let x_max = spec.series.len().saturating_sub(1).max(1) as f64;
        let inner_width = area.width.saturating_sub(2) as usize;

        let x_axis = Axis::default()
            .style(Style::default().fg(AXIS_COLOR))
            .bounds([0.0, x_max])
            .labels(Self::category_labels(&spec.tick_labels, inner_width));

        let y_axis = Axis::default()
            .title("Rating")
            .style(Style::default().fg(AXIS_COLOR))
            .bounds(spec.axis_domain)
            .labels(spec.ticks.iter().map(|t| t.to_string()).collect::<Vec<_>>());

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(TITLE))
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(Some(LegendPosition::TopRight));

        frame.render_widget(chart, area);
    }

    /// Category labels that fit the width: all of them, or just the ends
    fn category_labels(labels: &[String], width: usize) -> Vec<String> {
        match labels {
            [] => Vec::new(),
            [only] => vec![only.clone(), String::new()],
            [first, .., last] => {
                let needed: usize = labels.iter().map(|l| l.chars().count() + 1).sum();
                if needed <= width {
                    labels.to_vec()
                } else {
                    vec![first.clone(), last.clone()]
                }
            }
        }
    }

    fn render_shares(frame: &mut Frame, area: Rect, legend: &str, slices: &[PieSlice]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(TITLE)
            .title_bottom(format!(" {} ", legend));

        if slices.is_empty() {
            let placeholder = Paragraph::new("No ratings yet")
                .block(block)
                .style(Style::default().fg(AXIS_COLOR));
            frame.render_widget(placeholder, area);
            return;
        }

        let lines: Vec<Line> = slices
            .iter()
            .map(|slice| {
                let filled = (slice.share * SHARE_BAR_WIDTH as f64).round() as usize;
                Line::from(vec![
                    Span::styled(
                        format!("{:>7} ", slice.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        "█".repeat(filled),
                        Style::default().fg(Self::rating_color(slice.rating)),
                    ),
                    Span::styled(
                        "░".repeat(SHARE_BAR_WIDTH - filled.min(SHARE_BAR_WIDTH)),
                        Style::default().fg(AXIS_COLOR),
                    ),
                    Span::raw(format!(" {:>3.0}% ({})", slice.share * 100.0, slice.count)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_tooltip(frame: &mut Frame, area: Rect, tooltip: &Tooltip) {
        // Needs room for a bordered box inside the chart border
        if area.width < 16 || area.height < 7 {
            return;
        }

        let width = (area.width - 4).min(40);
        let height = 5;
        let popup = Rect {
            x: area.x + area.width - width - 2,
            y: area.y + 1,
            width,
            height,
        };

        let text = vec![
            Line::from(Span::styled(
                tooltip.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Rating: {}", format_rating(tooltip.value))),
            Line::from(Span::styled(
                tooltip.detail.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(HOVER_COLOR)),
            );

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }

    fn rating_color(rating: u8) -> Color {
        match rating {
            5 => Color::Green,
            4 => Color::LightGreen,
            3 => Color::Yellow,
            2 => Color::LightRed,
            _ => Color::Red,
        }
    }
}

/// Whole ratings print bare, bucket averages with two decimals
fn format_rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
