// TUI application state
//
// This module manages the state of the dashboard: the loaded project, the
// table view state, the current selection, the hovered chart point and the
// viewport derived from the terminal size.

use super::clipboard::copy_to_clipboard;
use super::components::Toast;
use crate::config::TuiConfig;
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use feedlens::table::{Action, FilterValue, Page};
use feedlens::{ChartSpec, Dashboard, Feedback, Viewport};
use tracing::{debug, warn};

/// Whether keys drive the table or edit a filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the filter of one column
    Filter { column: &'static str, buffer: String },
}

/// Main application state for the TUI
pub struct App {
    pub dashboard: Dashboard,

    /// Sort, filters and pagination of the table
    pub view: feedlens::ViewState,

    /// Column under the cursor (header navigation)
    pub selected_column: usize,

    /// Row under the cursor, relative to the visible page
    pub selected_row: usize,

    /// Chart point whose tooltip is shown
    pub hovered: Option<usize>,

    pub input: InputMode,

    /// Terminal size scaled to layout units
    pub viewport: Viewport,

    cell_width: f64,
    cell_height: f64,

    /// Log buffer for the status bar
    pub log_buffer: LogBuffer,

    pub toast: Option<Toast>,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, log_buffer: LogBuffer, tui: &TuiConfig) -> Self {
        let view = dashboard.initial_view_state();
        Self {
            dashboard,
            view,
            selected_column: 0,
            selected_row: 0,
            hovered: None,
            input: InputMode::Normal,
            viewport: Viewport::new(0.0, 0.0),
            cell_width: tui.cell_width,
            cell_height: tui.cell_height,
            log_buffer,
            toast: None,
            should_quit: false,
        }
    }

    // === Geometry ===

    /// Feed a terminal size (in cells) into the layout policy
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(
            f64::from(cols) * self.cell_width,
            f64::from(rows) * self.cell_height,
        );
        debug!(
            "Viewport {}x{} ({}x{} cells)",
            self.viewport.width, self.viewport.height, cols, rows
        );
    }

    pub fn chart(&self) -> ChartSpec {
        self.dashboard.chart(self.viewport)
    }

    /// Terminal rows the chart should take for the current viewport
    pub fn chart_rows(&self) -> u16 {
        let height = self.dashboard.chart_layout(self.viewport).height;
        (height / self.cell_height).round().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    // === Table ===

    pub fn page(&self) -> Page<'_, Feedback> {
        self.dashboard.table().page(&self.view)
    }

    /// Run one table transition and keep the cursor on the page
    pub fn dispatch(&mut self, action: Action) {
        debug!("Table action {:?}", action);
        self.view = self.dashboard.table().apply(&self.view, action);
        self.clamp_row();
    }

    fn clamp_row(&mut self) {
        let rows = self.page().rows.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    fn column_count(&self) -> usize {
        self.dashboard.table().columns().len()
    }

    pub fn selected_column_id(&self) -> Option<&'static str> {
        self.dashboard
            .table()
            .columns()
            .get(self.selected_column)
            .map(|c| c.id)
    }

    pub fn next_column(&mut self) {
        if self.selected_column + 1 < self.column_count() {
            self.selected_column += 1;
        }
    }

    pub fn prev_column(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    pub fn next_row(&mut self) {
        self.selected_row += 1;
        self.clamp_row();
    }

    pub fn prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn toggle_sort(&mut self) {
        if let Some(column) = self.selected_column_id() {
            self.dispatch(Action::ToggleSort(column.to_string()));
        }
    }

    pub fn clear_filter(&mut self) {
        if let Some(column) = self.selected_column_id() {
            self.dispatch(Action::ClearFilter(column.to_string()));
        }
    }

    /// Step through the configured page sizes
    pub fn cycle_page_size(&mut self, forward: bool) {
        let current = self.view.pagination.page_size;
        let options = &self.dashboard.table_config().page_size_options;
        let next = if forward {
            options.iter().copied().find(|&size| size > current)
        } else {
            options.iter().rev().copied().find(|&size| size < current)
        };
        if let Some(size) = next {
            self.dispatch(Action::SetPageSize(size));
        }
    }

    // === Filter input ===

    /// Open the filter editor for the selected column, prefilled
    pub fn start_filter(&mut self) {
        let table = self.dashboard.table();
        let Some(column) = table.columns().get(self.selected_column) else {
            return;
        };
        if !column.can_filter {
            self.toast = Some(Toast::warning(format!("{} cannot be filtered", column.header)));
            return;
        }

        let buffer = match self.view.filter_for(column.id) {
            Some(FilterValue::Text { value }) => value.clone(),
            Some(FilterValue::Range { min, max }) => {
                let bound = |b: &Option<f64>| b.map(|v| v.to_string()).unwrap_or_default();
                if min.is_some() && min == max {
                    bound(min)
                } else {
                    format!("{}..{}", bound(min), bound(max))
                }
            }
            None => String::new(),
        };
        self.input = InputMode::Filter {
            column: column.id,
            buffer,
        };
    }

    pub fn filter_push(&mut self, c: char) {
        if let InputMode::Filter { buffer, .. } = &mut self.input {
            buffer.push(c);
        }
    }

    pub fn filter_pop(&mut self) {
        if let InputMode::Filter { buffer, .. } = &mut self.input {
            buffer.pop();
        }
    }

    pub fn cancel_filter(&mut self) {
        self.input = InputMode::Normal;
    }

    /// Apply the edited filter; bad numeric input keeps the editor open
    pub fn submit_filter(&mut self) {
        let InputMode::Filter { column, buffer } = &self.input else {
            return;
        };
        let (column, buffer) = (*column, buffer.clone());
        let Some(kind) = self.dashboard.table().column(column).map(|c| c.kind) else {
            self.input = InputMode::Normal;
            return;
        };

        match FilterValue::parse(kind, &buffer) {
            Some(value) => {
                self.input = InputMode::Normal;
                self.dispatch(Action::SetFilter(column.to_string(), value));
            }
            None => {
                self.toast = Some(Toast::warning("Use min..max, min.., ..max or a number"));
            }
        }
    }

    // === Chart ===

    /// Move the tooltip to the next point; wraps back to no tooltip
    pub fn hover_next(&mut self) {
        let points = self.dashboard.aggregation().series.len();
        self.hovered = match self.hovered {
            None if points > 0 => Some(0),
            Some(i) if i + 1 < points => Some(i + 1),
            _ => None,
        };
    }

    // === Clipboard ===

    /// Full message of the selected row, placeholder included
    pub fn selected_message(&self) -> Option<String> {
        self.page()
            .rows
            .get(self.selected_row)
            .map(|row| row.record.display_message().to_string())
    }

    pub fn copy_selected(&mut self) {
        let Some(message) = self.selected_message() else {
            return;
        };
        self.toast = Some(match copy_to_clipboard(&message) {
            Ok(()) => Toast::info("Copied message"),
            Err(e) => {
                warn!("Clipboard copy failed: {:#}", e);
                Toast::warning("Clipboard unavailable")
            }
        });
    }

    // === Status ===

    pub fn latest_log(&self) -> Option<LogEntry> {
        self.log_buffer.latest(LogLevel::Info)
    }

    /// Drop the toast once it has been shown long enough
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedlens::feedback::Rating;
    use feedlens::table::SortDirection;
    use feedlens::{LayoutConfig, ProjectContext, TableConfig};

    fn sample_app(count: usize) -> App {
        let records = (0..count)
            .map(|i| {
                Feedback::default()
                    .with_name(format!("User{:02}", i))
                    .with_rating(Rating::new((i % 6) as u8).unwrap())
                    .with_message(format!("message {}", i))
            })
            .collect();
        let dashboard = Dashboard::new(
            ProjectContext::named("Checkout"),
            records,
            &LayoutConfig::default(),
            &TableConfig::default(),
        );
        let mut app = App::new(dashboard, LogBuffer::new(), &TuiConfig::default());
        app.resize(160, 50);
        app
    }

    #[test]
    fn resize_scales_cells_to_viewport() {
        let mut app = sample_app(3);
        assert_eq!(app.viewport, Viewport::new(1280.0, 800.0));
        assert_eq!(app.chart_rows(), 28); // 450 / 16

        app.resize(60, 50);
        assert!(app.dashboard.chart_layout(app.viewport).is_mobile());
        assert_eq!(app.chart_rows(), 19); // 300 / 16
    }

    #[test]
    fn sort_toggles_on_selected_column() {
        let mut app = sample_app(5);
        app.next_column();
        app.next_column();
        assert_eq!(app.selected_column_id(), Some("rating"));

        app.toggle_sort();
        assert_eq!(app.view.sort_direction("rating"), Some(SortDirection::Asc));
        app.toggle_sort();
        assert_eq!(app.view.sort_direction("rating"), Some(SortDirection::Desc));
        app.toggle_sort();
        assert_eq!(app.view.sort_direction("rating"), None);
    }

    #[test]
    fn column_selection_stays_in_bounds() {
        let mut app = sample_app(1);
        app.prev_column();
        assert_eq!(app.selected_column, 0);
        for _ in 0..10 {
            app.next_column();
        }
        assert_eq!(app.selected_column_id(), Some("message"));
    }

    #[test]
    fn numeric_filter_round_trip_through_editor() {
        let mut app = sample_app(25);
        app.selected_column = 2;
        app.start_filter();
        for c in "4..5".chars() {
            app.filter_push(c);
        }
        app.submit_filter();
        assert_eq!(app.input, InputMode::Normal);
        assert_eq!(app.page().filtered_count, 8);

        // Reopening shows the active filter
        app.start_filter();
        assert_eq!(
            app.input,
            InputMode::Filter {
                column: "rating",
                buffer: "4..5".to_string()
            }
        );
    }

    #[test]
    fn invalid_range_keeps_editor_open() {
        let mut app = sample_app(5);
        app.selected_column = 2;
        app.start_filter();
        app.filter_push('x');
        app.submit_filter();
        assert!(matches!(app.input, InputMode::Filter { .. }));
        assert_eq!(
            app.toast.as_ref().map(|t| t.kind),
            Some(crate::tui::components::toast::ToastKind::Warning)
        );
        assert!(app.view.filters.is_empty());

        app.cancel_filter();
        assert_eq!(app.input, InputMode::Normal);
    }

    #[test]
    fn row_cursor_follows_shrinking_page() {
        let mut app = sample_app(25);
        for _ in 0..20 {
            app.next_row();
        }
        assert_eq!(app.selected_row, 9);

        app.dispatch(Action::SetFilter("message".into(), FilterValue::text("message 1")));
        // message 1, 10..19 -> 11 rows, page one still has 10
        assert_eq!(app.selected_row, 9);
        app.dispatch(Action::NextPage);
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected_message().as_deref(), Some("message 19"));
    }

    #[test]
    fn page_size_cycles_through_options() {
        let mut app = sample_app(25);
        app.cycle_page_size(true);
        assert_eq!(app.view.pagination.page_size, 20);
        app.cycle_page_size(false);
        app.cycle_page_size(false);
        assert_eq!(app.view.pagination.page_size, 10);
        for _ in 0..10 {
            app.cycle_page_size(true);
        }
        assert_eq!(app.view.pagination.page_size, 50);
    }

    #[test]
    fn hover_walks_series_then_clears() {
        let mut app = sample_app(2);
        app.hover_next();
        assert_eq!(app.hovered, Some(0));
        app.hover_next();
        assert_eq!(app.hovered, Some(1));
        app.hover_next();
        assert_eq!(app.hovered, None);

        let mut empty = sample_app(0);
        empty.hover_next();
        assert_eq!(empty.hovered, None);
    }
}
