// Table engine - sort, filter and paginate rows without a UI
//
// The engine is a borrowed view over `(data, columns)`. Every page is derived
// in a fixed order: filters (AND across columns), then a stable sort, then
// the page slice. State changes go through `apply`, which returns a new
// `ViewState` with the page index already clamped to the filtered result.

pub mod column;
pub mod feedback_columns;
pub mod state;

pub use column::{CellValue, ColumnDef, ColumnKind, FilterValue};
pub use feedback_columns::feedback_columns;
pub use state::{
    Action, ColumnFilter, ColumnSort, Pagination, SortDirection, ViewState, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};

use serde::Serialize;
use tracing::{debug, trace};

/// Header metadata needed to draw an interactive column header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMeta {
    pub id: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
    pub can_sort: bool,
    pub can_filter: bool,
    pub sort: Option<SortDirection>,
    pub filter: Option<FilterValue>,
}

/// One visible row: position in the full data set plus formatted cells
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "")]
pub struct Row<'a, T> {
    pub index: usize,
    pub cells: Vec<String>,
    #[serde(skip)]
    pub record: &'a T,
}

/// The currently visible page and everything needed to render around it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Page<'a, T> {
    pub rows: Vec<Row<'a, T>>,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub sort: Option<ColumnSort>,
    pub filters: Vec<ColumnFilter>,
    pub headers: Vec<HeaderMeta>,
}

/// Number of pages for a row count; never below one
pub fn page_count(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}

pub struct TableEngine<'a, T> {
    data: &'a [T],
    columns: &'a [ColumnDef<T>],
}

impl<'a, T> TableEngine<'a, T> {
    pub fn new(data: &'a [T], columns: &'a [ColumnDef<T>]) -> Self {
        Self { data, columns }
    }

    pub fn columns(&self) -> &'a [ColumnDef<T>] {
        self.columns
    }

    pub fn column(&self, id: &str) -> Option<&'a ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn total_count(&self) -> usize {
        self.data.len()
    }

    /// Apply one action and return the clamped next state
    pub fn apply(&self, state: &ViewState, action: Action) -> ViewState {
        let mut next = state.clone();

        match action {
            Action::SetSort(column, direction) => match self.column(&column) {
                Some(col) if col.can_sort => {
                    next.sort = direction.map(|direction| ColumnSort { column, direction });
                }
                _ => trace!("Ignoring sort on non-sortable column {}", column),
            },
            Action::ToggleSort(column) => match self.column(&column) {
                Some(col) if col.can_sort => {
                    next.sort = match state.sort_direction(&column) {
                        None => Some(SortDirection::Asc),
                        Some(SortDirection::Asc) => Some(SortDirection::Desc),
                        Some(SortDirection::Desc) => None,
                    }
                    .map(|direction| ColumnSort { column, direction });
                }
                _ => trace!("Ignoring sort toggle on non-sortable column {}", column),
            },
            Action::SetFilter(column, value) => {
                next.filters.retain(|f| f.column != column);
                if !value.is_noop() {
                    next.filters.push(ColumnFilter { column, value });
                }
            }
            Action::ClearFilter(column) => next.filters.retain(|f| f.column != column),
            Action::ResetFilters => next.filters.clear(),
            Action::SetPageIndex(index) => next.pagination.page_index = index,
            Action::SetPageSize(size) => {
                let size = size.clamp(1, MAX_PAGE_SIZE);
                // Keep the first visible row in view; a stale index is clamped first
                let current = self.clamp(state.clone()).pagination;
                let first_row = current.page_index * current.page_size;
                next.pagination = Pagination {
                    page_index: first_row / size,
                    page_size: size,
                };
            }
            Action::FirstPage => next.pagination.page_index = 0,
            Action::PreviousPage => {
                next.pagination.page_index = state.pagination.page_index.saturating_sub(1)
            }
            Action::NextPage => {
                next.pagination.page_index = state.pagination.page_index.saturating_add(1)
            }
            // Clamping turns this into the last valid page
            Action::LastPage => next.pagination.page_index = usize::MAX,
        }

        self.clamp(next)
    }

    /// Bring a state in range for the current data
    ///
    /// Also used after the data changes underneath an existing state.
    pub fn clamp(&self, mut state: ViewState) -> ViewState {
        state.pagination.page_size = state.pagination.page_size.clamp(1, MAX_PAGE_SIZE);
        let pages = page_count(self.filtered_count(&state), state.pagination.page_size);
        if state.pagination.page_index >= pages {
            debug!(
                "Clamping page index {} to {} ({} pages)",
                state.pagination.page_index,
                pages - 1,
                pages
            );
            state.pagination.page_index = pages - 1;
        }
        state
    }

    pub fn filtered_count(&self, state: &ViewState) -> usize {
        self.filtered_indices(state).len()
    }

    /// Positions of the rows passing every applicable filter, in data order
    fn filtered_indices(&self, state: &ViewState) -> Vec<usize> {
        let active: Vec<(&ColumnDef<T>, &FilterValue)> = state
            .filters
            .iter()
            .filter_map(|f| match self.column(&f.column) {
                Some(col) if col.accepts(&f.value) && !f.value.is_noop() => Some((col, &f.value)),
                _ => {
                    trace!("Ignoring filter on column {}", f.column);
                    None
                }
            })
            .collect();

        (0..self.data.len())
            .filter(|&i| {
                active
                    .iter()
                    .all(|(col, value)| value.matches(&col.value(&self.data[i])))
            })
            .collect()
    }

    /// Filtered rows in display order
    fn ordered_indices(&self, state: &ViewState) -> Vec<usize> {
        let mut indices = self.filtered_indices(state);

        let sort_key = state
            .sort
            .as_ref()
            .and_then(|s| self.column(&s.column).filter(|c| c.can_sort).map(|c| (c, s.direction)));

        if let Some((col, direction)) = sort_key {
            let keys: Vec<CellValue> = self.data.iter().map(|row| col.value(row)).collect();
            // Stable: equal keys keep filtered order; empty cells stay last
            indices.sort_by(|&a, &b| {
                let (ka, kb) = (&keys[a], &keys[b]);
                match (ka, kb, direction) {
                    (CellValue::Empty, _, _) | (_, CellValue::Empty, _) => ka.compare(kb),
                    (_, _, SortDirection::Asc) => ka.compare(kb),
                    (_, _, SortDirection::Desc) => kb.compare(ka),
                }
            });
        }

        indices
    }

    /// Derive the visible page; the state is clamped first
    pub fn page(&self, state: &ViewState) -> Page<'a, T> {
        let state = self.clamp(state.clone());
        let ordered = self.ordered_indices(&state);
        let Pagination {
            page_index,
            page_size,
        } = state.pagination;
        let pages = page_count(ordered.len(), page_size);

        let rows = ordered
            .iter()
            .skip(page_index * page_size)
            .take(page_size)
            .map(|&index| {
                let record = &self.data[index];
                Row {
                    index,
                    cells: self.columns.iter().map(|c| c.format(index, record)).collect(),
                    record,
                }
            })
            .collect();

        let headers = self
            .columns
            .iter()
            .map(|c| HeaderMeta {
                id: c.id,
                header: c.header,
                kind: c.kind,
                can_sort: c.can_sort,
                can_filter: c.can_filter,
                sort: state.sort_direction(c.id),
                filter: state.filter_for(c.id).cloned(),
            })
            .collect();

        Page {
            rows,
            page_index,
            page_size,
            page_count: pages,
            filtered_count: ordered.len(),
            total_count: self.data.len(),
            can_previous: page_index > 0,
            can_next: page_index + 1 < pages,
            sort: state.sort,
            filters: state.filters,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: Option<&'static str>,
        score: Option<u8>,
    }

    fn item(name: &'static str, score: u8) -> Item {
        Item {
            name: Some(name),
            score: Some(score),
        }
    }

    fn columns() -> Vec<ColumnDef<Item>> {
        vec![
            ColumnDef::new("name", "Name", ColumnKind::Text, |r: &Item| {
                CellValue::text(r.name)
            }),
            ColumnDef::new("score", "Score", ColumnKind::Numeric, |r: &Item| {
                r.score
                    .map(|s| CellValue::Number(f64::from(s)))
                    .unwrap_or(CellValue::Empty)
            }),
            ColumnDef::new("fixed", "Fixed", ColumnKind::Text, |_: &Item| {
                CellValue::Text("x".into())
            })
            .sortable(false)
            .filterable(false),
        ]
    }

    fn numbered(n: usize) -> Vec<Item> {
        (0..n).map(|i| item("row", (i % 6) as u8)).collect()
    }

    fn names<T>(page: &Page<'_, T>) -> Vec<usize> {
        page.rows.iter().map(|r| r.index).collect()
    }

    #[test]
    fn page_count_scenario_clamps_index() {
        let data = numbered(25);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        let state = engine.apply(&ViewState::default(), Action::SetPageIndex(5));
        assert_eq!(state.pagination.page_index, 2);

        let page = engine.page(&state);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.rows.len(), 5);
        assert!(page.can_previous);
        assert!(!page.can_next);
    }

    #[test]
    fn empty_data_has_one_empty_page() {
        let data: Vec<Item> = vec![];
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::LastPage);
        assert_eq!(state.pagination.page_index, 0);
        let page = engine.page(&state);
        assert_eq!(page.page_count, 1);
        assert!(page.rows.is_empty());
        assert!(!page.can_next && !page.can_previous);
    }

    #[test]
    fn sort_cycle_returns_to_original_order() {
        let data = vec![item("b", 3), item("a", 5), item("c", 1)];
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let original = names(&engine.page(&ViewState::default()));

        let asc = engine.apply(&ViewState::default(), Action::ToggleSort("score".into()));
        assert_eq!(names(&engine.page(&asc)), vec![2, 0, 1]);

        let desc = engine.apply(&asc, Action::ToggleSort("score".into()));
        assert_eq!(names(&engine.page(&desc)), vec![1, 0, 2]);

        let none = engine.apply(&desc, Action::ToggleSort("score".into()));
        assert_eq!(none.sort, None);
        assert_eq!(names(&engine.page(&none)), original);
    }

    #[test]
    fn toggling_another_column_starts_ascending() {
        let data = vec![item("b", 3), item("a", 5)];
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::ToggleSort("score".into()));
        let state = engine.apply(&state, Action::ToggleSort("score".into()));
        let state = engine.apply(&state, Action::ToggleSort("name".into()));
        assert_eq!(
            state.sort,
            Some(ColumnSort {
                column: "name".into(),
                direction: SortDirection::Asc
            })
        );
        assert_eq!(state.sort_direction("score"), None);
    }

    #[test]
    fn non_sortable_column_is_a_noop() {
        let data = numbered(3);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::ToggleSort("fixed".into()));
        assert_eq!(state, ViewState::default());
        let state = engine.apply(
            &ViewState::default(),
            Action::SetSort("missing".into(), Some(SortDirection::Asc)),
        );
        assert_eq!(state.sort, None);
    }

    #[test]
    fn sort_is_stable_and_keeps_empty_last() {
        let data = vec![
            Item {
                name: Some("x"),
                score: None,
            },
            item("first", 2),
            item("second", 2),
            item("top", 4),
        ];
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        let desc = engine.apply(
            &ViewState::default(),
            Action::SetSort("score".into(), Some(SortDirection::Desc)),
        );
        assert_eq!(names(&engine.page(&desc)), vec![3, 1, 2, 0]);

        let asc = engine.apply(&desc, Action::SetSort("score".into(), Some(SortDirection::Asc)));
        assert_eq!(names(&engine.page(&asc)), vec![1, 2, 3, 0]);
    }

    #[test]
    fn filters_only_narrow() {
        let data: Vec<Item> = (0..40)
            .map(|i| item(if i % 3 == 0 { "Alice" } else { "Bob" }, (i % 6) as u8))
            .collect();
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        let base = ViewState::default();
        let by_name = engine.apply(&base, Action::SetFilter("name".into(), FilterValue::text("ali")));
        let both = engine.apply(
            &by_name,
            Action::SetFilter("score".into(), FilterValue::range(Some(3.0), None)),
        );

        let all = engine.filtered_count(&base);
        let one = engine.filtered_count(&by_name);
        let two = engine.filtered_count(&both);
        assert_eq!(all, 40);
        assert!(all >= one && one >= two);
        assert_eq!(one, 14);
        assert!(engine
            .page(&both)
            .rows
            .iter()
            .all(|r| r.record.name == Some("Alice") && r.record.score.unwrap() >= 3));
    }

    #[test]
    fn filter_shrinking_results_clamps_page() {
        let data: Vec<Item> = (0..30).map(|i| item(if i < 5 { "keep" } else { "drop" }, 1)).collect();
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        let state = engine.apply(&ViewState::default(), Action::LastPage);
        assert_eq!(state.pagination.page_index, 2);
        let state = engine.apply(&state, Action::SetFilter("name".into(), FilterValue::text("keep")));
        assert_eq!(state.pagination.page_index, 0);
        assert_eq!(engine.page(&state).rows.len(), 5);
    }

    #[test]
    fn mismatched_filters_are_ignored() {
        let data = numbered(12);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        // Text filter on a numeric column, range on a text column,
        // a non-filterable column and an unknown column
        let mut state = ViewState::default();
        for (col, value) in [
            ("score", FilterValue::text("zzz")),
            ("name", FilterValue::range(Some(100.0), None)),
            ("fixed", FilterValue::text("nope")),
            ("ghost", FilterValue::text("nope")),
        ] {
            state = engine.apply(&state, Action::SetFilter(col.into(), value));
        }
        assert_eq!(state.filters.len(), 4);
        assert_eq!(engine.filtered_count(&state), 12);
    }

    #[test]
    fn clearing_filters() {
        let data = numbered(12);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(
            &ViewState::default(),
            Action::SetFilter("score".into(), FilterValue::range(Some(5.0), None)),
        );
        assert_eq!(engine.filtered_count(&state), 2);

        let cleared = engine.apply(&state, Action::ClearFilter("score".into()));
        assert_eq!(engine.filtered_count(&cleared), 12);

        let reset = engine.apply(&state, Action::ResetFilters);
        assert!(reset.filters.is_empty());

        // An empty text filter removes the column's filter
        let state = engine.apply(&state, Action::SetFilter("name".into(), FilterValue::text("row")));
        let state = engine.apply(&state, Action::SetFilter("name".into(), FilterValue::text("")));
        assert_eq!(state.filters.len(), 1);
    }

    #[test]
    fn set_page_size_reclamps() {
        let data = numbered(25);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);

        for size in [1usize, 3, 7, 10, 20, 25, 50, 5000] {
            let state = engine.apply(&ViewState::default(), Action::LastPage);
            let state = engine.apply(&state, Action::SetPageSize(size));
            let n = state.pagination.page_size;
            assert!(n >= 1 && n <= MAX_PAGE_SIZE);
            assert!(state.pagination.page_index * n < 25, "size {}", size);
        }

        // First visible row (20) stays on screen
        let state = engine.apply(&ViewState::default(), Action::SetPageIndex(2));
        let state = engine.apply(&state, Action::SetPageSize(5));
        assert_eq!(state.pagination.page_index, 4);
        assert_eq!(engine.page(&state).rows[0].index, 20);

        let state = engine.apply(&ViewState::default(), Action::SetPageSize(0));
        assert_eq!(state.pagination.page_size, 1);
    }

    #[test]
    fn page_size_change_from_stale_index_is_clamped() {
        let data = numbered(25);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let stale = ViewState {
            pagination: Pagination {
                page_index: usize::MAX / 2,
                page_size: 10,
            },
            ..ViewState::default()
        };

        // Stale index resolves to the last page (rows 20..25), which sits on page 2 of 20
        let state = engine.apply(&stale, Action::SetPageSize(20));
        assert_eq!(state.pagination.page_size, 20);
        assert_eq!(state.pagination.page_index, 1);
        assert_eq!(names(&engine.page(&state)), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn page_size_change_on_empty_result_resets_to_first_page() {
        let data = numbered(25);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::LastPage);
        let state = engine.apply(&state, Action::SetFilter("name".into(), FilterValue::text("none")));
        let state = engine.apply(&state, Action::SetPageSize(3));
        assert_eq!(engine.filtered_count(&state), 0);
        assert_eq!(state.pagination.page_index, 0);
    }

    #[test]
    fn pager_navigation() {
        let data = numbered(25);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let s = ViewState::default();
        let s = engine.apply(&s, Action::PreviousPage);
        assert_eq!(s.pagination.page_index, 0);
        let s = engine.apply(&s, Action::NextPage);
        let s = engine.apply(&s, Action::NextPage);
        let s = engine.apply(&s, Action::NextPage);
        assert_eq!(s.pagination.page_index, 2);
        let s = engine.apply(&s, Action::FirstPage);
        assert_eq!(s.pagination.page_index, 0);
    }

    #[test]
    fn page_carries_header_metadata() {
        let data = numbered(3);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::ToggleSort("score".into()));
        let state = engine.apply(&state, Action::SetFilter("name".into(), FilterValue::text("r")));
        let page = engine.page(&state);

        assert_eq!(page.headers.len(), 3);
        assert_eq!(page.headers[1].sort, Some(SortDirection::Asc));
        assert_eq!(page.headers[0].filter, Some(FilterValue::text("r")));
        assert!(!page.headers[2].can_sort && !page.headers[2].can_filter);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.rows[0].cells[0], "row");
    }

    #[test]
    fn stale_state_is_clamped_against_new_data() {
        let big = numbered(50);
        let cols = columns();
        let state = TableEngine::new(&big, &cols).apply(&ViewState::default(), Action::LastPage);
        assert_eq!(state.pagination.page_index, 4);

        let small = numbered(12);
        let engine = TableEngine::new(&small, &cols);
        let page = engine.page(&state);
        assert_eq!(page.page_index, 1);
        assert_eq!(engine.clamp(state).pagination.page_index, 1);
    }

    #[test]
    fn page_derivation_is_deterministic() {
        let data = numbered(37);
        let cols = columns();
        let engine = TableEngine::new(&data, &cols);
        let state = engine.apply(&ViewState::default(), Action::ToggleSort("score".into()));
        assert_eq!(names(&engine.page(&state)), names(&engine.page(&state)));
    }
}
