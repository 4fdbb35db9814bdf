// Table view state and the actions that move it
//
// `ViewState` is plain data owned by whoever renders the table. Transitions
// live on `TableEngine::apply`, which needs the data to clamp pagination.

use super::column::FilterValue;
use serde::Serialize;

/// Largest page size a transition will accept
pub const MAX_PAGE_SIZE: usize = 1000;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse "asc"/"desc" (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Header marker shown next to a sorted column
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort; single column only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSort {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Sort, filters and pagination of one rendered table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub sort: Option<ColumnSort>,
    pub filters: Vec<ColumnFilter>,
    pub pagination: Pagination,
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pagination: Pagination {
                page_index: 0,
                page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            },
            ..Self::default()
        }
    }

    pub fn sort_direction(&self, column: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|s| s.column == column)
            .map(|s| s.direction)
    }

    pub fn filter_for(&self, column: &str) -> Option<&FilterValue> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| &f.value)
    }
}

/// User-driven transitions of the view state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set or clear (`None`) the sort on a column
    SetSort(String, Option<SortDirection>),
    /// Header click: none -> asc -> desc -> none
    ToggleSort(String),
    /// Replace the column's filter; a no-op filter removes it
    SetFilter(String, FilterValue),
    ClearFilter(String),
    ResetFilters,
    SetPageIndex(usize),
    SetPageSize(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
}
