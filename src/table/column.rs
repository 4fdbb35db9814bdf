// Column definitions for the table engine
//
// A column knows how to pull a comparable value out of a row (the accessor),
// how to show it in a cell (the formatter), and which interactions it
// allows. Columns are per-table metadata; nothing here is global.

use serde::Serialize;
use std::cmp::Ordering;

/// Declared value type of a column; decides which filters apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Numeric,
}

/// Raw value of one cell, used for sorting and filtering
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Empty,
        }
    }

    /// Ascending order; empty cells sort after every value
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Greater,
            (_, CellValue::Empty) => Ordering::Less,
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            // Mixed kinds only occur with a misbehaving accessor; numbers first
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A filter value as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterValue {
    /// Case-insensitive substring match
    Text { value: String },
    /// Inclusive range; an absent bound is open
    Range { min: Option<f64>, max: Option<f64> },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text {
            value: value.into(),
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range { min, max }
    }

    /// A filter that would let every row through
    pub fn is_noop(&self) -> bool {
        match self {
            FilterValue::Text { value } => value.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            FilterValue::Text { .. } => ColumnKind::Text,
            FilterValue::Range { .. } => ColumnKind::Numeric,
        }
    }

    /// Parse user input for a column of the given kind
    ///
    /// Numeric input accepts `min..max`, `min..`, `..max` or a single value
    /// (an exact match). Returns `None` when a numeric bound does not parse.
    pub fn parse(kind: ColumnKind, input: &str) -> Option<Self> {
        let input = input.trim();
        match kind {
            ColumnKind::Text => Some(FilterValue::text(input)),
            ColumnKind::Numeric => {
                let bound = |s: &str| -> Option<Option<f64>> {
                    let s = s.trim();
                    if s.is_empty() {
                        Some(None)
                    } else {
                        s.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
                    }
                };
                match input.split_once("..") {
                    Some((lo, hi)) => Some(FilterValue::range(bound(lo)?, bound(hi)?)),
                    None => {
                        let exact = bound(input)?;
                        Some(FilterValue::range(exact, exact))
                    }
                }
            }
        }
    }

    /// Whether a cell passes this filter
    pub fn matches(&self, cell: &CellValue) -> bool {
        match (self, cell) {
            (FilterValue::Text { value }, CellValue::Text(s)) => {
                s.to_lowercase().contains(&value.to_lowercase())
            }
            (FilterValue::Text { value }, CellValue::Number(n)) => {
                n.to_string().contains(&value.to_lowercase())
            }
            (FilterValue::Range { min, max }, CellValue::Number(n)) => {
                min.map_or(true, |lo| *n >= lo) && max.map_or(true, |hi| *n <= hi)
            }
            (FilterValue::Range { .. }, CellValue::Text(_)) => false,
            (_, CellValue::Empty) => false,
        }
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;
type Formatter<T> = Box<dyn Fn(usize, &T) -> String>;

/// Definition of one table column over rows of type `T`
pub struct ColumnDef<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
    pub can_sort: bool,
    pub can_filter: bool,
    accessor: Accessor<T>,
    formatter: Option<Formatter<T>>,
}

impl<T> ColumnDef<T> {
    /// Sortable and filterable by default
    pub fn new(
        id: &'static str,
        header: &'static str,
        kind: ColumnKind,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            id,
            header,
            kind,
            can_sort: true,
            can_filter: true,
            accessor: Box::new(accessor),
            formatter: None,
        }
    }

    /// Cell display; receives the row's position in the full data set
    pub fn with_formatter(mut self, formatter: impl Fn(usize, &T) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn sortable(mut self, can_sort: bool) -> Self {
        self.can_sort = can_sort;
        self
    }

    pub fn filterable(mut self, can_filter: bool) -> Self {
        self.can_filter = can_filter;
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn format(&self, position: usize, row: &T) -> String {
        match &self.formatter {
            Some(f) => f(position, row),
            None => match self.value(row) {
                CellValue::Number(n) => n.to_string(),
                CellValue::Text(s) => s,
                CellValue::Empty => String::new(),
            },
        }
    }

    /// Whether this column can apply the filter at all
    pub fn accepts(&self, filter: &FilterValue) -> bool {
        self.can_filter && filter.kind() == self.kind
    }
}

impl<T> std::fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("can_sort", &self.can_sort)
            .field("can_filter", &self.can_filter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_sort_last() {
        let values = [CellValue::Empty, CellValue::Number(2.0), CellValue::Number(1.0)];
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.compare(b));
        assert_eq!(
            sorted,
            vec![CellValue::Number(1.0), CellValue::Number(2.0), CellValue::Empty]
        );
    }

    #[test]
    fn text_compare_ignores_case() {
        let a = CellValue::Text("alice".into());
        let b = CellValue::Text("Bob".into());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn parse_numeric_ranges() {
        let k = ColumnKind::Numeric;
        assert_eq!(FilterValue::parse(k, "2..4"), Some(FilterValue::range(Some(2.0), Some(4.0))));
        assert_eq!(FilterValue::parse(k, "3.."), Some(FilterValue::range(Some(3.0), None)));
        assert_eq!(FilterValue::parse(k, "..1"), Some(FilterValue::range(None, Some(1.0))));
        assert_eq!(FilterValue::parse(k, " 5 "), Some(FilterValue::range(Some(5.0), Some(5.0))));
        assert_eq!(FilterValue::parse(k, "abc"), None);
        assert_eq!(FilterValue::parse(k, "1..x"), None);
        assert!(FilterValue::parse(k, "..").unwrap().is_noop());
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let f = FilterValue::text("ALI");
        assert!(f.matches(&CellValue::Text("Alice".into())));
        assert!(f.matches(&CellValue::Text("Natalie".into())));
        assert!(!f.matches(&CellValue::Text("Bob".into())));
        assert!(!f.matches(&CellValue::Empty));
    }

    #[test]
    fn range_filter_is_inclusive_and_skips_empty() {
        let f = FilterValue::range(Some(2.0), Some(4.0));
        assert!(f.matches(&CellValue::Number(2.0)));
        assert!(f.matches(&CellValue::Number(4.0)));
        assert!(!f.matches(&CellValue::Number(5.0)));
        assert!(!f.matches(&CellValue::Empty));
    }

    #[test]
    fn column_accepts_only_its_filter_kind() {
        let col: ColumnDef<u32> =
            ColumnDef::new("n", "N", ColumnKind::Numeric, |v| CellValue::Number(f64::from(*v)));
        assert!(col.accepts(&FilterValue::range(Some(1.0), None)));
        assert!(!col.accepts(&FilterValue::text("1")));
        assert!(!col.filterable(false).accepts(&FilterValue::range(Some(1.0), None)));
    }

    #[test]
    fn default_format_uses_accessor() {
        let col: ColumnDef<u32> =
            ColumnDef::new("n", "N", ColumnKind::Numeric, |v| CellValue::Number(f64::from(*v)));
        assert_eq!(col.format(0, &7), "7");
        let col = col.with_formatter(|pos, v| format!("#{} = {}", pos, v));
        assert_eq!(col.format(2, &7), "#2 = 7");
    }
}
