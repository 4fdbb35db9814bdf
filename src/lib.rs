//! feedlens - feedback presentation pipeline
//!
//! Turns an in-memory snapshot of feedback records into:
//! - summary statistics and a bounded chart series (`aggregate`)
//! - a chart variant and height for the current viewport (`layout`)
//! - a renderable chart description plus terminal rendering (`chart`)
//! - a sortable/filterable/paginated tabular view (`table`)
//!
//! Every stage is a synchronous pure function over borrowed data. Nothing
//! here mutates the caller's records or reads ambient global state; the
//! `shell` module composes the stages for one project.

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod feedback;
pub mod layout;
pub mod shell;
pub mod table;
pub mod util;

pub use aggregate::{aggregate, Aggregation, AverageRating, SeriesMode, SeriesPoint, Stats};
pub use error::{PipelineError, Result};
pub use feedback::{Feedback, FeedbackId, Snapshot};
pub use layout::{choose_variant, ChartLayout, ChartVariant, LayoutConfig, Viewport};
pub use chart::{ChartKind, ChartSpec};
pub use table::{Action, ColumnDef, FilterValue, Page, SortDirection, TableEngine, ViewState};
pub use shell::{Dashboard, ProjectContext, TableConfig};
