//! Presentation shell
//!
//! Composes the pipeline for one project: the same immutable record
//! snapshot feeds the summary badges, the chart branch and the table
//! branch. The project is passed in as an explicit [`ProjectContext`]
//! instead of being read from any ambient session state.

use crate::aggregate::{aggregate, Aggregation, Stats};
use crate::chart::ChartSpec;
use crate::feedback::{Feedback, FeedbackId, Snapshot, MESSAGE_TRUNCATE_AT};
use crate::layout::{choose_variant, ChartLayout, LayoutConfig, Viewport};
use crate::table::{feedback_columns, ColumnDef, TableEngine, ViewState, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The project whose feedback is being shown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    #[serde(default)]
    pub id: Option<FeedbackId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProjectContext {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name for headers; falls back when the snapshot carried no project
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            "Feedback"
        } else {
            &self.name
        }
    }
}

/// Table settings the shell hands to the table branch
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub page_size: usize,
    /// Sizes offered by the page-size selector
    pub page_size_options: Vec<usize>,
    /// Characters of a message shown in its cell
    pub message_limit: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 30, 40, 50],
            message_limit: MESSAGE_TRUNCATE_AT,
        }
    }
}

/// Header badges for the project page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub project: ProjectContext,
    /// Every record, rated or not
    pub feedback_count: usize,
    pub stats: Stats,
}

impl Summary {
    pub fn count_badge(&self) -> String {
        format!("{} Feedbacks", self.feedback_count)
    }

    pub fn rating_badge(&self) -> String {
        format!("Avg Rating: {}", self.stats.average_rating)
    }
}

/// One project's feedback, ready to be drawn
pub struct Dashboard {
    context: ProjectContext,
    records: Vec<Feedback>,
    aggregation: Aggregation,
    layout: LayoutConfig,
    table: TableConfig,
    columns: Vec<ColumnDef<Feedback>>,
}

impl Dashboard {
    pub fn new(
        context: ProjectContext,
        records: Vec<Feedback>,
        layout: &LayoutConfig,
        table: &TableConfig,
    ) -> Self {
        let aggregation = aggregate(&records);
        info!(
            "Loaded {} feedback records for {} ({} rated)",
            records.len(),
            context.title(),
            aggregation.stats.count
        );
        Self {
            context,
            records,
            aggregation,
            layout: layout.clone(),
            table: table.clone(),
            columns: feedback_columns(table.message_limit),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, layout: &LayoutConfig, table: &TableConfig) -> Self {
        Self::new(
            snapshot.project.unwrap_or_default(),
            snapshot.feedbacks,
            layout,
            table,
        )
    }

    /// Swap in a fresh snapshot; callers clamp their view state afterwards
    pub fn refresh(&mut self, records: Vec<Feedback>) {
        self.aggregation = aggregate(&records);
        self.records = records;
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    pub fn records(&self) -> &[Feedback] {
        &self.records
    }

    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn table_config(&self) -> &TableConfig {
        &self.table
    }

    pub fn summary(&self) -> Summary {
        Summary {
            project: self.context.clone(),
            feedback_count: self.records.len(),
            stats: self.aggregation.stats,
        }
    }

    pub fn chart_layout(&self, viewport: Viewport) -> ChartLayout {
        choose_variant(viewport, self.aggregation.series.len(), &self.layout)
    }

    /// Chart description for the current viewport
    pub fn chart(&self, viewport: Viewport) -> ChartSpec {
        let layout = self.chart_layout(viewport);
        ChartSpec::build(
            &layout,
            self.aggregation.series.clone(),
            self.layout.tick_label_limit,
        )
    }

    /// Table over the same snapshot the chart uses
    pub fn table(&self) -> TableEngine<'_, Feedback> {
        TableEngine::new(&self.records, &self.columns)
    }

    pub fn initial_view_state(&self) -> ViewState {
        ViewState::with_page_size(self.table.page_size)
    }
}
