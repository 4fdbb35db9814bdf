// Chart module - renderable chart description and terminal rendering
//
// `ChartSpec` is the output boundary of the chart branch: a plain,
// serializable description any chart library could draw. `render` draws the
// same description into a ratatui frame.
//
// The value axis is the rating scale, so its domain and ticks are fixed
// rather than derived from the data.

pub mod render;

pub use render::ChartPanel;

use crate::aggregate::SeriesPoint;
use crate::layout::{ChartLayout, ChartVariant};
use crate::util::truncate_display;
use serde::Serialize;

/// Value axis domain (the rating scale)
pub const AXIS_DOMAIN: [f64; 2] = [0.0, 5.0];

/// Integer ticks on the value axis
pub const AXIS_TICKS: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// Series name shown in the legend
pub const LEGEND_LABEL: &str = "User Ratings";

/// One wedge of the pie variant: how many points carry a given rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub rating: u8,
    pub label: String,
    pub count: usize,
    /// Fraction of all points, `0.0..=1.0`
    pub share: f64,
}

/// Variant-specific payload, one case per chart kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie { slices: Vec<PieSlice> },
}

impl ChartKind {
    pub fn variant(&self) -> ChartVariant {
        match self {
            ChartKind::Bar => ChartVariant::Bar,
            ChartKind::Line => ChartVariant::Line,
            ChartKind::Area => ChartVariant::Area,
            ChartKind::Pie { .. } => ChartVariant::Pie,
        }
    }
}

/// Hover details for a single series point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub value: f64,
    pub detail: String,
}

/// Everything needed to draw the rating chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(flatten)]
    pub kind: ChartKind,
    pub series: Vec<SeriesPoint>,
    /// Category tick labels, truncated for display on narrow viewports
    pub tick_labels: Vec<String>,
    pub axis_domain: [f64; 2],
    pub ticks: [u8; 6],
    pub height: f64,
    pub legend: String,
}

impl ChartSpec {
    /// Build the chart description for a chosen layout
    ///
    /// Tick labels are cut to `tick_label_limit` columns on mobile layouts;
    /// the series keeps the full labels for tooltips.
    pub fn build(layout: &ChartLayout, series: Vec<SeriesPoint>, tick_label_limit: usize) -> Self {
        let tick_labels = series
            .iter()
            .map(|p| {
                if layout.is_mobile() {
                    truncate_display(&p.label, tick_label_limit)
                } else {
                    p.label.clone()
                }
            })
            .collect();

        let kind = match layout.variant {
            ChartVariant::Bar => ChartKind::Bar,
            ChartVariant::Line => ChartKind::Line,
            ChartVariant::Area => ChartKind::Area,
            ChartVariant::Pie => ChartKind::Pie {
                slices: pie_slices(&series),
            },
        };

        Self {
            kind,
            series,
            tick_labels,
            axis_domain: AXIS_DOMAIN,
            ticks: AXIS_TICKS,
            height: layout.height,
            legend: LEGEND_LABEL.to_string(),
        }
    }

    pub fn variant(&self) -> ChartVariant {
        self.kind.variant()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Tooltip for the hovered point, if the index is on the chart
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        self.series.get(index).map(|p| Tooltip {
            label: p.label.clone(),
            value: p.value,
            detail: p.detail.clone(),
        })
    }
}

/// Group points by rounded rating; slices are ordered from 5 down to 0
pub fn pie_slices(series: &[SeriesPoint]) -> Vec<PieSlice> {
    if series.is_empty() {
        return Vec::new();
    }

    let mut counts = [0usize; AXIS_TICKS.len()];
    for point in series {
        let bucket = point.value.round().clamp(AXIS_DOMAIN[0], AXIS_DOMAIN[1]) as usize;
        counts[bucket] += 1;
    }

    let total = series.len() as f64;
    counts
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, count)| **count > 0)
        .map(|(rating, count)| PieSlice {
            rating: rating as u8,
            label: if rating == 1 {
                "1 star".to_string()
            } else {
                format!("{} stars", rating)
            },
            count: *count,
            share: *count as f64 / total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{choose_variant, LayoutConfig, Viewport};

    fn point(label: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
            detail: format!("detail for {}", label),
        }
    }

    #[test]
    fn desktop_keeps_full_tick_labels() {
        let layout = choose_variant(Viewport::new(1280.0, 800.0), 1, &LayoutConfig::default());
        let spec = ChartSpec::build(&layout, vec![point("Bartholomew Smith", 4.0)], 8);
        assert_eq!(spec.tick_labels, vec!["Bartholomew Smith".to_string()]);
        assert_eq!(spec.variant(), ChartVariant::Bar);
    }

    #[test]
    fn mobile_truncates_tick_labels_only() {
        let layout = choose_variant(Viewport::new(360.0, 800.0), 1, &LayoutConfig::default());
        let spec = ChartSpec::build(&layout, vec![point("Bartholomew Smith", 4.0)], 8);
        assert_eq!(spec.tick_labels, vec!["Barthol…".to_string()]);
        // Series and tooltip keep the full label
        assert_eq!(spec.series[0].label, "Bartholomew Smith");
        assert_eq!(spec.tooltip(0).unwrap().label, "Bartholomew Smith");
    }

    #[test]
    fn axis_is_fixed_to_rating_scale() {
        let layout = choose_variant(Viewport::new(1280.0, 800.0), 0, &LayoutConfig::default());
        let spec = ChartSpec::build(&layout, vec![], 8);
        assert!(spec.is_empty());
        assert_eq!(spec.axis_domain, [0.0, 5.0]);
        assert_eq!(spec.ticks, [0, 1, 2, 3, 4, 5]);
        assert_eq!(spec.legend, "User Ratings");
        assert_eq!(spec.tooltip(0), None);
    }

    #[test]
    fn tooltip_carries_label_value_detail() {
        let layout = choose_variant(Viewport::new(1280.0, 800.0), 2, &LayoutConfig::default());
        let spec = ChartSpec::build(&layout, vec![point("a", 1.0), point("b", 3.5)], 8);
        let tip = spec.tooltip(1).unwrap();
        assert_eq!(tip.label, "b");
        assert_eq!(tip.value, 3.5);
        assert_eq!(tip.detail, "detail for b");
        assert!(spec.tooltip(2).is_none());
    }

    #[test]
    fn pie_slices_group_by_rounded_rating() {
        let series = vec![
            point("a", 5.0),
            point("b", 4.6),
            point("c", 1.0),
            point("d", 0.0),
        ];
        let slices = pie_slices(&series);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].rating, 5);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].share, 0.5);
        assert_eq!(slices[1].label, "1 star");
        assert_eq!(slices[2].label, "0 stars");
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn pie_variant_carries_slices() {
        let layout = choose_variant(Viewport::new(360.0, 800.0), 2, &LayoutConfig::compact());
        let spec = ChartSpec::build(&layout, vec![point("a", 3.0), point("b", 3.0)], 8);
        match &spec.kind {
            ChartKind::Pie { slices } => {
                assert_eq!(slices.len(), 1);
                assert_eq!(slices[0].share, 1.0);
            }
            other => panic!("expected pie, got {:?}", other),
        }
    }

    #[test]
    fn spec_serializes_with_kind_tag() {
        let layout = choose_variant(Viewport::new(1280.0, 800.0), 1, &LayoutConfig::default());
        let spec = ChartSpec::build(&layout, vec![point("a", 2.0)], 8);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["axisDomain"], serde_json::json!([0.0, 5.0]));
        assert_eq!(json["height"], 450.0);
        assert_eq!(json["series"][0]["label"], "a");
    }
}
