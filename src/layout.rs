//! Responsive layout policy for the rating chart.
//!
//! Single source of truth for the chart variant and height at a given
//! viewport - no magic numbers scattered in render code. Every threshold
//! and height bound lives in [`LayoutConfig`], and [`choose_variant`] is a
//! pure function of its inputs, so calling it again on an unchanged
//! viewport yields the same layout.

use serde::Serialize;
use tracing::trace;

/// Width below which the viewport counts as mobile
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 640.0;

/// Series size above which a filled trend replaces discrete marks
pub const DEFAULT_DENSE_THRESHOLD: usize = 100;

/// Characters kept of a category tick label on narrow viewports
pub const DEFAULT_TICK_LABEL_LIMIT: usize = 8;

/// Viewport dimensions as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f64, mobile_breakpoint: f64) -> Self {
        if width < mobile_breakpoint {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Chart kinds the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    Bar,
    Line,
    Area,
    Pie,
}

impl ChartVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartVariant::Bar => "bar",
            ChartVariant::Line => "line",
            ChartVariant::Area => "area",
            ChartVariant::Pie => "pie",
        }
    }
}

/// The two chart kinds allowed on mobile viewports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MobileVariant {
    /// Compact discrete trend
    #[default]
    Line,
    /// Share of each rating value
    Pie,
}

impl MobileVariant {
    /// Parse from config; unknown values fall back to line
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pie" => Self::Pie,
            _ => Self::Line,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Pie => "pie",
        }
    }
}

impl From<MobileVariant> for ChartVariant {
    fn from(v: MobileVariant) -> Self {
        match v {
            MobileVariant::Line => ChartVariant::Line,
            MobileVariant::Pie => ChartVariant::Pie,
        }
    }
}

/// Height rule: `min(max(viewport_height * height_factor, min_height), max_height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBounds {
    pub height_factor: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl HeightBounds {
    pub fn resolve(&self, viewport_height: f64) -> f64 {
        (viewport_height * self.height_factor)
            .max(self.min_height)
            .min(self.max_height)
    }
}

/// Layout policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Preset the config was derived from ("classic", "compact")
    pub preset: String,
    pub mobile_breakpoint: f64,
    pub dense_threshold: usize,
    pub mobile_variant: MobileVariant,
    pub mobile: HeightBounds,
    pub desktop: HeightBounds,
    pub tick_label_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl LayoutConfig {
    /// The "classic" preset - line chart on mobile
    pub fn classic() -> Self {
        Self {
            preset: "classic".to_string(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            dense_threshold: DEFAULT_DENSE_THRESHOLD,
            mobile_variant: MobileVariant::Line,
            // Fixed 300 on mobile
            mobile: HeightBounds {
                height_factor: 0.0,
                min_height: 300.0,
                max_height: 450.0,
            },
            // 60% of the viewport, capped at 450
            desktop: HeightBounds {
                height_factor: 0.6,
                min_height: 0.0,
                max_height: 450.0,
            },
            tick_label_limit: DEFAULT_TICK_LABEL_LIMIT,
        }
    }

    /// "Compact" preset - pie chart on mobile
    pub fn compact() -> Self {
        Self {
            preset: "compact".to_string(),
            mobile_variant: MobileVariant::Pie,
            ..Self::classic()
        }
    }

    /// Get preset by name
    pub fn preset(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "compact" => Self::compact(),
            _ => Self::classic(), // Default fallback
        }
    }

    pub fn bounds_for(&self, bp: Breakpoint) -> &HeightBounds {
        match bp {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Desktop => &self.desktop,
        }
    }
}

/// Chosen variant and geometry for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub variant: ChartVariant,
    pub height: f64,
    pub breakpoint: Breakpoint,
}

impl ChartLayout {
    pub fn is_mobile(&self) -> bool {
        self.breakpoint == Breakpoint::Mobile
    }
}

/// Pick the chart variant and height for a viewport and series size
///
/// First match wins:
/// 1. dense series -> area
/// 2. mobile width -> the configured mobile variant
/// 3. otherwise -> bar
pub fn choose_variant(viewport: Viewport, series_size: usize, config: &LayoutConfig) -> ChartLayout {
    let breakpoint = Breakpoint::from_width(viewport.width, config.mobile_breakpoint);

    let variant = if series_size > config.dense_threshold {
        ChartVariant::Area
    } else if breakpoint == Breakpoint::Mobile {
        config.mobile_variant.into()
    } else {
        ChartVariant::Bar
    };

    let height = config.bounds_for(breakpoint).resolve(viewport.height);

    trace!(
        "Chart layout: {}x{} with {} points -> {} ({:?}), height {}",
        viewport.width,
        viewport.height,
        series_size,
        variant.as_str(),
        breakpoint,
        height
    );

    ChartLayout {
        variant,
        height,
        breakpoint,
    }
}
