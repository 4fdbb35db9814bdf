//! Chart layout configuration: preset, breakpoints and height bounds
//!
//! The preset picks the base policy; any key set in `[chart]` then
//! overrides that preset's value.

use feedlens::layout::{HeightBounds, LayoutConfig, MobileVariant};
use serde::Deserialize;

/// Height bounds as loaded from `[chart.mobile]` / `[chart.desktop]`
#[derive(Debug, Deserialize, Default)]
pub struct FileHeightBounds {
    pub height_factor: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

impl FileHeightBounds {
    fn merge(self, defaults: HeightBounds) -> HeightBounds {
        let min_height = self.min_height.unwrap_or(defaults.min_height).max(0.0);
        HeightBounds {
            height_factor: self.height_factor.unwrap_or(defaults.height_factor).max(0.0),
            min_height,
            // A max below the min would make the clamp meaningless
            max_height: self.max_height.unwrap_or(defaults.max_height).max(min_height),
        }
    }
}

/// Chart settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileChart {
    pub preset: Option<String>,
    pub mobile_variant: Option<String>,
    pub mobile_breakpoint: Option<f64>,
    pub dense_threshold: Option<usize>,
    pub tick_label_limit: Option<usize>,
    pub mobile: Option<FileHeightBounds>,
    pub desktop: Option<FileHeightBounds>,
}

/// Build the layout policy: preset (env > file > "classic"), then file overrides
pub(super) fn layout_from_file(file: Option<FileChart>, preset_override: Option<String>) -> LayoutConfig {
    let file = file.unwrap_or_default();

    let preset = preset_override
        .or(file.preset)
        .unwrap_or_else(|| "classic".to_string());
    let defaults = LayoutConfig::preset(&preset);

    LayoutConfig {
        mobile_variant: file
            .mobile_variant
            .map(|s| MobileVariant::from_str(&s))
            .unwrap_or(defaults.mobile_variant),
        mobile_breakpoint: file
            .mobile_breakpoint
            .filter(|bp| *bp > 0.0)
            .unwrap_or(defaults.mobile_breakpoint),
        dense_threshold: file.dense_threshold.unwrap_or(defaults.dense_threshold),
        tick_label_limit: file
            .tick_label_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.tick_label_limit),
        mobile: file.mobile.unwrap_or_default().merge(defaults.mobile),
        desktop: file.desktop.unwrap_or_default().merge(defaults.desktop),
        ..defaults
    }
}
