use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_DATE_LABEL_TARGET, DEFAULT_VALUE_LABEL_COUNT, GapPolicy, MAX_LABEL_COUNT, PlotArea,
    PlotInsets, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Composer configuration.
///
/// Serializable so dashboards can ship chart setup as JSON; every field but
/// the viewport has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartComposerConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub insets: PlotInsets,
    #[serde(default = "default_value_label_count")]
    pub value_label_count: usize,
    #[serde(default = "default_date_label_target")]
    pub date_label_target: usize,
    #[serde(default)]
    pub gap_policy: GapPolicy,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_marker_size_px")]
    pub marker_size_px: f64,
    #[serde(default = "default_fill_single_series")]
    pub fill_single_series: bool,
    #[serde(default = "default_fill_alpha")]
    pub fill_alpha: f64,
    #[serde(default = "default_single_series_color")]
    pub single_series_color: Color,
    #[serde(default = "default_single_series_label")]
    pub single_series_label: String,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_grid_color")]
    pub grid_color: Color,
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,
}

impl ChartComposerConfig {
    /// Creates a config with dashboard defaults.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            insets: PlotInsets::default(),
            value_label_count: default_value_label_count(),
            date_label_target: default_date_label_target(),
            gap_policy: GapPolicy::default(),
            stroke_width: default_stroke_width(),
            font_size_px: default_font_size_px(),
            marker_size_px: default_marker_size_px(),
            fill_single_series: default_fill_single_series(),
            fill_alpha: default_fill_alpha(),
            single_series_color: default_single_series_color(),
            single_series_label: default_single_series_label(),
            background_color: default_background_color(),
            text_color: default_text_color(),
            grid_color: default_grid_color(),
            placeholder_text: default_placeholder_text(),
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: PlotInsets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    #[must_use]
    pub fn with_label_counts(mut self, value_label_count: usize, date_label_target: usize) -> Self {
        self.value_label_count = value_label_count;
        self.date_label_target = date_label_target;
        self
    }

    #[must_use]
    pub fn with_single_series_fill(mut self, enabled: bool) -> Self {
        self.fill_single_series = enabled;
        self
    }

    #[must_use]
    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Checks the config and returns the plot rectangle it describes.
    pub fn validate(&self) -> ChartResult<PlotArea> {
        let area = PlotArea::from_viewport(self.viewport, self.insets)?;

        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("font_size_px", self.font_size_px),
            ("marker_size_px", self.marker_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, count) in [
            ("value_label_count", self.value_label_count),
            ("date_label_target", self.date_label_target),
        ] {
            if count > MAX_LABEL_COUNT {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be <= {MAX_LABEL_COUNT}"
                )));
            }
        }
        if !self.fill_alpha.is_finite() || !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(ChartError::InvalidData(
                "`fill_alpha` must be finite and in [0, 1]".to_owned(),
            ));
        }
        if self.placeholder_text.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "placeholder text must not be empty".to_owned(),
            ));
        }
        self.single_series_color.validate()?;
        self.background_color.validate()?;
        self.text_color.validate()?;
        self.grid_color.validate()?;

        Ok(area)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse composer config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize composer config: {e}"))
        })
    }
}

fn default_value_label_count() -> usize {
    DEFAULT_VALUE_LABEL_COUNT
}

fn default_date_label_target() -> usize {
    DEFAULT_DATE_LABEL_TARGET
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_font_size_px() -> f64 {
    11.0
}

fn default_marker_size_px() -> f64 {
    4.0
}

fn default_fill_single_series() -> bool {
    true
}

fn default_fill_alpha() -> f64 {
    0.15
}

fn default_single_series_color() -> Color {
    Color::from_rgb_u32(0x3b82f6)
}

fn default_single_series_label() -> String {
    "Portfolio Value".to_owned()
}

fn default_background_color() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_text_color() -> Color {
    Color::from_rgb_u32(0x4b5563)
}

fn default_grid_color() -> Color {
    Color::from_rgb_u32(0xe5e7eb)
}

fn default_placeholder_text() -> String {
    "No valid data to display".to_owned()
}
