use serde::{Deserialize, Serialize};

use crate::core::{IndexLabel, PlotArea, PlotGeometry, ValueLabel, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// Layout the composer chose for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartState {
    /// Nothing plottable; only the placeholder is drawn.
    Empty,
    /// One series supplied directly.
    SinglePlot,
    /// Comparison-set driven, one shared scale for every run.
    MultiPlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    /// `false` when the entry's series had no finite values and drew nothing.
    pub plottable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub message: String,
}

/// Unit-space geometry of one drawn series, kept for hosts that paint
/// without the pixel primitives (SVG viewBox, hit testing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSeries {
    pub label: String,
    pub color: Color,
    pub geometry: PlotGeometry,
}

/// Backend-agnostic drawable description of one chart.
///
/// Primitive lists are painted in field order: grid, fills, strokes,
/// markers, texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub state: ChartState,
    pub viewport: Viewport,
    pub plot_area: Option<PlotArea>,
    pub background: Color,
    pub grid_lines: Vec<LinePrimitive>,
    pub fills: Vec<PolygonPrimitive>,
    pub strokes: Vec<PolylinePrimitive>,
    pub markers: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub series: Vec<SceneSeries>,
    pub value_labels: Vec<ValueLabel>,
    pub index_labels: Vec<IndexLabel>,
    pub legend: Vec<LegendEntry>,
    pub placeholder: Option<Placeholder>,
    /// Axis slots where aligned runs disagree on the calendar date.
    #[serde(default)]
    pub calendar_mismatches: usize,
}

impl Scene {
    #[must_use]
    pub fn new(state: ChartState, viewport: Viewport, background: Color) -> Self {
        Self {
            state,
            viewport,
            plot_area: None,
            background,
            grid_lines: Vec::new(),
            fills: Vec::new(),
            strokes: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
            series: Vec::new(),
            value_labels: Vec::new(),
            index_labels: Vec::new(),
            legend: Vec::new(),
            placeholder: None,
            calendar_mismatches: 0,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, message: impl Into<String>) -> Self {
        self.placeholder = Some(Placeholder {
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.state == ChartState::Empty
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;

        for line in &self.grid_lines {
            line.validate()?;
        }
        for fill in &self.fills {
            fill.validate()?;
        }
        for stroke in &self.strokes {
            stroke.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for entry in &self.legend {
            entry.color.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.grid_lines.len()
            + self.fills.len()
            + self.strokes.len()
            + self.markers.len()
            + self.texts.len()
    }
}
