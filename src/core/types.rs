use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel gutters reserved around the plot for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 72.0,
            right: 16.0,
            top: 16.0,
            bottom: 28.0,
        }
    }
}

/// Pixel rectangle that unit plot coordinates are mapped into.
///
/// Unit `x = 0` is the left edge and unit `y = 0` is the top edge, so the
/// already-inverted unit `y` from path geometry maps without another flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_viewport(viewport: Viewport, insets: PlotInsets) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        for (name, value) in [
            ("left", insets.left),
            ("right", insets.right),
            ("top", insets.top),
            ("bottom", insets.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "plot inset `{name}` must be finite and >= 0"
                )));
            }
        }

        let width = f64::from(viewport.width) - insets.left - insets.right;
        let height = f64::from(viewport.height) - insets.top - insets.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot insets leave no drawable area".to_owned(),
            ));
        }

        Ok(Self {
            left: insets.left,
            top: insets.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn unit_x_to_pixel(self, unit_x: f64) -> f64 {
        self.left + unit_x * self.width
    }

    #[must_use]
    pub fn unit_y_to_pixel(self, unit_y: f64) -> f64 {
        self.top + unit_y * self.height
    }
}
