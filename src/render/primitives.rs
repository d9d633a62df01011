use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels, e.g. `0x1f77b4`.
    #[must_use]
    pub fn from_rgb_u32(rgb: u32) -> Self {
        let channel = |shift: u32| f64::from((rgb >> shift) & 0xff) / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Converts HSL (`hue` in degrees, saturation/lightness in 0..=1) to RGB.
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = hue.rem_euclid(360.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let second = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };
        let offset = lightness - chroma / 2.0;
        let channel = |value: f64| (value + offset).clamp(0.0, 1.0);
        Self::rgb(channel(r), channel(g), channel(b))
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// CSS hex notation (`#rrggbb`), alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Pixel-space vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn validate(self, what: &str) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{what} coordinates must be finite"
            )));
        }
        Ok(())
    }
}

/// Draw command for one straight segment (grid lines, axis rules).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        Vertex::new(self.x1, self.y1).validate("line")?;
        Vertex::new(self.x2, self.y2).validate("line")?;
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for an open stroked path through `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<Vertex>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        for point in &self.points {
            point.validate("polyline")?;
        }
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for a filled, explicitly closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub points: Vec<Vertex>,
    pub fill_color: Color,
}

impl PolygonPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 3 {
            return Err(ChartError::InvalidData(
                "polygon needs at least three points".to_owned(),
            ));
        }
        for point in &self.points {
            point.validate("polygon")?;
        }
        self.fill_color.validate()
    }
}

/// Draw command for an axis-aligned rectangle (markers, legend swatches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        Vertex::new(self.x, self.y).validate("rect")?;
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        Vertex::new(self.x, self.y).validate("text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn validate_stroke_width(stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{Color, PolylinePrimitive, Vertex};

    #[test]
    fn hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert_eq!(red.to_hex(), "#ff0000");
        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert_eq!(green.to_hex(), "#00ff00");
        let blue = Color::from_hsl(240.0, 1.0, 0.5);
        assert_eq!(blue.to_hex(), "#0000ff");
        let wrapped = Color::from_hsl(360.0 + 240.0, 1.0, 0.5);
        assert_eq!(wrapped, blue);
    }

    #[test]
    fn hsl_stays_in_gamut() {
        for step in 0..36 {
            let color = Color::from_hsl(f64::from(step) * 10.0, 0.7, 0.5);
            assert!(color.validate().is_ok(), "hue {}", step * 10);
        }
        let grey = Color::from_hsl(200.0, 0.0, 0.5);
        assert_abs_diff_eq!(grey.red, 0.5);
        assert_abs_diff_eq!(grey.blue, 0.5);
    }

    #[test]
    fn hex_round_trip_through_u32() {
        assert_eq!(Color::from_rgb_u32(0x1f77b4).to_hex(), "#1f77b4");
    }

    #[test]
    fn polyline_rejects_single_point() {
        let line = PolylinePrimitive {
            points: vec![Vertex::new(1.0, 1.0)],
            stroke_width: 1.0,
            color: Color::rgb(0.0, 0.0, 0.0),
        };
        assert!(line.validate().is_err());
    }
}
