use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, Renderer, Scene, TextHAlign, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub fills_drawn: usize,
    pub strokes_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo painter for composed scenes.
///
/// Renders either offscreen into its own image surface through
/// `Renderer::render`, or in place on a host context through
/// `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;

        apply_color(context, scene.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &scene.grid_lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke grid line", err))?;
            stats.lines_drawn += 1;
        }

        for fill in &scene.fills {
            append_vertex_path(context, &fill.points);
            context.close_path();
            apply_color(context, fill.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill area", err))?;
            stats.fills_drawn += 1;
        }

        for stroke in &scene.strokes {
            append_vertex_path(context, &stroke.points);
            apply_color(context, stroke.color);
            context.set_line_width(stroke.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke series", err))?;
            stats.strokes_drawn += 1;
        }

        for marker in &scene.markers {
            append_rect_path(context, *marker);
            apply_color(context, marker.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.markers_drawn += 1;
        }

        for text in &scene.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        self.render_with_context(context, scene)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_vertex_path(context: &Context, points: &[Vertex]) {
    context.new_path();
    if let Some((first, rest)) = points.split_first() {
        context.move_to(first.x, first.y);
        for point in rest {
            context.line_to(point.x, point.y);
        }
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
