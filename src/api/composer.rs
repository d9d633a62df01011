use tracing::{debug, trace, warn};

use crate::comparison::{ComparisonSet, ComparisonSnapshot};
use crate::core::{
    IndexAxis, PlotArea, PlotGeometry, RangeMapper, Series, UnitVertex, build_plot_geometry,
    index_labels, value_labels,
};
use crate::error::{ChartError, ChartResult};
use crate::payload::BacktestPayload;
use crate::render::{
    ChartState, Color, LegendEntry, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, Scene, SceneSeries, TextHAlign, TextPrimitive, Vertex,
};

use super::{ChartComposerConfig, ComparisonTable};

const AXIS_LABEL_GAP_PX: f64 = 6.0;
const LEGEND_ROW_HEIGHT_PX: f64 = 16.0;
const LEGEND_SWATCH_PX: f64 = 10.0;

/// Comparison scene and table built from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub scene: Scene,
    pub table: ComparisonTable,
}

struct PlotEntry<'a> {
    label: &'a str,
    color: Color,
    series: &'a Series,
}

/// Turns payloads and comparison sets into drawable scenes.
///
/// Holds only configuration; every render recomputes geometry from its input.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartComposer {
    config: ChartComposerConfig,
    plot_area: PlotArea,
}

impl ChartComposer {
    pub fn new(config: ChartComposerConfig) -> ChartResult<Self> {
        let plot_area = config.validate()?;
        Ok(Self { config, plot_area })
    }

    #[must_use]
    pub fn config(&self) -> &ChartComposerConfig {
        &self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    /// Renders the equity curve of one backtest result.
    #[must_use]
    pub fn render_single(&self, payload: &BacktestPayload) -> Scene {
        self.render_series(&payload.series())
    }

    /// Renders one series directly (single-plot layout).
    #[must_use]
    pub fn render_series(&self, series: &Series) -> Scene {
        let entry = PlotEntry {
            label: &self.config.single_series_label,
            color: self.config.single_series_color,
            series,
        };
        self.compose(ChartState::SinglePlot, &[entry])
    }

    /// Renders every run of `set` on one shared scale.
    #[must_use]
    pub fn render_comparison(&self, set: &ComparisonSet) -> Scene {
        self.render_snapshot(&set.list())
    }

    #[must_use]
    pub fn render_snapshot(&self, snapshot: &ComparisonSnapshot<'_>) -> Scene {
        let entries: Vec<PlotEntry<'_>> = snapshot
            .iter()
            .map(|run| PlotEntry {
                label: run.label(),
                color: run.color(),
                series: run.series(),
            })
            .collect();
        self.compose(ChartState::MultiPlot, &entries)
    }

    /// Renders the comparison chart and table from a single snapshot.
    #[must_use]
    pub fn render_comparison_view(&self, set: &ComparisonSet) -> ComparisonView {
        let snapshot = set.list();
        ComparisonView {
            scene: self.render_snapshot(&snapshot),
            table: ComparisonTable::from_snapshot(&snapshot),
        }
    }

    fn compose(&self, state: ChartState, entries: &[PlotEntry<'_>]) -> Scene {
        if entries.is_empty() {
            debug!(?state, "nothing to plot, rendering placeholder");
            return self.placeholder_scene();
        }

        let series: Vec<&Series> = entries.iter().map(|entry| entry.series).collect();
        let mapper = match RangeMapper::pooled(series.iter().copied()) {
            Ok(mapper) => mapper,
            Err(ChartError::NoPlottableData) => {
                warn!(
                    ?state,
                    series = entries.len(),
                    "no finite values in any series, rendering placeholder"
                );
                return self.placeholder_scene();
            }
            Err(err) => {
                warn!(error = %err, "range mapping failed, rendering placeholder");
                return self.placeholder_scene();
            }
        };

        let axis = IndexAxis::from_series(&series);
        let mismatches = if state == ChartState::MultiPlot {
            axis.calendar_mismatches(&series)
        } else {
            0
        };
        if mismatches > 0 {
            warn!(
                mismatches,
                slots = axis.len(),
                "comparison runs are aligned by index but disagree on dates"
            );
        }

        let geometries = self.project_all(&series, &mapper, axis.len());

        let mut scene = Scene::new(state, self.config.viewport, self.config.background_color);
        scene.plot_area = Some(self.plot_area);
        scene.calendar_mismatches = mismatches;
        scene.value_labels = value_labels(&mapper, self.config.value_label_count);
        scene.index_labels = index_labels(&axis, self.config.date_label_target);
        self.push_axes(&mut scene);

        for (entry, geometry) in entries.iter().zip(geometries) {
            let plottable = !geometry.is_empty();
            if !plottable {
                warn!(label = entry.label, "series has no finite values, skipped");
            }
            trace!(
                label = entry.label,
                points = geometry.points.len(),
                subpaths = geometry.path.stroke.len(),
                "projected series"
            );

            if state == ChartState::SinglePlot && self.config.fill_single_series {
                let fill_color = entry.color.with_alpha(self.config.fill_alpha);
                for polygon in &geometry.path.fill {
                    scene.fills.push(PolygonPrimitive {
                        points: self.to_pixels(polygon),
                        fill_color,
                    });
                }
            }
            self.push_stroke(&mut scene, &geometry, entry.color);

            scene.legend.push(LegendEntry {
                label: entry.label.to_owned(),
                color: entry.color,
                plottable,
            });
            scene.series.push(SceneSeries {
                label: entry.label.to_owned(),
                color: entry.color,
                geometry,
            });
        }

        if state == ChartState::MultiPlot {
            self.push_legend(&mut scene);
        }

        debug!(
            ?state,
            series = scene.series.len(),
            slots = axis.len(),
            min = mapper.min(),
            max = mapper.max(),
            primitives = scene.primitive_count(),
            "composed scene"
        );
        scene
    }

    #[cfg(feature = "parallel-projection")]
    fn project_all(
        &self,
        series: &[&Series],
        mapper: &RangeMapper,
        axis_len: usize,
    ) -> Vec<PlotGeometry> {
        use rayon::prelude::*;

        let gap_policy = self.config.gap_policy;
        series
            .par_iter()
            .map(|s| build_plot_geometry(s, mapper, axis_len, gap_policy))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    fn project_all(
        &self,
        series: &[&Series],
        mapper: &RangeMapper,
        axis_len: usize,
    ) -> Vec<PlotGeometry> {
        let gap_policy = self.config.gap_policy;
        series
            .iter()
            .map(|s| build_plot_geometry(s, mapper, axis_len, gap_policy))
            .collect()
    }

    fn placeholder_scene(&self) -> Scene {
        let config = &self.config;
        let mut scene = Scene::new(ChartState::Empty, config.viewport, config.background_color)
            .with_placeholder(config.placeholder_text.clone());
        scene.texts.push(TextPrimitive::new(
            config.placeholder_text.clone(),
            f64::from(config.viewport.width) / 2.0,
            (f64::from(config.viewport.height) - config.font_size_px) / 2.0,
            config.font_size_px,
            config.text_color,
            TextHAlign::Center,
        ));
        scene
    }

    fn push_axes(&self, scene: &mut Scene) {
        let area = self.plot_area;
        let config = &self.config;

        for label in &scene.value_labels {
            let y = area.unit_y_to_pixel(label.y);
            scene.grid_lines.push(LinePrimitive::new(
                area.left,
                y,
                area.right(),
                y,
                1.0,
                config.grid_color,
            ));
            scene.texts.push(TextPrimitive::new(
                label.text.clone(),
                area.left - AXIS_LABEL_GAP_PX,
                y - config.font_size_px / 2.0,
                config.font_size_px,
                config.text_color,
                TextHAlign::Right,
            ));
        }

        for label in &scene.index_labels {
            scene.texts.push(TextPrimitive::new(
                label.text.clone(),
                area.unit_x_to_pixel(label.x),
                area.bottom() + AXIS_LABEL_GAP_PX,
                config.font_size_px,
                config.text_color,
                TextHAlign::Center,
            ));
        }
    }

    fn push_stroke(&self, scene: &mut Scene, geometry: &PlotGeometry, color: Color) {
        let marker = self.config.marker_size_px;
        for run in &geometry.path.stroke {
            if let [only] = run.as_slice() {
                // Lone samples have no segment to stroke; mark them instead.
                let center = self.to_pixel(*only);
                scene.markers.push(
                    RectPrimitive::new(
                        center.x - marker / 2.0,
                        center.y - marker / 2.0,
                        marker,
                        marker,
                        color,
                    )
                    .with_corner_radius(marker / 2.0),
                );
                continue;
            }
            scene.strokes.push(PolylinePrimitive {
                points: self.to_pixels(run),
                stroke_width: self.config.stroke_width,
                color,
            });
        }
    }

    fn push_legend(&self, scene: &mut Scene) {
        let area = self.plot_area;
        let config = &self.config;
        let left = area.left + AXIS_LABEL_GAP_PX;

        for (row, entry) in scene.legend.iter().enumerate() {
            let top = area.top + AXIS_LABEL_GAP_PX + row as f64 * LEGEND_ROW_HEIGHT_PX;
            scene.markers.push(RectPrimitive::new(
                left,
                top,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                entry.color,
            ));
            if entry.label.is_empty() {
                continue;
            }
            scene.texts.push(TextPrimitive::new(
                entry.label.clone(),
                left + LEGEND_SWATCH_PX + AXIS_LABEL_GAP_PX,
                top - 1.0,
                config.font_size_px,
                config.text_color,
                TextHAlign::Left,
            ));
        }
    }

    fn to_pixel(&self, vertex: UnitVertex) -> Vertex {
        Vertex::new(
            self.plot_area.unit_x_to_pixel(vertex.x),
            self.plot_area.unit_y_to_pixel(vertex.y),
        )
    }

    fn to_pixels(&self, vertices: &[UnitVertex]) -> Vec<Vertex> {
        vertices.iter().map(|v| self.to_pixel(*v)).collect()
    }
}
