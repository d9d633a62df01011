use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{RangeMapper, Series};

/// How stroke paths treat samples dropped for being non-finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GapPolicy {
    /// Start a new subpath after every dropped sample.
    #[default]
    Break,
    /// Connect the remaining points in a single subpath.
    Bridge,
}

/// One drawable sample in unit plot space (`x`, `y` in `[0, 1]`, `y` down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub source_value: f64,
    pub source_timestamp: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitVertex {
    pub x: f64,
    pub y: f64,
}

/// Stroke and fill outlines derived from plot points.
///
/// Each fill polygon is explicitly closed against the bottom baseline
/// (`y = 1`), repeating its first vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDescriptor {
    pub stroke: Vec<Vec<UnitVertex>>,
    pub fill: Vec<Vec<UnitVertex>>,
}

/// Resolution-independent geometry for one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotGeometry {
    pub points: Vec<PlotPoint>,
    pub path: PathDescriptor,
}

impl PlotGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Unit x position of `index` on an axis holding `axis_len` slots.
///
/// A single-slot axis places its only point at the left edge.
#[must_use]
pub fn x_for_index(index: usize, axis_len: usize) -> f64 {
    let denominator = axis_len.saturating_sub(1).max(1);
    index as f64 / denominator as f64
}

/// Projects `series` into unit plot space.
///
/// Emits one point per finite sample at `x = i / max(axis_len - 1, 1)` and
/// `y = 1 - mapper.map_value(value)`. Non-finite samples produce no point.
/// `axis_len` is the length of the shared index axis; it is raised to the
/// series length when smaller.
#[must_use]
pub fn build_plot_geometry(
    series: &Series,
    mapper: &RangeMapper,
    axis_len: usize,
    gap_policy: GapPolicy,
) -> PlotGeometry {
    let axis_len = axis_len.max(series.len());
    let points: Vec<PlotPoint> = series
        .iter()
        .enumerate()
        .filter(|(_, sample)| sample.value.is_finite())
        .map(|(index, sample)| PlotPoint {
            index,
            x: x_for_index(index, axis_len),
            y: 1.0 - mapper.map_value(sample.value),
            source_value: sample.value,
            source_timestamp: sample.timestamp,
        })
        .collect();

    let path = build_path_descriptor(&points, gap_policy);
    PlotGeometry { points, path }
}

fn build_path_descriptor(points: &[PlotPoint], gap_policy: GapPolicy) -> PathDescriptor {
    let mut stroke: Vec<Vec<UnitVertex>> = Vec::new();
    let mut previous_index: Option<usize> = None;

    for point in points {
        let starts_new_run = match (gap_policy, previous_index) {
            (_, None) => true,
            (GapPolicy::Break, Some(previous)) => point.index != previous + 1,
            (GapPolicy::Bridge, Some(_)) => false,
        };
        let vertex = UnitVertex {
            x: point.x,
            y: point.y,
        };
        match stroke.last_mut() {
            Some(run) if !starts_new_run => run.push(vertex),
            _ => stroke.push(vec![vertex]),
        }
        previous_index = Some(point.index);
    }

    let fill = stroke
        .iter()
        .filter(|run| run.len() >= 2)
        .map(|run| close_against_baseline(run))
        .collect();

    PathDescriptor { stroke, fill }
}

fn close_against_baseline(run: &[UnitVertex]) -> Vec<UnitVertex> {
    let first_x = run[0].x;
    let last_x = run[run.len() - 1].x;

    let mut polygon = Vec::with_capacity(run.len() + 3);
    polygon.push(UnitVertex { x: first_x, y: 1.0 });
    polygon.extend(run.iter().copied());
    polygon.push(UnitVertex { x: last_x, y: 1.0 });
    polygon.push(UnitVertex { x: first_x, y: 1.0 });
    polygon
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::{GapPolicy, build_plot_geometry, x_for_index};
    use crate::core::{RangeMapper, Series};

    fn series(values: &[f64]) -> Series {
        Series::daily(
            NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            values,
        )
    }

    #[test]
    fn single_slot_axis_puts_point_at_left_edge() {
        assert_eq!(x_for_index(0, 1), 0.0);
        assert_eq!(x_for_index(0, 0), 0.0);
        assert_eq!(x_for_index(3, 4), 1.0);
    }

    #[test]
    fn projects_the_reference_series() {
        let series = series(&[100.0, 105.0, 95.0, 102.0]);
        let mapper = RangeMapper::from_series(&series).expect("mapper");
        let geometry = build_plot_geometry(&series, &mapper, series.len(), GapPolicy::Break);

        assert_eq!(geometry.points.len(), 4);
        let xs: Vec<f64> = geometry.points.iter().map(|p| p.x).collect();
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        assert_abs_diff_eq!(geometry.points[0].y, 0.5);
        assert_eq!(geometry.points[1].y, 0.0);
        assert_eq!(geometry.points[2].y, 1.0);
        assert_eq!(geometry.points[3].source_value, 102.0);
        assert_eq!(geometry.path.stroke.len(), 1);
        assert_eq!(geometry.path.fill.len(), 1);
        assert_eq!(geometry.path.fill[0].len(), 4 + 3);
    }

    #[test]
    fn non_finite_samples_leave_a_gap() {
        let series = series(&[100.0, f64::NAN, 110.0]);
        let mapper = RangeMapper::from_series(&series).expect("mapper");
        let geometry = build_plot_geometry(&series, &mapper, series.len(), GapPolicy::Break);

        let indices: Vec<usize> = geometry.points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(geometry.points[1].x, 1.0);
        assert_eq!(geometry.path.stroke.len(), 2);
        assert!(geometry.path.fill.is_empty());
    }

    #[test]
    fn bridge_policy_connects_across_gaps() {
        let series = series(&[100.0, f64::NAN, 110.0, 105.0]);
        let mapper = RangeMapper::from_series(&series).expect("mapper");
        let geometry = build_plot_geometry(&series, &mapper, series.len(), GapPolicy::Bridge);

        assert_eq!(geometry.points.len(), 3);
        assert_eq!(geometry.path.stroke.len(), 1);
        assert_eq!(geometry.path.stroke[0].len(), 3);
    }

    #[test]
    fn longer_axis_compresses_x() {
        let series = series(&[1.0, 2.0, 3.0]);
        let mapper = RangeMapper::from_series(&series).expect("mapper");
        let geometry = build_plot_geometry(&series, &mapper, 5, GapPolicy::Break);
        assert_eq!(geometry.points[2].x, 0.5);
    }

    #[test]
    fn fill_polygon_is_closed_on_baseline() {
        let series = series(&[2.0, 4.0]);
        let mapper = RangeMapper::from_series(&series).expect("mapper");
        let geometry = build_plot_geometry(&series, &mapper, 2, GapPolicy::Break);
        let polygon = &geometry.path.fill[0];
        assert_eq!(polygon.first(), polygon.last());
        assert_eq!(polygon[0].y, 1.0);
        assert_eq!(polygon[polygon.len() - 2].x, 1.0);
    }
}
