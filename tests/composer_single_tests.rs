use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use perfchart::api::{ChartComposer, ChartComposerConfig, SummaryPanel};
use perfchart::core::{GapPolicy, Series, Viewport};
use perfchart::payload::{BacktestPayload, MetricKey, ResultRow};
use perfchart::render::{ChartState, NullRenderer, Renderer};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date")
}

fn composer() -> ChartComposer {
    ChartComposer::new(ChartComposerConfig::new(Viewport::new(800, 400))).expect("composer")
}

#[test]
fn reference_series_projects_to_expected_unit_points() {
    let composer = composer();
    let scene = composer.render_series(&Series::daily(start(), &[100.0, 105.0, 95.0, 102.0]));

    assert_eq!(scene.state, ChartState::SinglePlot);
    assert_eq!(scene.series.len(), 1);
    let points = &scene.series[0].geometry.points;
    assert_eq!(points.len(), 4);

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[3], 1.0);

    assert_abs_diff_eq!(points[0].y, 0.5);
    assert_eq!(points[1].y, 0.0);
    assert_eq!(points[2].y, 1.0);
    assert_abs_diff_eq!(points[3].y, 0.3, epsilon = 1e-12);

    assert_eq!(scene.strokes.len(), 1);
    assert_eq!(scene.fills.len(), 1);
    assert_eq!(scene.legend.len(), 1);
    assert_eq!(scene.legend[0].label, "Portfolio Value");
}

#[test]
fn value_labels_span_min_to_max_and_grid_follows_them() {
    let composer = composer();
    let scene = composer.render_series(&Series::daily(start(), &[100.0, 105.0, 95.0, 102.0]));

    let values: Vec<f64> = scene.value_labels.iter().map(|l| l.value).collect();
    assert_eq!(values.len(), 6);
    assert_eq!(values[0], 95.0);
    assert_eq!(values[5], 105.0);
    assert_eq!(scene.value_labels[0].y, 1.0);
    assert_eq!(scene.value_labels[5].y, 0.0);
    assert_eq!(scene.value_labels[0].text, "$95");
    assert_eq!(scene.grid_lines.len(), 6);

    let area = composer.plot_area();
    assert_eq!(scene.grid_lines[5].y1, area.top);
    assert_eq!(scene.grid_lines[0].y1, area.bottom());
}

#[test]
fn missing_portfolio_value_splits_the_line() {
    let payload = BacktestPayload {
        results: vec![
            ResultRow::new(start(), Some(100.0)),
            ResultRow::new(start().succ_opt().expect("next day"), None),
            ResultRow::new(NaiveDate::from_ymd_opt(2024, 1, 4).expect("date"), Some(110.0)),
        ],
        ..BacktestPayload::default()
    };
    let scene = composer().render_single(&payload);

    let geometry = &scene.series[0].geometry;
    let indices: Vec<usize> = geometry.points.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(geometry.points[1].x, 1.0);

    // Two isolated samples: no segment to stroke, one marker each.
    assert!(scene.strokes.is_empty());
    assert!(scene.fills.is_empty());
    assert_eq!(scene.markers.len(), 2);
}

#[test]
fn bridge_policy_draws_one_line_over_the_gap() {
    let config =
        ChartComposerConfig::new(Viewport::new(800, 400)).with_gap_policy(GapPolicy::Bridge);
    let composer = ChartComposer::new(config).expect("composer");
    let scene = composer.render_series(&Series::daily(start(), &[100.0, f64::NAN, 110.0]));

    assert_eq!(scene.strokes.len(), 1);
    assert_eq!(scene.strokes[0].points.len(), 2);
    assert!(scene.markers.is_empty());
}

#[test]
fn single_sample_is_marked_at_left_edge() {
    let composer = composer();
    let scene = composer.render_series(&Series::daily(start(), &[100_000.0]));

    assert_eq!(scene.state, ChartState::SinglePlot);
    let points = &scene.series[0].geometry.points;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].x, 0.0);
    assert_eq!(points[0].y, 1.0);

    assert!(scene.strokes.is_empty());
    assert_eq!(scene.markers.len(), 1);
    let area = composer.plot_area();
    let marker = scene.markers[0];
    assert_eq!(marker.x + marker.width / 2.0, area.left);
    assert_eq!(marker.y + marker.height / 2.0, area.bottom());

    assert!(scene.value_labels.iter().all(|label| label.y == 1.0));
    assert_eq!(scene.index_labels.len(), 1);
}

#[test]
fn flat_series_stays_on_the_baseline() {
    let scene = composer().render_series(&Series::daily(start(), &[250.0; 5]));
    assert!(
        scene.series[0]
            .geometry
            .points
            .iter()
            .all(|point| point.y == 1.0)
    );
    assert_eq!(scene.value_labels[0].text, "$250.00");
}

#[test]
fn all_missing_values_render_the_placeholder() {
    let composer = composer();
    for series in [
        Series::new(),
        Series::daily(start(), &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY]),
    ] {
        let scene = composer.render_series(&series);
        assert_eq!(scene.state, ChartState::Empty);
        assert!(scene.is_placeholder());
        assert!(scene.strokes.is_empty());
        assert!(scene.series.is_empty());
        assert!(scene.legend.is_empty());
        assert_eq!(
            scene.placeholder.as_ref().map(|p| p.message.as_str()),
            Some("No valid data to display")
        );
        assert_eq!(scene.texts.len(), 1);
    }
}

#[test]
fn date_labels_use_stride_and_show_year_when_crossing() {
    let values: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
    let dec = NaiveDate::from_ymd_opt(2023, 12, 20).expect("date");
    let scene = composer().render_series(&Series::daily(dec, &values));

    let indices: Vec<usize> = scene.index_labels.iter().map(|l| l.index).collect();
    assert_eq!(indices, vec![0, 5, 10, 15, 20, 25]);
    assert_eq!(scene.index_labels[0].text, "Dec 20 '23");
    assert_eq!(scene.index_labels[5].text, "Jan 14 '24");
}

#[test]
fn null_renderer_accepts_composed_scenes() {
    let composer = composer();
    let mut renderer = NullRenderer::default();

    let scene = composer.render_series(&Series::daily(start(), &[1.0, 3.0, 2.0]));
    renderer.render(&scene).expect("render");
    assert_eq!(renderer.last_stroke_count, 1);
    assert_eq!(renderer.last_fill_count, 1);

    let empty = composer.render_series(&Series::new());
    renderer.render(&empty).expect("render placeholder");
    assert_eq!(renderer.last_stroke_count, 0);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.rendered_scenes, 2);
}

#[test]
fn summary_panel_matches_payload_metrics() {
    let payload = BacktestPayload::from_json_str(
        r#"{
            "results": [{"date": "2024-01-02", "portfolio_value": 100000.0}],
            "performance_metrics": {"total_return": 0.1, "final_value": 110000.0},
            "covered_call_metrics": {"total_trades": 12}
        }"#,
    )
    .expect("payload");
    let panel = SummaryPanel::from_payload(&payload);

    assert_eq!(panel.value(MetricKey::TotalReturn), Some("10.00%"));
    assert_eq!(panel.value(MetricKey::FinalValue), Some("$110,000.00"));
    assert_eq!(panel.value(MetricKey::TotalTrades), Some("12"));
    assert_eq!(panel.value(MetricKey::SharpeRatio), Some("N/A"));
}

#[test]
fn span_beyond_f64_range_still_renders() {
    let scene = composer().render_series(&Series::daily(start(), &[-1e308, 0.0, 1e308]));

    assert_eq!(scene.state, ChartState::SinglePlot);
    let ys: Vec<f64> = scene.series[0].geometry.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![1.0, 0.5, 0.0]);
    assert!(scene.value_labels.iter().all(|l| l.y.is_finite() && l.text != "N/A"));
    NullRenderer::default().render(&scene).expect("render");
}
