use serde::{Deserialize, Serialize};

use crate::comparison::{ComparisonSnapshot, Run, RunId};
use crate::payload::{BacktestPayload, MetricKey, RunSummary};
use crate::render::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub key: MetricKey,
    pub label: String,
    /// Formatted value, or `"N/A"` when the payload omitted it.
    pub value: String,
}

/// Metric cards shown next to a single backtest chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPanel {
    pub rows: Vec<MetricRow>,
}

impl SummaryPanel {
    #[must_use]
    pub fn from_payload(payload: &BacktestPayload) -> Self {
        Self::from_summary(&payload.summary())
    }

    #[must_use]
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            rows: MetricKey::ALL
                .iter()
                .map(|key| metric_row(summary, *key))
                .collect(),
        }
    }

    #[must_use]
    pub fn value(&self, key: MetricKey) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
    }
}

/// Metrics shown as columns of the comparison table, in order.
pub const COMPARISON_TABLE_METRICS: [MetricKey; 6] = [
    MetricKey::TotalReturn,
    MetricKey::SharpeRatio,
    MetricKey::MaxDrawdown,
    MetricKey::WinRate,
    MetricKey::TotalTrades,
    MetricKey::TotalPremiumCollected,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub id: RunId,
    pub label: String,
    pub color: Color,
    pub swatch_hex: String,
    pub ticker: String,
    pub strategy_type: String,
    pub delta_target: String,
    pub dte_target: String,
    pub date_range: String,
    pub metrics: Vec<MetricRow>,
}

impl ComparisonRow {
    fn from_run(run: &Run) -> Self {
        let params = run.source_params();
        let strategy = &params.strategy_params;
        Self {
            id: run.id().clone(),
            label: run.label().to_owned(),
            color: run.color(),
            swatch_hex: run.color().to_hex(),
            ticker: params.ticker.clone(),
            strategy_type: strategy.strategy_type.as_str().to_owned(),
            delta_target: format!("{:.2}", strategy.delta_target),
            dte_target: strategy.dte_target.to_string(),
            date_range: format!("{} to {}", params.start_date, params.end_date),
            metrics: COMPARISON_TABLE_METRICS
                .iter()
                .map(|key| metric_row(run.summary(), *key))
                .collect(),
        }
    }

    #[must_use]
    pub fn value(&self, key: MetricKey) -> Option<&str> {
        self.metrics
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
    }
}

/// Side-by-side table of runs, one row per run in snapshot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    #[must_use]
    pub fn from_snapshot(snapshot: &ComparisonSnapshot<'_>) -> Self {
        Self {
            rows: snapshot.iter().map(ComparisonRow::from_run).collect(),
        }
    }

    #[must_use]
    pub fn column_headers() -> Vec<&'static str> {
        let mut headers = vec!["Strategy", "Ticker", "Type", "Delta", "DTE", "Period"];
        headers.extend(COMPARISON_TABLE_METRICS.iter().map(|key| key.label()));
        headers
    }
}

fn metric_row(summary: &RunSummary, key: MetricKey) -> MetricRow {
    MetricRow {
        key,
        label: key.label().to_owned(),
        value: summary.display(key),
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonTable, SummaryPanel};
    use crate::payload::{BacktestPayload, MetricKey};

    #[test]
    fn summary_panel_lists_every_metric_with_fallbacks() {
        let payload = BacktestPayload::from_json_str(
            r#"{"performance_metrics": {"total_return": 0.05, "sharpe_ratio": null},
                "covered_call_metrics": {"win_rate": 0.6}}"#,
        )
        .expect("payload");
        let panel = SummaryPanel::from_payload(&payload);

        assert_eq!(panel.rows.len(), MetricKey::ALL.len());
        assert_eq!(panel.value(MetricKey::TotalReturn), Some("5.00%"));
        assert_eq!(panel.value(MetricKey::SharpeRatio), Some("N/A"));
        assert_eq!(panel.value(MetricKey::WinRate), Some("60.00%"));
        assert_eq!(panel.rows[0].label, "Total Return");
    }

    #[test]
    fn headers_cover_every_column() {
        let headers = ComparisonTable::column_headers();
        assert_eq!(headers.len(), 12);
        assert_eq!(headers[6], "Total Return");
    }
}
