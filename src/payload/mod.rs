//! Result payloads delivered by the external backtest service.
//!
//! Every numeric field the service may omit is an `Option`; display code
//! resolves absent values through `MetricKey` and renders `"N/A"`.

mod metrics;
mod params;

pub use metrics::{MetricFormat, MetricKey, RunSummary};
pub use params::{EntryDay, RunParams, StrategyParams, StrategyType};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Series;
use crate::error::{ChartError, ChartResult};

/// One daily row of the backtest equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: NaiveDate,
    /// `null` when the service could not value the portfolio that day.
    #[serde(default)]
    pub portfolio_value: Option<f64>,
    #[serde(default)]
    pub stock_price: Option<f64>,
    #[serde(default)]
    pub cash: Option<f64>,
    #[serde(default)]
    pub positions_count: Option<u32>,
    #[serde(default)]
    pub total_premium_collected: Option<f64>,
    #[serde(default)]
    pub trades_count: Option<u32>,
}

impl ResultRow {
    #[must_use]
    pub fn new(date: NaiveDate, portfolio_value: Option<f64>) -> Self {
        Self {
            date,
            portfolio_value,
            stock_price: None,
            cash: None,
            positions_count: None,
            total_premium_collected: None,
            trades_count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default)]
    pub total_return: Option<f64>,
    #[serde(default)]
    pub annualized_return: Option<f64>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub max_drawdown: Option<f64>,
    #[serde(default)]
    pub final_value: Option<f64>,
    #[serde(default)]
    pub total_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoveredCallMetrics {
    #[serde(default)]
    pub total_trades: Option<u32>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub avg_return_per_trade: Option<f64>,
    #[serde(default)]
    pub total_premium_collected: Option<f64>,
    #[serde(default)]
    pub pct_expired_worthless: Option<f64>,
    #[serde(default)]
    pub pct_called_away: Option<f64>,
    #[serde(default)]
    pub avg_dte_at_open: Option<f64>,
    #[serde(default)]
    pub avg_delta_at_open: Option<f64>,
}

/// Completed backtest result as returned by the service.
///
/// Unknown fields (trade lists, raw option chains) are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestPayload {
    #[serde(default)]
    pub results: Vec<ResultRow>,
    #[serde(default)]
    pub performance_metrics: PerformanceMetrics,
    #[serde(default)]
    pub covered_call_metrics: CoveredCallMetrics,
}

impl BacktestPayload {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse backtest payload: {e}"))
        })
    }

    /// Portfolio-value series in delivery order; missing values become NaN.
    #[must_use]
    pub fn series(&self) -> Series {
        Series::from_points(
            self.results
                .iter()
                .map(|row| (row.date, row.portfolio_value.unwrap_or(f64::NAN))),
        )
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            performance: self.performance_metrics,
            covered_call: self.covered_call_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BacktestPayload;

    const PAYLOAD: &str = r#"{
        "results": [
            {"date": "2024-01-02", "portfolio_value": 100000.0, "stock_price": 248.4, "cash": 75000.0},
            {"date": "2024-01-03", "portfolio_value": null},
            {"date": "2024-01-03", "portfolio_value": 100512.25}
        ],
        "performance_metrics": {
            "total_return": 0.0051,
            "sharpe_ratio": null,
            "max_drawdown": -0.021
        },
        "covered_call_metrics": {
            "total_trades": 4,
            "win_rate": 0.75,
            "total_premium_collected": 1830.0,
            "pct_expired_worthless": 0.5,
            "pct_called_away": 0.25
        },
        "trades": [{"id": "abc", "premium_received": 420.0}]
    }"#;

    #[test]
    fn parses_service_payload() {
        let payload = BacktestPayload::from_json_str(PAYLOAD).expect("payload");
        assert_eq!(payload.results.len(), 3);
        assert_eq!(payload.results[0].stock_price, Some(248.4));
        assert_eq!(payload.performance_metrics.total_return, Some(0.0051));
        assert_eq!(payload.performance_metrics.sharpe_ratio, None);
        assert_eq!(payload.performance_metrics.annualized_return, None);
        assert_eq!(payload.covered_call_metrics.total_trades, Some(4));
    }

    #[test]
    fn series_keeps_duplicates_and_marks_missing_values() {
        let series = BacktestPayload::from_json_str(PAYLOAD)
            .expect("payload")
            .series();
        assert_eq!(series.len(), 3);
        assert!(series.samples()[1].value.is_nan());
        assert_eq!(series.samples()[1].timestamp, series.samples()[2].timestamp);
        assert_eq!(series.samples()[2].index, 2);
    }

    #[test]
    fn empty_metrics_objects_are_accepted() {
        let payload = BacktestPayload::from_json_str(
            r#"{"results": [], "performance_metrics": {}, "covered_call_metrics": {}}"#,
        )
        .expect("payload");
        assert!(payload.series().is_empty());
        assert_eq!(payload.summary().performance.total_return, None);
    }

    #[test]
    fn malformed_dates_are_rejected_at_the_boundary() {
        let err = BacktestPayload::from_json_str(
            r#"{"results": [{"date": "01/02/2024", "portfolio_value": 1.0}]}"#,
        )
        .expect_err("bad date");
        assert!(err.to_string().contains("failed to parse backtest payload"));
    }
}
