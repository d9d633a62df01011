use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{NOT_AVAILABLE, format_currency, format_decimal, format_percent};
use crate::error::{ChartError, ChartResult};

use super::{CoveredCallMetrics, PerformanceMetrics};

/// How a metric value is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricFormat {
    /// Fraction shown as a percentage with two decimals.
    Percent,
    /// Plain number with two decimals.
    Ratio,
    /// Dollar amount with cents.
    Currency,
    /// Whole number.
    Count,
    /// Plain number with one decimal.
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    TotalReturn,
    AnnualizedReturn,
    Volatility,
    SharpeRatio,
    MaxDrawdown,
    FinalValue,
    TotalDays,
    TotalTrades,
    WinRate,
    AvgReturnPerTrade,
    TotalPremiumCollected,
    PctExpiredWorthless,
    PctCalledAway,
    AvgDteAtOpen,
    AvgDeltaAtOpen,
}

impl MetricKey {
    /// Every metric, in summary-panel order.
    pub const ALL: [Self; 15] = [
        Self::TotalReturn,
        Self::AnnualizedReturn,
        Self::Volatility,
        Self::SharpeRatio,
        Self::MaxDrawdown,
        Self::FinalValue,
        Self::TotalDays,
        Self::TotalTrades,
        Self::WinRate,
        Self::AvgReturnPerTrade,
        Self::TotalPremiumCollected,
        Self::PctExpiredWorthless,
        Self::PctCalledAway,
        Self::AvgDteAtOpen,
        Self::AvgDeltaAtOpen,
    ];

    /// Payload field name, used in `MissingMetric` errors.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::TotalReturn => "total_return",
            Self::AnnualizedReturn => "annualized_return",
            Self::Volatility => "volatility",
            Self::SharpeRatio => "sharpe_ratio",
            Self::MaxDrawdown => "max_drawdown",
            Self::FinalValue => "final_value",
            Self::TotalDays => "total_days",
            Self::TotalTrades => "total_trades",
            Self::WinRate => "win_rate",
            Self::AvgReturnPerTrade => "avg_return_per_trade",
            Self::TotalPremiumCollected => "total_premium_collected",
            Self::PctExpiredWorthless => "pct_expired_worthless",
            Self::PctCalledAway => "pct_called_away",
            Self::AvgDteAtOpen => "avg_dte_at_open",
            Self::AvgDeltaAtOpen => "avg_delta_at_open",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TotalReturn => "Total Return",
            Self::AnnualizedReturn => "Annualized Return",
            Self::Volatility => "Volatility",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::MaxDrawdown => "Max Drawdown",
            Self::FinalValue => "Final Value",
            Self::TotalDays => "Trading Days",
            Self::TotalTrades => "Total Trades",
            Self::WinRate => "Win Rate",
            Self::AvgReturnPerTrade => "Avg Return / Trade",
            Self::TotalPremiumCollected => "Premium Collected",
            Self::PctExpiredWorthless => "Expired Worthless",
            Self::PctCalledAway => "Called Away",
            Self::AvgDteAtOpen => "Avg DTE at Open",
            Self::AvgDeltaAtOpen => "Avg Delta at Open",
        }
    }

    #[must_use]
    pub fn format(self) -> MetricFormat {
        match self {
            Self::TotalReturn
            | Self::AnnualizedReturn
            | Self::Volatility
            | Self::MaxDrawdown
            | Self::WinRate
            | Self::PctExpiredWorthless
            | Self::PctCalledAway => MetricFormat::Percent,
            Self::SharpeRatio | Self::AvgDeltaAtOpen => MetricFormat::Ratio,
            Self::FinalValue | Self::AvgReturnPerTrade | Self::TotalPremiumCollected => {
                MetricFormat::Currency
            }
            Self::TotalDays | Self::TotalTrades => MetricFormat::Count,
            Self::AvgDteAtOpen => MetricFormat::Decimal,
        }
    }
}

impl MetricFormat {
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Percent => format_percent(value, 2),
            Self::Ratio => format_decimal(value, 2),
            Self::Currency => format_currency(value, 2),
            Self::Count => format_decimal(value, 0),
            Self::Decimal => format_decimal(value, 1),
        }
    }
}

/// Summary metrics attached to a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub performance: PerformanceMetrics,
    pub covered_call: CoveredCallMetrics,
}

impl RunSummary {
    /// Raw metric value; absent or non-finite values are `MissingMetric`.
    pub fn metric(&self, key: MetricKey) -> ChartResult<f64> {
        let performance = &self.performance;
        let covered_call = &self.covered_call;
        let value = match key {
            MetricKey::TotalReturn => performance.total_return,
            MetricKey::AnnualizedReturn => performance.annualized_return,
            MetricKey::Volatility => performance.volatility,
            MetricKey::SharpeRatio => performance.sharpe_ratio,
            MetricKey::MaxDrawdown => performance.max_drawdown,
            MetricKey::FinalValue => performance.final_value,
            MetricKey::TotalDays => performance.total_days.map(f64::from),
            MetricKey::TotalTrades => covered_call.total_trades.map(f64::from),
            MetricKey::WinRate => covered_call.win_rate,
            MetricKey::AvgReturnPerTrade => covered_call.avg_return_per_trade,
            MetricKey::TotalPremiumCollected => covered_call.total_premium_collected,
            MetricKey::PctExpiredWorthless => covered_call.pct_expired_worthless,
            MetricKey::PctCalledAway => covered_call.pct_called_away,
            MetricKey::AvgDteAtOpen => covered_call.avg_dte_at_open,
            MetricKey::AvgDeltaAtOpen => covered_call.avg_delta_at_open,
        };

        value
            .filter(|v| v.is_finite())
            .ok_or(ChartError::MissingMetric {
                name: key.field_name(),
            })
    }

    /// Display text for `key`, substituting `"N/A"` for missing values.
    #[must_use]
    pub fn display(&self, key: MetricKey) -> String {
        match self.metric(key) {
            Ok(value) => key.format().render(value),
            Err(err) => {
                trace!(error = %err, "metric display fallback");
                NOT_AVAILABLE.to_owned()
            }
        }
    }
}
