use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    #[default]
    Weekly,
    Monthly,
    Rolling,
}

impl StrategyType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Rolling => "rolling",
        }
    }
}

/// Weekday on which new covered calls may be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryDay {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Any,
}

/// Covered-call rules sent with a backtest request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    #[serde(default = "default_delta_target")]
    pub delta_target: f64,
    #[serde(default = "default_dte_target")]
    pub dte_target: u32,
    #[serde(default = "default_profit_target")]
    pub profit_target: f64,
    #[serde(default = "default_loss_limit")]
    pub loss_limit: f64,
    #[serde(default)]
    pub strategy_type: StrategyType,
    #[serde(default)]
    pub entry_day: EntryDay,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            delta_target: default_delta_target(),
            dte_target: default_dte_target(),
            profit_target: default_profit_target(),
            loss_limit: default_loss_limit(),
            strategy_type: StrategyType::default(),
            entry_day: EntryDay::default(),
        }
    }
}

/// Request parameters a run was produced from, kept for the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub strategy_params: StrategyParams,
    #[serde(default)]
    pub strategy_name: Option<String>,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    #[serde(default = "default_shares_per_contract")]
    pub shares_per_contract: u32,
}

impl RunParams {
    #[must_use]
    pub fn new(ticker: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            start_date,
            end_date,
            strategy_params: StrategyParams::default(),
            strategy_name: None,
            initial_capital: default_initial_capital(),
            shares_per_contract: default_shares_per_contract(),
        }
    }

    #[must_use]
    pub fn with_strategy_params(mut self, strategy_params: StrategyParams) -> Self {
        self.strategy_params = strategy_params;
        self
    }

    #[must_use]
    pub fn with_strategy_name(mut self, name: impl Into<String>) -> Self {
        self.strategy_name = Some(name.into());
        self
    }

    /// Label suggested for a run when the user does not type one.
    #[must_use]
    pub fn default_label(&self) -> String {
        match &self.strategy_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
            _ => format!(
                "{} {:.2}Δ {}DTE",
                self.ticker, self.strategy_params.delta_target, self.strategy_params.dte_target
            ),
        }
    }
}

fn default_delta_target() -> f64 {
    0.30
}

fn default_dte_target() -> u32 {
    45
}

fn default_profit_target() -> f64 {
    0.50
}

fn default_loss_limit() -> f64 {
    2.0
}

fn default_initial_capital() -> f64 {
    100_000.0
}

fn default_shares_per_contract() -> u32 {
    100
}
