//! Entry points consumed by the dashboard host.

mod composer;
mod config;
mod display;

pub use composer::{ChartComposer, ComparisonView};
pub use config::ChartComposerConfig;
pub use display::{
    COMPARISON_TABLE_METRICS, ComparisonRow, ComparisonTable, MetricRow, SummaryPanel,
};

pub use crate::render::ChartState;
