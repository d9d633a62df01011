//! perfchart: performance-series geometry and strategy comparison engine.
//!
//! Turns backtest equity curves into normalized, drawable scenes and keeps
//! the user's comparison set of named, colored runs. Painting the scene is
//! left to a `render::Renderer` backend.

pub mod api;
pub mod comparison;
pub mod core;
pub mod error;
pub mod payload;
pub mod render;
pub mod telemetry;

pub use api::{ChartComposer, ChartComposerConfig};
pub use comparison::{ComparisonSet, NewRun, RunId};
pub use error::{ChartError, ChartResult};
