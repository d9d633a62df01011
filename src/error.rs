use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Every value in scope is non-finite, or there are no samples at all.
    #[error("no plottable data: every value in scope is non-finite or missing")]
    NoPlottableData,

    /// Caller generated an id that is already present in the comparison set.
    #[error("duplicate run id: {id}")]
    DuplicateRunId { id: String },

    #[error("missing metric: {name}")]
    MissingMetric { name: &'static str },
}
