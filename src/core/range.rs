use serde::{Deserialize, Serialize};

use crate::core::{Series, sanitize_values};
use crate::error::{ChartError, ChartResult};

/// Smallest span used as the mapping denominator.
///
/// Keeps flat series (every value equal) from dividing by zero.
pub const MIN_VALUE_RANGE: f64 = 1.0;

/// Affine value-to-unit mapping shared by every series in one plot area.
///
/// `map_value(min) == 0` and `map_value(max) == 1` whenever `max - min >= 1`.
/// Narrower spans are stretched over a range of one, so their values land
/// in the lower part of the unit interval.
///
/// Arithmetic runs on halved values so spans wider than `f64::MAX` (for
/// example `-1e308..1e308`) still map into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeMapper {
    min: f64,
    max: f64,
    half_range: f64,
}

impl RangeMapper {
    /// Fits a mapper over the finite entries of `values`.
    pub fn from_values(values: &[f64]) -> ChartResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.iter().copied().filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }

        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::NoPlottableData);
        }

        let half_range = (max / 2.0 - min / 2.0).max(MIN_VALUE_RANGE / 2.0);
        if !half_range.is_finite() {
            return Err(ChartError::NoPlottableData);
        }

        Ok(Self {
            min,
            max,
            half_range,
        })
    }

    pub fn from_series(series: &Series) -> ChartResult<Self> {
        Self::from_values(&sanitize_values(series))
    }

    /// Fits one mapper over the pooled finite values of every series.
    ///
    /// Series without finite values contribute nothing; the call only fails
    /// when no series contributes.
    pub fn pooled<'a>(series: impl IntoIterator<Item = &'a Series>) -> ChartResult<Self> {
        let values: Vec<f64> = series.into_iter().flat_map(sanitize_values).collect();
        Self::from_values(&values)
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Mapping denominator, `max(max - min, 1)`; infinite when the span
    /// itself overflows `f64`.
    #[must_use]
    pub fn range(self) -> f64 {
        self.half_range * 2.0
    }

    #[must_use]
    pub fn map_value(self, value: f64) -> f64 {
        (value / 2.0 - self.min / 2.0) / self.half_range
    }

    #[must_use]
    pub fn unit_to_value(self, unit: f64) -> f64 {
        (self.min / 2.0 + unit * self.half_range) * 2.0
    }

    /// Value at fraction `t` of the raw `min..=max` span (no range floor).
    #[must_use]
    pub fn lerp(self, t: f64) -> f64 {
        (self.min / 2.0 + (self.max / 2.0 - self.min / 2.0) * t) * 2.0
    }
}
