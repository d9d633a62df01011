use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One portfolio-value observation.
///
/// `index` is the sample's position inside its series. `value` may be
/// non-finite when the backtest service could not price the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub index: usize,
    pub timestamp: NaiveDate,
    pub value: f64,
}

/// Chronologically ordered portfolio values for one backtest.
///
/// Order is kept exactly as delivered; duplicate timestamps are not merged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(timestamp, value)` pairs, numbering samples by position.
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let samples = points
            .into_iter()
            .enumerate()
            .map(|(index, (timestamp, value))| Sample {
                index,
                timestamp,
                value,
            })
            .collect();
        Self { samples }
    }

    /// Builds a series with one sample per calendar day starting at `start`.
    #[must_use]
    pub fn daily(start: NaiveDate, values: &[f64]) -> Self {
        Self::from_points(values.iter().enumerate().map(|(offset, value)| {
            let timestamp = start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(NaiveDate::MAX);
            (timestamp, *value)
        }))
    }

    pub fn push(&mut self, timestamp: NaiveDate, value: f64) {
        let index = self.samples.len();
        self.samples.push(Sample {
            index,
            timestamp,
            value,
        });
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn first_timestamp(&self) -> Option<NaiveDate> {
        self.samples.first().map(|sample| sample.timestamp)
    }

    #[must_use]
    pub fn last_timestamp(&self) -> Option<NaiveDate> {
        self.samples.last().map(|sample| sample.timestamp)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
