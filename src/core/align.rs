use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Series;

/// Shared x-axis for several series aligned by sample position.
///
/// Index `i` of every series is treated as the same axis slot, whatever its
/// calendar date. The date shown for slot `i` is taken from the first series
/// (in the given order) that has a sample at `i`.
///
/// Known limitation: runs that start on different dates, or that skip
/// different trading days, are silently misaligned. Callers that need
/// calendar-accurate comparison must pre-align series by date.
/// `calendar_mismatches` reports how many slots disagree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexAxis {
    dates: Vec<NaiveDate>,
}

impl IndexAxis {
    #[must_use]
    pub fn from_series(series: &[&Series]) -> Self {
        let Some(longest) = series.iter().max_by_key(|s| s.len()) else {
            return Self::default();
        };
        // The longest series covers every slot, so it is the fallback date.
        let dates = longest
            .iter()
            .enumerate()
            .map(|(index, own)| {
                series
                    .iter()
                    .find_map(|s| s.get(index))
                    .map_or(own.timestamp, |sample| sample.timestamp)
            })
            .collect();
        Self { dates }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    #[must_use]
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    /// Counts axis slots where some series carries a different date than the axis.
    #[must_use]
    pub fn calendar_mismatches(&self, series: &[&Series]) -> usize {
        self.dates
            .iter()
            .enumerate()
            .filter(|(index, date)| {
                series.iter().any(|s| {
                    s.get(*index)
                        .is_some_and(|sample| sample.timestamp != **date)
                })
            })
            .count()
    }
}
