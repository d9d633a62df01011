use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{IndexAxis, RangeMapper, format_currency, format_short_date, x_for_index};

/// Value-axis label count used by the dashboard (emits `count + 1` labels).
pub const DEFAULT_VALUE_LABEL_COUNT: usize = 5;
/// Target number of date labels along the index axis.
pub const DEFAULT_DATE_LABEL_TARGET: usize = 6;
/// Upper bound accepted for either label count.
pub const MAX_LABEL_COUNT: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub value: f64,
    /// Unit y position, `0` at the top.
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexLabel {
    pub index: usize,
    /// Unit x position, `0` at the left edge.
    pub x: f64,
    pub timestamp: NaiveDate,
    pub text: String,
}

/// Emits `count + 1` labels evenly spaced from `mapper.min()` to `mapper.max()`.
///
/// Values are plain linear interpolation with both endpoints included; no
/// rounding to "nice" numbers. `count == 0` yields only the minimum.
/// `count` is capped at `MAX_LABEL_COUNT`.
#[must_use]
pub fn value_labels(mapper: &RangeMapper, count: usize) -> Vec<ValueLabel> {
    let count = count.min(MAX_LABEL_COUNT);
    let min = mapper.min();
    let max = mapper.max();
    let decimals = if count > 0 && (max - min) / (count as f64) < 1.0 {
        2
    } else {
        0
    };

    (0..=count)
        .map(|step| {
            let value = if step == count && count > 0 {
                max
            } else if count == 0 {
                min
            } else {
                mapper.lerp(step as f64 / count as f64)
            };
            ValueLabel {
                value,
                y: 1.0 - mapper.map_value(value),
                text: format_currency(value, decimals),
            }
        })
        .collect()
}

/// Stride between date labels: `max(1, floor(len / target))`.
#[must_use]
pub fn index_label_stride(len: usize, target: usize) -> usize {
    if target == 0 {
        return len.max(1);
    }
    (len / target).max(1)
}

/// Emits date labels at every `index_label_stride` slot of `axis`, starting at slot 0.
#[must_use]
pub fn index_labels(axis: &IndexAxis, target: usize) -> Vec<IndexLabel> {
    let len = axis.len();
    if len == 0 || target == 0 {
        return Vec::new();
    }

    let crosses_year = match (axis.dates().first(), axis.dates().last()) {
        (Some(first), Some(last)) => first.year() != last.year(),
        _ => false,
    };

    let stride = index_label_stride(len, target);
    (0..len)
        .step_by(stride)
        .filter_map(|index| {
            axis.date_at(index).map(|timestamp| IndexLabel {
                index,
                x: x_for_index(index, len),
                timestamp,
                text: format_short_date(timestamp, crosses_year),
            })
        })
        .collect()
}
