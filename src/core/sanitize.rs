use crate::core::Series;

/// Returns the finite sample values of `series`, in order.
///
/// Positions of dropped samples are not reported. Geometry that needs
/// position-accurate output checks finiteness per sample instead.
#[must_use]
pub fn sanitize_values(series: &Series) -> Vec<f64> {
    series
        .iter()
        .map(|sample| sample.value)
        .filter(|value| value.is_finite())
        .collect()
}

/// A series is plottable when at least one sample value is finite.
#[must_use]
pub fn is_plottable(series: &Series) -> bool {
    series.iter().any(|sample| sample.value.is_finite())
}

#[must_use]
pub fn finite_count(series: &Series) -> usize {
    series
        .iter()
        .filter(|sample| sample.value.is_finite())
        .count()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{finite_count, is_plottable, sanitize_values};
    use crate::core::Series;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    #[test]
    fn keeps_finite_values_in_order() {
        let series = Series::daily(
            start(),
            &[3.0, f64::NAN, 1.0, f64::INFINITY, f64::NEG_INFINITY, 2.0],
        );
        assert_eq!(sanitize_values(&series), vec![3.0, 1.0, 2.0]);
        assert_eq!(finite_count(&series), 3);
        assert_eq!(series.len(), 6);
    }

    #[test]
    fn empty_and_all_nan_series_are_unplottable() {
        assert!(!is_plottable(&Series::new()));
        let series = Series::daily(start(), &[f64::NAN, f64::INFINITY]);
        assert!(!is_plottable(&series));
        assert!(sanitize_values(&series).is_empty());
    }
}
