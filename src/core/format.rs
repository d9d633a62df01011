use chrono::NaiveDate;

/// Display fallback for absent or non-finite values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a dollar amount with thousands separators, e.g. `-$1,234.50`.
#[must_use]
pub fn format_currency(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_owned();
    }

    let magnitude = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match magnitude.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (magnitude.as_str(), None),
    };
    let is_zero = magnitude.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(whole)),
    }
}

/// Formats a fraction as a percentage, e.g. `0.1234` as `12.34%`.
#[must_use]
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    if !ratio.is_finite() {
        return NOT_AVAILABLE.to_owned();
    }
    format!("{:.*}%", decimals, ratio * 100.0)
}

#[must_use]
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_owned();
    }
    format!("{value:.decimals$}")
}

/// Short axis date: `Jan 5`, or `Jan 5 '24` when the axis crosses a year.
#[must_use]
pub fn format_short_date(date: NaiveDate, with_year: bool) -> String {
    if with_year {
        date.format("%b %-d '%y").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (len - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
