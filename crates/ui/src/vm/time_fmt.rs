use chrono::{DateTime, Utc};

/// Short calendar date for lists, e.g. `Mar 4, 2025`.
#[must_use]
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "Unknown date".to_string(), |at| at.format("%b %-d, %Y").to_string())
}

/// Score with one decimal, as the backend reports averages as floats.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
