use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Human-friendly age of `timestamp` as seen from `now`.
///
/// Ages are bucketed by whole days rounded up: up to one day is "Today", up to
/// two days "Yesterday", up to a week "N days ago" (N = days rounded up, minus
/// one), anything older is shown as a calendar date. The distance is absolute,
/// so timestamps slightly in the future read as "Today" too.
pub fn relative_date(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_millis = (now - timestamp).num_milliseconds().abs();
    let days = (diff_millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    match days {
        0 | 1 => "Today".to_string(),
        2 => "Yesterday".to_string(),
        3..=7 => format!("{} days ago", days - 1),
        _ => format_calendar_date(timestamp),
    }
}

/// US-style calendar date, e.g. "3/7/2024".
pub fn format_calendar_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}
