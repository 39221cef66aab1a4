//! Relative-age labels for dump timestamps

use chrono::{TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Bucket the distance between `epoch_seconds` and `now_seconds` into a
/// short human label ("just now", "2 days ago", ...). Ages of a month or
/// more fall back to an absolute date. Timestamps in the future are
/// treated as "just now".
pub fn relative_age(epoch_seconds: i64, now_seconds: i64) -> String {
    let diff = (now_seconds - epoch_seconds).max(0);

    if diff < MINUTE {
        return "just now".to_string();
    }

    if diff < HOUR {
        let minutes = diff / MINUTE;
        return if minutes == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", minutes)
        };
    }

    if diff < DAY {
        let hours = diff / HOUR;
        return if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        };
    }

    let days = diff / DAY;
    match days {
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        _ => absolute_date(epoch_seconds),
    }
}

/// Format an epoch as "Mon D, YYYY" in UTC.
fn absolute_date(epoch_seconds: i64) -> String {
    match Utc.timestamp_opt(epoch_seconds, 0).single() {
        Some(instant) => instant.format("%b %-d, %Y").to_string(),
        None => epoch_seconds.to_string(),
    }
}
