use chrono::{DateTime, Utc};

/// Human-friendly age of a timestamp relative to `now`.
///
/// Buckets: under a minute "just now", then whole minutes, hours and days (each floored), and
/// from seven days on the absolute date. Timestamps in the future count as "just now".
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(created_at);

    let minutes = diff.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }

    let days = diff.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }

    created_at.format("%Y-%m-%d").to_string()
}
