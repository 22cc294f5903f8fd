use chrono::{SecondsFormat, Utc};

/// RFC 3339 UTC timestamp stamped on saved competitions, e.g. `2024-05-01T09:30:00Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Compact UTC stamp safe for file names, e.g. `20240501-093000`.
pub fn file_stamp_now() -> String {
    Utc::now().format("%Y%m%d-%H%M%S").to_string()
}
