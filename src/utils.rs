// Utility functions
use chrono::{DateTime, Utc};

/// Converts epoch milliseconds to `DateTime<Utc>`, if representable.
pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Truncates a response body for inclusion in an error message.
pub fn truncate_snippet(body: &str, max_chars: usize) -> String {
    let mut snippet: String = body.chars().take(max_chars).collect();
    if body.chars().count() > max_chars {
        snippet.push_str("...");
    }
    snippet
}
