//! Human renderings of unlock instants and remaining time.

use chrono::{DateTime, Utc};

/// Render remaining seconds compactly, e.g. `"2d 3h 15m"` or `"42s"`.
///
/// Zero components are omitted. Seconds appear when non-zero, or alone as
/// `"0s"` when nothing else remains. Negative input counts as zero.
pub fn format_countdown(seconds: i64) -> String {
    let s = seconds.max(0);
    let days = s / 86_400;
    let hours = (s % 86_400) / 3_600;
    let minutes = (s % 3_600) / 60;
    let secs = s % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// RFC 3339 UTC rendering of a Unix timestamp, e.g. `2023-11-14T22:13:20+00:00`.
///
/// Timestamps outside chrono's range fall back to their decimal form.
pub fn unlock_iso(unlock_at: i64) -> String {
    DateTime::<Utc>::from_timestamp(unlock_at, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| unlock_at.to_string())
}
