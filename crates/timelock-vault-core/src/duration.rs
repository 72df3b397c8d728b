//! Duration tokens.
//!
//! Maps the human tokens callers pick a lock period with ("1h", "1week",
//! "1year", ...) to a fixed number of seconds. Months and years are calendar
//! approximations: a month is 30 days, a year is 365 days.

/// Duration used when the caller does not name one.
pub const DEFAULT_DURATION: &str = "1month";

const HOUR: i64 = 3_600;
const DAY: i64 = 24 * HOUR;

/// The supported tokens, in display order.
pub const DURATIONS: &[(&str, i64)] = &[
    ("1h", HOUR),
    ("2h", 2 * HOUR),
    ("6h", 6 * HOUR),
    ("12h", 12 * HOUR),
    ("1d", DAY),
    ("1day", DAY),
    ("3d", 3 * DAY),
    ("3days", 3 * DAY),
    ("1week", 7 * DAY),
    ("2weeks", 14 * DAY),
    ("1month", 30 * DAY),
    ("3months", 90 * DAY),
    ("6months", 180 * DAY),
    ("1year", 365 * DAY),
];

/// Lookup over [`DURATIONS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationTable;

impl DurationTable {
    /// Resolve a token to seconds. Case-insensitive.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        resolve_duration(token)
    }

    /// All valid tokens, in table order.
    pub fn tokens(&self) -> Vec<&'static str> {
        DURATIONS.iter().map(|(token, _)| *token).collect()
    }
}

/// Resolve a duration token to seconds.
///
/// Returns `None` for unknown tokens; that is a caller error, not a fault.
pub fn resolve_duration(token: &str) -> Option<i64> {
    DURATIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(token))
        .map(|(_, seconds)| *seconds)
}
