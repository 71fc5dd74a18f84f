//! Capture timestamps for emitted records.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Display offset of capture timestamps (JST, UTC+09:00).
pub const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// Display zone of capture timestamps. Evaluated at compile time, so an
/// out-of-range offset fails the build.
pub const DISPLAY_OFFSET: FixedOffset = match FixedOffset::east_opt(DISPLAY_OFFSET_SECS) {
    Some(offset) => offset,
    None => unreachable!(),
};

/// Format of capture timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current time as a capture timestamp.
#[must_use]
pub fn capture_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Format `at` as a capture timestamp in the display zone.
#[must_use]
pub fn format_timestamp<Tz: TimeZone>(at: DateTime<Tz>) -> String {
    at.with_timezone(&DISPLAY_OFFSET)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
