//! Time helpers - business time zone conversion
//!
//! Storage is always UTC Unix millis; anything a person reads (dates,
//! weekdays, hours of day, receipt timestamps) is computed in the configured
//! business time zone.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse `YYYY-MM-DD`
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {} (expected YYYY-MM-DD)", date)))
}

/// Current time in the business time zone
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Millis -> business-zone datetime (epoch on out-of-range input)
pub fn millis_to_local(millis: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
}

/// `Mar 05, 2025 01:30 PM`
pub fn format_datetime(millis: i64, tz: Tz) -> String {
    millis_to_local(millis, tz)
        .format("%b %d, %Y %I:%M %p")
        .to_string()
}

/// `2025-03-05 13:30:00`
pub fn format_timestamp(millis: i64, tz: Tz) -> String {
    millis_to_local(millis, tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// `20250305_133000`, used in export filenames
pub fn file_stamp(tz: Tz) -> String {
    now_in(tz).format("%Y%m%d_%H%M%S").to_string()
}

/// Calendar date of a timestamp in the business zone
pub fn local_date(millis: i64, tz: Tz) -> NaiveDate {
    millis_to_local(millis, tz).date_naive()
}

/// Hour of day (0..=23) of a timestamp in the business zone
pub fn local_hour(millis: i64, tz: Tz) -> u32 {
    millis_to_local(millis, tz).hour()
}

/// Date start (00:00) -> Unix millis in the business zone
///
/// Falls back to UTC midnight when local midnight does not exist (DST gap).
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of the next day, for `< end` range queries
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}
