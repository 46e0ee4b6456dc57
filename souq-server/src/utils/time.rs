//! Time helpers — business-timezone calendar math
//!
//! Quota windows are calendar months in the business timezone; repository
//! layers only ever see `i64` unix millis.

use chrono::{Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Bounds of the calendar month containing `at_millis`, in `tz`.
///
/// Returns `(start, end)` unix millis; callers use `>= start AND < end`
/// semantics. A product created at 23:59:59 on the last day of a month
/// falls inside that month, not the next.
///
/// DST gap fallback: if local midnight does not exist, fall back to UTC.
pub fn month_bounds_millis(at_millis: i64, tz: Tz) -> (i64, i64) {
    let at = Utc
        .timestamp_millis_opt(at_millis)
        .single()
        .unwrap_or_else(Utc::now)
        .with_timezone(&tz);

    let (year, month) = (at.year(), at.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    (
        local_midnight_millis(year, month, tz),
        local_midnight_millis(next_year, next_month, tz),
    )
}

/// First-of-month 00:00:00 in `tz` as unix millis
fn local_midnight_millis(year: i32, month: u32, tz: Tz) -> i64 {
    let naive = chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Africa::Cairo;

    #[test]
    fn month_bounds_contain_timestamp() {
        let now = shared::util::now_millis();
        let (start, end) = month_bounds_millis(now, Cairo);
        assert!(start <= now && now < end);
    }

    #[test]
    fn last_second_of_month_stays_in_month() {
        // 2025-03-31 23:59:59 Cairo local time
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 3, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_local_timezone(Cairo)
            .latest()
            .unwrap()
            .timestamp_millis();
        let (start, end) = month_bounds_millis(ts, Cairo);
        assert!(start <= ts && ts < end);

        // One second later rolls into April's window
        let (april_start, _) = month_bounds_millis(ts + 1000, Cairo);
        assert_eq!(april_start, end);
    }

    #[test]
    fn december_rolls_into_january() {
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 12, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Cairo)
            .latest()
            .unwrap()
            .timestamp_millis();
        let (start, end) = month_bounds_millis(ts, Cairo);
        assert!(start <= ts && ts < end);
        // End is January 1st of the next year
        let end_dt = Utc
            .timestamp_millis_opt(end)
            .single()
            .unwrap()
            .with_timezone(&Cairo);
        assert_eq!((end_dt.year(), end_dt.month(), end_dt.day()), (2026, 1, 1));
    }
}
