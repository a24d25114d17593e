//! Fixed day stride.

use chrono::Days;

use nextdate_core::{Date, RecurrenceError, Result};

/// First date `last + k * interval` (k >= 1) on or after `now`.
///
/// The stride count is computed directly rather than stepping one interval
/// at a time, which matters when `last` lies decades in the past.
pub fn next_daily(now: Date, last: Date, interval: u32) -> Result<Date> {
    let stride = i64::from(interval.max(1));
    let steps = if last >= now {
        1
    } else {
        let gap = (now - last).num_days();
        ((gap + stride - 1) / stride).max(1)
    };

    last.checked_add_days(Days::new((steps * stride) as u64))
        .ok_or(RecurrenceError::DateOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextdate_core::parse_date;

    fn d(s: &str) -> Date {
        parse_date(s).unwrap()
    }

    #[test]
    fn lands_exactly_on_now() {
        // 2024-01-01 + 60 days = 2024-03-01 (leap February).
        assert_eq!(next_daily(d("20240301"), d("20240101"), 5).unwrap(), d("20240301"));
    }

    #[test]
    fn overshoots_to_next_stride() {
        assert_eq!(next_daily(d("20240302"), d("20240101"), 5).unwrap(), d("20240306"));
    }

    #[test]
    fn always_steps_at_least_once() {
        assert_eq!(next_daily(d("20240101"), d("20240101"), 1).unwrap(), d("20240102"));
        assert_eq!(next_daily(d("20240101"), d("20240110"), 7).unwrap(), d("20240117"));
    }

    #[test]
    fn crosses_leap_february() {
        assert_eq!(next_daily(d("20240228"), d("20240227"), 2).unwrap(), d("20240229"));
        assert_eq!(next_daily(d("20230228"), d("20230227"), 2).unwrap(), d("20230301"));
    }

    #[test]
    fn crosses_year_end() {
        assert_eq!(next_daily(d("20231231"), d("20231201"), 45).unwrap(), d("20240115"));
    }

    #[test]
    fn far_past_last_date() {
        // 1900-01-01 .. 2024-01-01 is 45290 days; next multiple of 400 is 45600.
        assert_eq!(next_daily(d("20240101"), d("19000101"), 400).unwrap(), d("20241106"));
    }
}
