//! Date/time utilities: the run clock and the recency cutoff.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Source of "now" for a run.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Subtract calendar months and days from `now`, normalizing overflow.
///
/// The month and day fields are decremented independently and the resulting
/// date is normalized, so March 31 minus one month and one day is
/// "February 30", which becomes March 2 (March 1 in leap years). The
/// time of day is kept.
///
/// Fields are taken in UTC, not the host's local zone. Near a month boundary
/// this can land a day away from a local-zone shift: 2024-04-01T05:00+09:00
/// is 2024-03-31T20:00Z, which shifts to 2024-03-01T20:00Z, whereas shifting
/// in local time gives 2024-02-29T05:00+09:00.
pub fn shift_back(now: DateTime<Utc>, months: u32, days: u32) -> DateTime<Utc> {
    let months_index = i64::from(now.year()) * 12 + i64::from(now.month0()) - i64::from(months);
    let year = months_index.div_euclid(12) as i32;
    let month = months_index.rem_euclid(12) as u32 + 1;

    let day_offset = i64::from(now.day()) - 1 - i64::from(days);

    // The first of any month in chrono's range is valid; fall back to a plain
    // duration subtraction only at the edges of the representable range.
    match NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_signed(Duration::days(day_offset)))
    {
        Some(date) => date.and_time(now.time()).and_utc(),
        None => now - Duration::days(i64::from(months) * 30 + i64::from(days)),
    }
}

/// Compute the recency cutoff for a run.
pub fn cutoff(clock: &dyn Clock, months: u32, days: u32) -> DateTime<Utc> {
    shift_back(clock.now(), months, days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_shift_back_mid_month() {
        let now = utc(2024, 6, 15, 10, 30, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2024, 5, 14, 10, 30, 0));
    }

    #[test]
    fn test_shift_back_first_of_month() {
        // June 1 -> May 0 -> April 30
        let now = utc(2024, 6, 1, 0, 0, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2024, 4, 30, 0, 0, 0));
    }

    #[test]
    fn test_shift_back_across_year() {
        let now = utc(2024, 1, 10, 8, 0, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2023, 12, 9, 8, 0, 0));
    }

    #[test]
    fn test_shift_back_normalizes_short_month() {
        // March 31 -> February 30 -> March 2 (2023 is not a leap year)
        let now = utc(2023, 3, 31, 12, 0, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2023, 3, 2, 12, 0, 0));

        // Leap year: February 30 -> March 1
        let now = utc(2024, 3, 31, 12, 0, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2024, 3, 1, 12, 0, 0));
    }

    #[test]
    fn test_shift_back_uses_utc_fields() {
        // 2024-04-01T05:00+09:00
        let now = utc(2024, 3, 31, 20, 0, 0);
        assert_eq!(shift_back(now, 1, 1), utc(2024, 3, 1, 20, 0, 0));
    }

    #[test]
    fn test_shift_back_zero() {
        let now = utc(2024, 6, 15, 10, 30, 0);
        assert_eq!(shift_back(now, 0, 0), now);
    }

    #[test]
    fn test_cutoff_uses_clock() {
        let clock = FixedClock(utc(2024, 6, 15, 0, 0, 0));
        assert_eq!(cutoff(&clock, 1, 1), utc(2024, 5, 14, 0, 0, 0));
        assert_eq!(cutoff(&clock, 0, 7), utc(2024, 6, 8, 0, 0, 0));
    }

    #[test]
    fn test_system_clock_advances() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
