//! Date-axis tick sampling.
//!
//! Ticks always sit at local noon so that a bar spanning a whole day is
//! centered under its label.

use crate::models::DateRange;
use chrono::{DateTime, NaiveDate, TimeZone};

/// Tick count used when the caller has no preference.
pub const DEFAULT_TICK_COUNT: usize = 6;

/// Local noon of `day` in `tz`. For an ambiguous noon the earlier instant wins;
/// a noon that falls into a DST gap has no instant and yields `None`.
pub fn local_noon<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&day.and_hms_opt(12, 0, 0)?).earliest()
}

/// Extract up to `count` evenly strided tick dates from `range`.
///
/// Every calendar day from the first to the last day of the range (inclusive,
/// as seen in `tz`) is enumerated at noon, then every n-th day is kept, where
/// `n = days / (count - 1)`. The first tick is always noon of the first day;
/// the last day is only included when the days divide evenly.
///
/// Returns an empty vector when there is no range, when `count` is zero, or
/// when less than two whole days elapse across the range in `tz`. `count == 1`
/// yields only the first day.
pub fn x_axis_date_values<Tz: TimeZone>(
    count: usize,
    range: Option<&DateRange>,
    tz: &Tz,
) -> Vec<DateTime<Tz>> {
    let Some(range) = range else {
        return Vec::new();
    };
    if count == 0 || range.day_span(tz) < 2 {
        return Vec::new();
    }

    let (first, last) = range.local_days(tz);
    let days: Vec<DateTime<Tz>> = first
        .iter_days()
        .take_while(|d| *d <= last)
        .filter_map(|d| local_noon(d, tz))
        .collect();

    if count == 1 {
        return days.into_iter().take(1).collect();
    }

    let stride = (days.len() / (count - 1)).max(1);
    days.into_iter().step_by(stride).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, FixedOffset, Timelike, Utc};

    fn range(start: i64, end: i64) -> DateRange {
        DateRange::new(
            DateTime::from_timestamp(start, 0).unwrap(),
            DateTime::from_timestamp(end, 0).unwrap(),
        )
        .unwrap()
    }

    const DAY: i64 = 86_400;
    // 2024-10-15 16:00:13 UTC
    const T0: i64 = 1_729_008_013;

    #[test]
    fn no_range_or_zero_count_is_empty() {
        assert!(x_axis_date_values(6, None, &Utc).is_empty());
        assert!(x_axis_date_values(0, Some(&range(T0, T0 + 10 * DAY)), &Utc).is_empty());
    }

    #[test]
    fn short_ranges_are_empty() {
        assert!(x_axis_date_values(6, Some(&range(T0, T0)), &Utc).is_empty());
        assert!(x_axis_date_values(6, Some(&range(T0, T0 + DAY)), &Utc).is_empty());
        assert!(!x_axis_date_values(6, Some(&range(T0, T0 + 2 * DAY)), &Utc).is_empty());
    }

    #[test]
    fn span_under_two_days_is_empty_even_across_three_dates() {
        // 23:00 on the 15th to 01:00 on the 17th: 26 hours
        let r = range(1_729_033_200, 1_729_033_200 + 26 * 3600);
        assert_eq!(r.local_days(&Utc).1 - r.local_days(&Utc).0, Duration::days(2));
        assert!(x_axis_date_values(6, Some(&r), &Utc).is_empty());
    }

    #[test]
    fn ticks_stay_at_noon_across_dst_end() {
        let ny = chrono_tz::America::New_York;
        let start = ny.with_ymd_and_hms(2024, 10, 30, 12, 0, 0).unwrap();
        let end = ny.with_ymd_and_hms(2024, 11, 8, 12, 0, 0).unwrap();
        let r = DateRange::new(start.with_timezone(&Utc), end.with_timezone(&Utc)).unwrap();

        let ticks = x_axis_date_values(10, Some(&r), &ny);
        assert_eq!(ticks.len(), 10);
        assert!(ticks.iter().all(|t| t.hour() == 12 && t.minute() == 0));

        // Clocks fall back on Nov 3, so that day is 25 hours long
        let day = |d: u32| ticks.iter().position(|t| t.day() == d).unwrap();
        let (nov2, nov3) = (day(2), day(3));
        assert_eq!(ticks[nov3] - ticks[nov2], Duration::hours(25));
        assert_eq!(ticks[nov3 + 1] - ticks[nov3], Duration::hours(24));
    }

    #[test]
    fn single_tick_is_first_noon() {
        let ticks = x_axis_date_values(1, Some(&range(T0, T0 + 30 * DAY)), &Utc);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].to_rfc3339(), "2024-10-15T12:00:00+00:00");
    }

    #[test]
    fn ticks_are_increasing_noons_capped_at_count() {
        for days in 2..40 {
            for count in 2..12 {
                let r = range(T0, T0 + days * DAY);
                let ticks = x_axis_date_values(count, Some(&r), &Utc);
                assert!(!ticks.is_empty());
                assert!(ticks.len() <= count, "{days} days / {count} ticks");
                assert!(ticks.windows(2).all(|w| w[0] < w[1]));
                assert!(ticks.iter().all(|t| t.hour() == 12 && t.minute() == 0));
                assert_eq!(ticks[0].date_naive(), r.start().date_naive());
            }
        }
    }

    #[test]
    fn more_ticks_than_days_returns_every_day() {
        let ticks = x_axis_date_values(20, Some(&range(T0, T0 + 3 * DAY)), &Utc);
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[1] - ticks[0], Duration::days(1));
    }

    #[test]
    fn noon_is_local_to_the_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let ticks = x_axis_date_values(3, Some(&range(T0, T0 + 10 * DAY)), &tokyo);
        // 16:00 UTC is already the 16th in Tokyo
        assert_eq!(ticks[0].to_rfc3339(), "2024-10-16T12:00:00+09:00");
        assert!(ticks.iter().all(|t| t.hour() == 12));
    }
}
