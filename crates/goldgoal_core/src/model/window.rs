//! Period window arithmetic.
//!
//! # Responsibility
//! - Translate a `Period` and an anchor instant into an inclusive time range.
//! - Shift windows back by whole periods for historical series.
//!
//! # Invariants
//! - Daily windows are aligned to local midnight of the anchor's offset and
//!   end at 23:59:59.999999999 of the same local day, so the whole last
//!   second belongs to the day.
//! - Weekly and monthly windows are rolling: they end at the anchor instant
//!   and look back 7 days / 1 calendar month. They are NOT aligned to
//!   calendar weeks or months.
//! - `historical(p, now, 0) == current(p, now)`.
//! - Arithmetic overflow saturates to `DateTime::<Utc>::MIN_UTC` instead of
//!   panicking.

use crate::model::period::Period;
use chrono::{DateTime, Days, FixedOffset, Months, TimeDelta, Utc};

const DAYS_PER_WEEK: i64 = 7;
const LAST_NANO: u32 = 999_999_999;

/// Inclusive `[start, end]` time range used for progress aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns the active window for `period` relative to `now`.
    pub fn current(period: Period, now: DateTime<FixedOffset>) -> Self {
        Self::historical(period, now, 0)
    }

    /// Returns the window `periods_back` whole periods before the current one.
    ///
    /// - Day: the local day `periods_back` days before today.
    /// - Week: `[now - 7*(n+1) days, now - 7*n days]`.
    /// - Month: `[now - (n+1) months, now - n months]`.
    ///
    /// Adjacent weekly/monthly windows share their boundary instant.
    pub fn historical(period: Period, now: DateTime<FixedOffset>, periods_back: u32) -> Self {
        match period {
            Period::Day => day_window(now, periods_back),
            Period::Week => {
                let back = i64::from(periods_back);
                Self::new(
                    minus_days(now, DAYS_PER_WEEK * (back + 1)),
                    minus_days(now, DAYS_PER_WEEK * back),
                )
            }
            Period::Month => Self::new(
                minus_months(now, periods_back.checked_add(1)),
                minus_months(now, Some(periods_back)),
            ),
        }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn day_window(now: DateTime<FixedOffset>, days_back: u32) -> PeriodWindow {
    let offset = *now.offset();
    let bounds = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(days_back)))
        .and_then(|day| {
            let start = day
                .and_hms_opt(0, 0, 0)?
                .and_local_timezone(offset)
                .single()?;
            let end = day
                .and_hms_nano_opt(23, 59, 59, LAST_NANO)?
                .and_local_timezone(offset)
                .single()?;
            Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
        });

    match bounds {
        Some((start, end)) => PeriodWindow::new(start, end),
        None => PeriodWindow::new(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MIN_UTC),
    }
}

fn minus_days(now: DateTime<FixedOffset>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn minus_months(now: DateTime<FixedOffset>, months: Option<u32>) -> DateTime<Utc> {
    months
        .and_then(|months| now.checked_sub_months(Months::new(months)))
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::PeriodWindow;
    use crate::model::period::Period;
    use chrono::{DateTime, FixedOffset, Utc};

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn utc(value: &str) -> DateTime<Utc> {
        at(value).with_timezone(&Utc)
    }

    #[test]
    fn day_window_is_aligned_to_local_midnight() {
        let window = PeriodWindow::current(Period::Day, at("2026-10-17T08:30:00+02:00"));
        assert_eq!(window.start, utc("2026-10-17T00:00:00+02:00"));
        assert_eq!(window.end, utc("2026-10-17T23:59:59.999999999+02:00"));
    }

    #[test]
    fn week_window_is_rolling_seven_days() {
        let now = at("2026-10-17T08:30:00+00:00");
        let window = PeriodWindow::current(Period::Week, now);
        assert_eq!(window.start, utc("2026-10-10T08:30:00+00:00"));
        assert_eq!(window.end, utc("2026-10-17T08:30:00+00:00"));
    }

    #[test]
    fn month_window_clamps_to_end_of_shorter_month() {
        let window = PeriodWindow::current(Period::Month, at("2026-03-31T12:00:00+00:00"));
        assert_eq!(window.start, utc("2026-02-28T12:00:00+00:00"));
        assert_eq!(window.end, utc("2026-03-31T12:00:00+00:00"));
    }

    #[test]
    fn historical_windows_shift_by_whole_periods() {
        let now = at("2026-10-17T08:30:00+00:00");

        let day = PeriodWindow::historical(Period::Day, now, 2);
        assert_eq!(day.start, utc("2026-10-15T00:00:00+00:00"));
        assert_eq!(day.end, utc("2026-10-15T23:59:59.999999999+00:00"));

        let week = PeriodWindow::historical(Period::Week, now, 1);
        assert_eq!(week.start, utc("2026-10-03T08:30:00+00:00"));
        assert_eq!(week.end, utc("2026-10-10T08:30:00+00:00"));

        let month = PeriodWindow::historical(Period::Month, now, 2);
        assert_eq!(month.start, utc("2026-07-17T08:30:00+00:00"));
        assert_eq!(month.end, utc("2026-08-17T08:30:00+00:00"));
    }

    #[test]
    fn historical_zero_matches_current_for_every_period() {
        let now = at("2026-10-17T23:59:59.500+05:30");
        for period in Period::ALL {
            assert_eq!(
                PeriodWindow::historical(period, now, 0),
                PeriodWindow::current(period, now)
            );
        }
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let window = PeriodWindow::new(
            utc("2026-10-17T00:00:00+00:00"),
            utc("2026-10-17T23:59:59+00:00"),
        );
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(utc("2026-10-16T23:59:59.999+00:00")));
        assert!(!window.contains(utc("2026-10-17T23:59:59.001+00:00")));
    }

    #[test]
    fn day_window_covers_the_whole_last_second() {
        let window = PeriodWindow::current(Period::Day, at("2026-10-17T23:59:59.500+00:00"));
        assert!(window.contains(utc("2026-10-17T23:59:59.500+00:00")));
        assert!(window.contains(utc("2026-10-17T23:59:59.999999999+00:00")));
        assert!(!window.contains(utc("2026-10-18T00:00:00+00:00")));
    }

    #[test]
    fn huge_lookback_saturates_instead_of_panicking() {
        let now = at("2026-10-17T08:30:00+00:00");
        let window = PeriodWindow::historical(Period::Month, now, u32::MAX);
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
    }
}
