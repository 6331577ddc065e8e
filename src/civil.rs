//! # Civil Date-Time
//!
//! The calculator works on plain civil fields (year, month, day, hour, minute,
//! second) in whatever zone the caller has already aligned to. No time zone is
//! stored or applied here.
//!
//! ## Calendar
//!
//! Dates follow the historical civil calendar used by the Julian-Day
//! algorithms:
//! - **Julian calendar** before 1582-10-15 (every fourth year is a leap year)
//! - **Gregorian calendar** from 1582-10-15 onward
//! - The ten days 1582-10-05 through 1582-10-14 never existed and are rejected
//!
//! Years run from [`MIN_YEAR`] to [`MAX_YEAR`]. Values produced by
//! [`from_julian_day`] may step past those bounds (the next new moon after
//! 9999-12-15 lies in year 10000), but input never does.
//!
//! `chrono` values use the proleptic Gregorian calendar instead. Conversions
//! to and from chrono go through the day count, so the same physical day is
//! preserved even when its field values differ (chrono's 1500-03-09 is the
//! civil 1500-02-28).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::julian::{from_julian_day, to_julian_day};

/// Earliest year accepted as input.
pub const MIN_YEAR: i32 = 1;

/// Latest year accepted as input.
pub const MAX_YEAR: i32 = 9_999;

/// First day of the Gregorian calendar as (year, month, day).
const GREGORIAN_REFORM: (i32, u32, u32) = (1582, 10, 15);

/// Julian Day at midnight before chrono's day 0 (0000-12-31 proleptic Gregorian).
const CE_DAY_ZERO_JD: f64 = 1_721_424.5;

/// Text layouts accepted by [`CivilDateTime::from_str`], tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Errors raised while building a [`CivilDateTime`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CivilTimeError {
    /// Year outside MIN_YEAR..=MAX_YEAR
    #[error("year {0} out of range ({MIN_YEAR}-{MAX_YEAR})")]
    Year(i32),

    /// Month outside 1-12
    #[error("month {0} out of range (1-12)")]
    Month(u32),

    /// Day that does not exist in the given month
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    Day { year: i32, month: u32, day: u32 },

    /// Hour, minute or second outside the clock face
    #[error("time {hour:02}:{minute:02}:{second:02} out of range")]
    Time { hour: u32, minute: u32, second: u32 },

    /// Text that matches none of the accepted layouts
    #[error("cannot parse date-time {0:?} (expected YYYY-MM-DD[ HH:MM[:SS]])")]
    Parse(String),
}

/// A civil date-time with whole-second resolution.
///
/// Fields are validated on construction, so every value handed to the
/// calculator names a real calendar day. Ordering is chronological.
///
/// # Example
/// ```
/// use moon_age_lib::CivilDateTime;
///
/// let noon = CivilDateTime::new(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(noon.to_string(), "2000-01-01 12:00:00");
///
/// // 1582-10-10 was skipped by the Gregorian reform
/// assert!(CivilDateTime::new(1582, 10, 10, 0, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl CivilDateTime {
    /// Build a validated civil date-time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, CivilTimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CivilTimeError::Year(year));
        }
        if !(1..=12).contains(&month) {
            return Err(CivilTimeError::Month(month));
        }
        if day == 0 || day > days_in_month(year, month) || is_reform_gap(year, month, day) {
            return Err(CivilTimeError::Day { year, month, day });
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CivilTimeError::Time {
                hour,
                minute,
                second,
            });
        }
        Ok(Self::from_parts_unchecked(year, month, day, hour, minute, second))
    }

    /// Assemble fields the caller already knows to be valid.
    pub(crate) fn from_parts_unchecked(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// True when the date falls on or after the Gregorian reform.
    pub fn is_gregorian(&self) -> bool {
        (self.year, self.month, self.day) >= GREGORIAN_REFORM
    }

    /// Day of month plus the elapsed fraction of the day.
    pub fn fractional_day(&self) -> f64 {
        self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1_440.0
            + self.second as f64 / 86_400.0
    }

    /// Same date at 00:00:00.
    fn midnight(&self) -> Self {
        Self::from_parts_unchecked(self.year, self.month, self.day, 0, 0, 0)
    }

    /// Convert to chrono's proleptic Gregorian calendar.
    ///
    /// Returns `None` only when the day lies outside chrono's supported range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let days = (to_julian_day(&self.midnight()) - CE_DAY_ZERO_JD).round();
        NaiveDate::from_num_days_from_ce_opt(days as i32)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl TryFrom<NaiveDateTime> for CivilDateTime {
    type Error = CivilTimeError;

    /// Fails when the day falls outside [`MIN_YEAR`]..=[`MAX_YEAR`] in the
    /// civil calendar.
    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let midnight_jd = value.date().num_days_from_ce() as f64 + CE_DAY_ZERO_JD;
        let date = from_julian_day(midnight_jd);
        // Sub-second parts (and leap-second nanos) are dropped
        Self::new(
            date.year,
            date.month,
            date.day,
            value.hour(),
            value.minute(),
            value.second(),
        )
    }
}

impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for CivilDateTime {
    type Error = CivilTimeError;

    /// Takes the wall-clock fields of `value` in its own zone.
    fn try_from(value: DateTime<Tz>) -> Result<Self, Self::Error> {
        value.naive_local().try_into()
    }
}

impl FromStr for CivilDateTime {
    type Err = CivilTimeError;

    /// Parse ISO-8601 style text (`YYYY-MM-DD`, optionally followed by
    /// `HH:MM` or `HH:MM:SS` after a space or `T`). The text is read as
    /// proleptic Gregorian, as ISO 8601 prescribes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        for format in DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
                return parsed.try_into();
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| CivilTimeError::Parse(text.to_string()))?
            .try_into()
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Leap-year rule of the calendar in force during `year`.
fn is_leap_year(year: i32) -> bool {
    if year > GREGORIAN_REFORM.0 {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days dropped by the Gregorian reform (1582-10-05 ..= 1582-10-14).
fn is_reform_gap(year: i32, month: u32, day: u32) -> bool {
    year == GREGORIAN_REFORM.0 && month == GREGORIAN_REFORM.1 && (5..=14).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_fields() {
        assert_eq!(
            CivilDateTime::new(2024, 13, 1, 0, 0, 0),
            Err(CivilTimeError::Month(13))
        );
        assert!(matches!(
            CivilDateTime::new(2023, 2, 29, 0, 0, 0),
            Err(CivilTimeError::Day { .. })
        ));
        assert!(matches!(
            CivilDateTime::new(2024, 4, 31, 0, 0, 0),
            Err(CivilTimeError::Day { .. })
        ));
        assert!(matches!(
            CivilDateTime::new(2024, 1, 1, 24, 0, 0),
            Err(CivilTimeError::Time { .. })
        ));
        assert!(matches!(
            CivilDateTime::new(2024, 1, 1, 0, 0, 60),
            Err(CivilTimeError::Time { .. })
        ));
    }

    #[test]
    fn test_year_range_edges() {
        assert!(CivilDateTime::new(MIN_YEAR, 1, 1, 0, 0, 0).is_ok());
        assert!(CivilDateTime::new(MAX_YEAR, 12, 31, 23, 59, 59).is_ok());
        assert_eq!(
            CivilDateTime::new(0, 12, 31, 0, 0, 0),
            Err(CivilTimeError::Year(0))
        );
        assert_eq!(
            CivilDateTime::new(MAX_YEAR + 1, 1, 1, 0, 0, 0),
            Err(CivilTimeError::Year(10_000))
        );
        assert_eq!(
            CivilDateTime::new(i32::MAX, 12, 31, 12, 0, 0),
            Err(CivilTimeError::Year(i32::MAX))
        );
        assert_eq!(
            CivilDateTime::new(i32::MIN, 1, 1, 0, 0, 0),
            Err(CivilTimeError::Year(i32::MIN))
        );
    }

    #[test]
    fn test_chrono_outside_year_range_is_rejected() {
        let late = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            CivilDateTime::try_from(late),
            Err(CivilTimeError::Year(10_000))
        );
        // Proleptic Gregorian 0000-12-29 is Julian 0000-12-31
        let early = NaiveDate::from_ymd_opt(0, 12, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CivilDateTime::try_from(early), Err(CivilTimeError::Year(0)));
        assert_eq!(
            "10000-01-01".parse::<CivilDateTime>(),
            Err(CivilTimeError::Year(10_000))
        );
    }

    #[test]
    fn test_leap_rules_follow_calendar_in_force() {
        // Gregorian: 1900 is common, 2000 is leap
        assert!(CivilDateTime::new(1900, 2, 29, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2000, 2, 29, 0, 0, 0).is_ok());
        // Julian: 1500 is leap
        assert!(CivilDateTime::new(1500, 2, 29, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_reform_gap() {
        assert!(CivilDateTime::new(1582, 10, 4, 23, 59, 59).is_ok());
        for day in 5..=14 {
            assert!(CivilDateTime::new(1582, 10, day, 0, 0, 0).is_err());
        }
        let reform = CivilDateTime::new(1582, 10, 15, 0, 0, 0).unwrap();
        assert!(reform.is_gregorian());
        assert!(!CivilDateTime::new(1582, 10, 4, 0, 0, 0)
            .unwrap()
            .is_gregorian());
    }

    #[test]
    fn test_fractional_day() {
        let t = CivilDateTime::new(2024, 3, 10, 18, 0, 0).unwrap();
        assert!((t.fractional_day() - 10.75).abs() < 1e-12);
    }

    #[test]
    fn test_chrono_roundtrip_modern() {
        let naive = NaiveDate::from_ymd_opt(2024, 8, 19)
            .unwrap()
            .and_hms_opt(18, 26, 5)
            .unwrap();
        let civil = CivilDateTime::try_from(naive).unwrap();
        assert_eq!(civil, CivilDateTime::new(2024, 8, 19, 18, 26, 5).unwrap());
        assert_eq!(civil.to_naive(), Some(naive));
    }

    #[test]
    fn test_chrono_conversion_before_reform() {
        // Proleptic Gregorian 1500-03-09 is Julian 1500-02-28
        let naive = NaiveDate::from_ymd_opt(1500, 3, 9)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let civil = CivilDateTime::try_from(naive).unwrap();
        assert_eq!(civil, CivilDateTime::new(1500, 2, 28, 6, 0, 0).unwrap());
        assert_eq!(civil.to_naive(), Some(naive));

        // Julian-only leap day maps onto a real chrono date
        let leap = CivilDateTime::new(1500, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(
            leap.to_naive().map(|n| n.date()),
            NaiveDate::from_ymd_opt(1500, 3, 10)
        );
    }

    #[test]
    fn test_from_zoned_datetime_uses_wall_clock() {
        use chrono::{FixedOffset, Utc};

        let utc = Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap();
        let tokyo = utc.with_timezone(&FixedOffset::east_opt(9 * 3600).unwrap());
        let civil = CivilDateTime::try_from(tokyo).unwrap();
        assert_eq!(civil, CivilDateTime::new(2024, 1, 11, 20, 57, 0).unwrap());
    }

    #[test]
    fn test_parse_layouts() {
        let expected = CivilDateTime::new(2024, 1, 11, 11, 57, 30).unwrap();
        assert_eq!("2024-01-11T11:57:30".parse(), Ok(expected));
        assert_eq!(" 2024-01-11 11:57:30 ".parse(), Ok(expected));

        let minutes = CivilDateTime::new(2024, 1, 11, 11, 57, 0).unwrap();
        assert_eq!("2024-01-11 11:57".parse(), Ok(minutes));
        assert_eq!("2024-01-11T11:57".parse(), Ok(minutes));

        let midnight = CivilDateTime::new(2024, 1, 11, 0, 0, 0).unwrap();
        assert_eq!("2024-01-11".parse(), Ok(midnight));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "yesterday".parse::<CivilDateTime>(),
            Err(CivilTimeError::Parse(_))
        ));
        assert!("2023-02-29".parse::<CivilDateTime>().is_err());
    }

    #[test]
    fn test_display_and_ordering() {
        let a = CivilDateTime::new(999, 1, 2, 3, 4, 5).unwrap();
        let b = CivilDateTime::new(999, 1, 2, 3, 4, 6).unwrap();
        assert_eq!(a.to_string(), "0999-01-02 03:04:05");
        assert!(a < b);
    }
}
