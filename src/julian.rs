//! # Calendar ↔ Julian Day
//!
//! Meeus' algorithms ("Astronomical Algorithms", ch. 7) for turning a civil
//! date-time into a continuous day count and back.
//!
//! - Julian calendar before 1582-10-15, Gregorian from then on, in both
//!   directions
//! - Time of day lives in the fractional part (JD starts at noon, so
//!   midnight ends in `.5`)
//! - The inverse rounds to the nearest whole second
//!
//! The inverse is total: Julian Days beyond ±[`JDN_LIMIT`] (about 1.37 billion
//! years) saturate to the limit, so the resulting year always fits in `i32`.

use crate::civil::CivilDateTime;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000: f64 = 2_451_545.0;

/// First Julian Day number of the Gregorian calendar (1582-10-15).
pub const GREGORIAN_CUTOVER_JDN: i64 = 2_299_161;

/// Largest Julian Day number magnitude [`from_julian_day`] resolves.
pub const JDN_LIMIT: i64 = 500_000_000_000;

const SECONDS_PER_DAY: i64 = 86_400;

/// Convert a civil date-time to a Julian Day.
///
/// # Example
/// ```
/// use moon_age_lib::{julian::to_julian_day, CivilDateTime};
///
/// let j2000 = CivilDateTime::new(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(to_julian_day(&j2000), 2_451_545.0);
/// ```
pub fn to_julian_day(instant: &CivilDateTime) -> f64 {
    // Jan/Feb count as months 13/14 of the previous year
    let (mut year, mut month) = (instant.year() as i64, instant.month() as i64);
    if month < 3 {
        year -= 1;
        month += 12;
    }

    let century_correction = if instant.is_gregorian() {
        let century = year.div_euclid(100);
        2 - century + century.div_euclid(4)
    } else {
        0
    };

    (365.25 * (year + 4716) as f64).floor()
        + (30.6001 * (month + 1) as f64).floor()
        + instant.fractional_day()
        + century_correction as f64
        - 1524.5
}

/// Convert a Julian Day back to a civil date-time.
///
/// The time of day is rounded to the nearest second; a value that rounds up
/// to 24:00:00 rolls over to 00:00:00 of the next day. Days outside
/// ±[`JDN_LIMIT`] saturate to midnight of the limit day; NaN maps to the
/// lower limit.
pub fn from_julian_day(jd: f64) -> CivilDateTime {
    let shifted = jd + 0.5;
    let whole = shifted.floor();
    let limit = JDN_LIMIT as f64;
    let (mut z, mut seconds) = if (-limit..=limit).contains(&whole) {
        let seconds = ((shifted - whole) * SECONDS_PER_DAY as f64).round() as i64;
        (whole as i64, seconds)
    } else if whole > 0.0 {
        (JDN_LIMIT, 0)
    } else {
        (-JDN_LIMIT, 0)
    };
    if seconds >= SECONDS_PER_DAY {
        z += 1;
        seconds -= SECONDS_PER_DAY;
    }

    let a = if z < GREGORIAN_CUTOVER_JDN {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    };

    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = b - d - (30.6001 * e as f64).floor() as i64;
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };
    let year = i32::try_from(year).unwrap_or(if year > 0 { i32::MAX } else { i32::MIN });

    CivilDateTime::from_parts_unchecked(
        year,
        month as u32,
        day as u32,
        (seconds / 3600) as u32,
        (seconds % 3600 / 60) as u32,
        (seconds % 60) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> CivilDateTime {
        CivilDateTime::new(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_meeus_reference_values() {
        assert_eq!(to_julian_day(&civil(2000, 1, 1, 12, 0, 0)), J2000);
        // Sputnik launch, Meeus example 7.a
        let sputnik = to_julian_day(&civil(1957, 10, 4, 19, 26, 24));
        assert!((sputnik - 2_436_116.31).abs() < 1e-6, "got {sputnik}");
        // Julian calendar date, Meeus example 7.b
        assert_eq!(to_julian_day(&civil(333, 1, 27, 12, 0, 0)), 1_842_713.0);
    }

    #[test]
    fn test_reform_days_are_consecutive() {
        let last_julian = to_julian_day(&civil(1582, 10, 4, 0, 0, 0));
        let first_gregorian = to_julian_day(&civil(1582, 10, 15, 0, 0, 0));
        assert_eq!(first_gregorian - last_julian, 1.0);
        assert_eq!(first_gregorian, 2_299_160.5);
    }

    #[test]
    fn test_inverse_reference_values() {
        assert_eq!(from_julian_day(J2000), civil(2000, 1, 1, 12, 0, 0));
        assert_eq!(from_julian_day(2_436_116.31), civil(1957, 10, 4, 19, 26, 24));
        assert_eq!(from_julian_day(1_842_713.0), civil(333, 1, 27, 12, 0, 0));
        // Meeus example 7.c
        assert_eq!(from_julian_day(2_436_116.31).day(), 4);
        assert_eq!(from_julian_day(1_507_900.13).year(), -584);
    }

    #[test]
    fn test_inverse_takes_julian_branch_before_cutover() {
        assert_eq!(from_julian_day(2_299_159.5), civil(1582, 10, 4, 0, 0, 0));
        assert_eq!(from_julian_day(2_299_160.5), civil(1582, 10, 15, 0, 0, 0));
        // Julian-only leap day
        let leap = civil(1500, 2, 29, 6, 30, 0);
        assert_eq!(from_julian_day(to_julian_day(&leap)), leap);
    }

    #[test]
    fn test_inverse_rounds_to_nearest_second() {
        let noon = to_julian_day(&civil(2024, 6, 30, 12, 0, 0));
        assert_eq!(from_julian_day(noon - 0.4 / 86_400.0), civil(2024, 6, 30, 12, 0, 0));

        // 23:59:59.8 rolls over into the next month
        let almost_midnight = to_julian_day(&civil(2024, 6, 30, 23, 59, 59)) + 0.8 / 86_400.0;
        assert_eq!(from_julian_day(almost_midnight), civil(2024, 7, 1, 0, 0, 0));
    }

    #[test]
    fn test_roundtrip_leap_day_and_year_end() {
        for instant in [
            civil(2024, 2, 29, 23, 59, 59),
            civil(1999, 12, 31, 23, 59, 59),
            civil(2100, 3, 1, 0, 0, 0),
            civil(1, 1, 1, 0, 0, 0),
            civil(9999, 12, 31, 23, 59, 59),
        ] {
            assert_eq!(from_julian_day(to_julian_day(&instant)), instant);
        }
    }

    #[test]
    fn test_inverse_saturates_huge_julian_days() {
        let far_future = from_julian_day(1e300);
        assert_eq!(far_future, from_julian_day(f64::MAX));
        assert_eq!(far_future, from_julian_day(f64::INFINITY));
        // Midnight opening the limit day
        assert_eq!(far_future, from_julian_day(JDN_LIMIT as f64 - 0.5));
        assert_eq!(far_future.year(), 1_368_948_791);
        assert_eq!((far_future.month(), far_future.day()), (5, 24));

        let far_past = from_julian_day(-1e300);
        assert_eq!(far_past, from_julian_day(f64::MIN));
        assert_eq!(far_past, from_julian_day(f64::NAN));
        assert_eq!(far_past.year(), -1_368_930_106);
        assert!(far_past < far_future);
    }

    #[test]
    fn test_inverse_stays_ordered_near_limit() {
        let last = from_julian_day(JDN_LIMIT as f64);
        let before = from_julian_day(JDN_LIMIT as f64 - 1.0);
        assert!(before < last);
        assert_eq!((before.hour(), last.hour()), (12, 12));
        assert_eq!(last, from_julian_day(to_julian_day(&last)));
    }
}
