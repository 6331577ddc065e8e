//! # Moon Age Core Library
//!
//! This library computes the Moon's age, illuminated fraction, phase name and
//! the next new and full moons for any civil date-time. Every calculation is a
//! pure function of its input: no clock reads, no shared state, no I/O.
//!
//! ## Design Philosophy
//!
//! ### Mean-Element Model
//! - **Cheap and deterministic**: a handful of polynomial terms, no series
//!   expansions, no lookup tables
//! - **Display accuracy**: about half a day for age and a few percent for
//!   illumination, plenty for a status bar or a terminal report
//! - **Two independent models**: age comes from the mean synodic month,
//!   illumination from the mean Sun–Moon elongation, so each can be checked on
//!   its own against reference values
//!
//! ### Data Flow
//! 1. **Convert**: civil date-time → Julian Day ([`julian`])
//! 2. **Ephemeris**: Julian Day → mean age, phase angle, illumination ([`lunar`])
//! 3. **Classify**: mean age → one of eight phases ([`phase`])
//! 4. **Predict**: next new moon and next full moon ([`events`])
//! 5. **Convert back**: event Julian Days → civil date-times ([`julian`])
//!
//! ### Time Zones
//! The core never converts zones. Callers align "now" (or any instant) to the
//! zone they want to display and hand over the wall-clock fields as a
//! [`CivilDateTime`]; results come back in that same zone.
//!
//! ## Core Types
//! - [`CivilDateTime`]: validated civil date-time input
//! - [`MoonAgeInfo`]: rounded, display-ready result
//! - [`lunar::LunarEphemeris`]: the same quantities at full precision

use serde::Serialize;

pub mod civil;
pub mod config;
pub mod events;
pub mod julian;
pub mod lunar;
pub mod phase;
pub mod renderer;

pub use civil::{CivilDateTime, CivilTimeError};
pub use julian::{from_julian_day, to_julian_day};
pub use lunar::{LunarEphemeris, SYNODIC_MONTH};
pub use phase::MoonPhase;

/// Moon state for one instant, rounded for display.
///
/// Age and illumination are rounded to two decimals; use
/// [`LunarEphemeris::at`] when full precision matters.
///
/// # Example
/// ```
/// use moon_age_lib::{calculate_moon_age, CivilDateTime, MoonPhase};
///
/// // New moon of 2024-01-11, 11:57 UTC
/// let instant = CivilDateTime::new(2024, 1, 11, 11, 57, 0).unwrap();
/// let info = calculate_moon_age(instant);
///
/// assert_eq!(info.phase, MoonPhase::NewMoon);
/// assert!(info.illumination < 5.0);
/// assert!(info.next_full_moon > instant);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MoonAgeInfo {
    /// Days since the last mean new moon, in [0, 29.53]
    pub age: f64,
    /// Illuminated percentage, in [0, 100]
    pub illumination: f64,
    /// Phase bucket for the unrounded age
    pub phase: MoonPhase,
    /// Next mean new moon, in the caller's zone
    pub next_new_moon: CivilDateTime,
    /// Next full moon, in the caller's zone
    pub next_full_moon: CivilDateTime,
}

impl From<LunarEphemeris> for MoonAgeInfo {
    fn from(eph: LunarEphemeris) -> Self {
        MoonAgeInfo {
            age: round_to_hundredths(eph.age_days),
            illumination: round_to_hundredths(eph.illum_frac * 100.0).clamp(0.0, 100.0),
            phase: eph.phase,
            next_new_moon: from_julian_day(eph.next_new_moon_jd),
            next_full_moon: from_julian_day(eph.next_full_moon_jd),
        }
    }
}

/// Compute the moon age report for `instant`.
///
/// Pure: the same instant always yields the same result, and the call is
/// safe from any number of threads.
pub fn calculate_moon_age(instant: CivilDateTime) -> MoonAgeInfo {
    LunarEphemeris::at(to_julian_day(&instant)).into()
}

/// Compute the moon age report for the current system-local wall-clock time.
///
/// Fails only if the system clock lies outside the supported year range.
pub fn calculate_moon_age_now() -> Result<MoonAgeInfo, CivilTimeError> {
    Ok(calculate_moon_age(chrono::Local::now().try_into()?))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
