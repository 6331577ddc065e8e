//! Mean-element lunar ephemeris: Moon age, phase angle & illuminated fraction.
//!
//! Accuracy: about half a day for age, a few percent for illumination.
//! Only the dominant mean longitudes are used; no perturbation series,
//! apsidal precession or nutation.
//! References: Meeus, "Astronomical Algorithms" 2nd ed., ch. 47-49.

use core::f64::consts::TAU;

use crate::events::{next_full_moon, next_new_moon};
use crate::julian::J2000;
use crate::phase::{determine_moon_phase, MoonPhase};

/// Mean synodic month in days (new moon to new moon).
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Days from J2000.0 to the first mean new moon after it (JDE 2451550.09766).
///
/// Moon age counts from this lunation so that age 0 coincides with the
/// minimum of the phase-angle illumination model.
pub const NEW_MOON_OFFSET_DAYS: f64 = 5.097_66;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Full-precision lunar state for one Julian Day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarEphemeris {
    /// Julian Day the state was computed for.
    pub julian_day: f64,
    /// Mean age in days since New, in [0, SYNODIC_MONTH).
    pub age_days: f64,
    /// Sun–Earth–Moon phase angle in radians, in [0, 2π).
    pub phase_angle: f64,
    /// Illuminated fraction (0–1).
    pub illum_frac: f64,
    /// Discrete phase bucket for `age_days`.
    pub phase: MoonPhase,
    /// Julian Day of the next mean new moon (strictly after `julian_day`).
    pub next_new_moon_jd: f64,
    /// Julian Day of the next full moon (strictly after `julian_day`).
    pub next_full_moon_jd: f64,
}

impl LunarEphemeris {
    /// Compute every lunar quantity for `jd`.
    pub fn at(jd: f64) -> Self {
        let age_days = mean_moon_age(jd);
        let phase_angle = moon_phase_angle(jd);
        let illum_frac = moon_illumination(phase_angle);

        LunarEphemeris {
            julian_day: jd,
            age_days,
            phase_angle,
            illum_frac,
            phase: determine_moon_phase(age_days, illum_frac),
            next_new_moon_jd: next_new_moon(jd),
            next_full_moon_jd: next_full_moon(jd),
        }
    }
}

/// Mean Moon age in days: time elapsed in the current synodic cycle.
///
/// Always in `[0, SYNODIC_MONTH)` for finite `jd`.
pub fn mean_moon_age(jd: f64) -> f64 {
    let days_since_j2000 = jd - J2000;
    normalize(days_since_j2000 - NEW_MOON_OFFSET_DAYS, SYNODIC_MONTH)
}

/// Phase angle (radians, `[0, 2π)`) from the mean ecliptic longitudes of Sun and Moon.
///
/// 0 is full, π is new.
pub fn moon_phase_angle(jd: f64) -> f64 {
    let t = (jd - J2000) / DAYS_PER_JULIAN_CENTURY;

    let sun_lon = (280.4665 + 36_000.7698 * t) % 360.0;
    let moon_lon = (218.3165 + 481_267.8813 * t) % 360.0;

    normalize((moon_lon - sun_lon - 180.0).to_radians(), TAU)
}

/// Illuminated fraction (0–1) for a phase angle in radians.
pub fn moon_illumination(phase_angle: f64) -> f64 {
    ((1.0 + phase_angle.cos()) / 2.0).clamp(0.0, 1.0)
}

/// Reduce `value` into `[0, modulus)`.
///
/// A tiny negative remainder can round up to exactly `modulus` once shifted;
/// that case wraps to 0.
pub(crate) fn normalize(value: f64, modulus: f64) -> f64 {
    let mut rem = value % modulus;
    if rem < 0.0 {
        rem += modulus;
    }
    if rem >= modulus {
        0.0
    } else {
        rem
    }
}
