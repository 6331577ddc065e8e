//! Next new moon / next full moon prediction from the mean age.

use crate::lunar::{mean_moon_age, SYNODIC_MONTH};

/// Mean age (days) treated as full moon by the predictor.
pub const FULL_MOON_AGE: f64 = 14.8;

/// Julian Day of the next mean new moon, strictly after `jd`.
pub fn next_new_moon(jd: f64) -> f64 {
    let age = mean_moon_age(jd);
    strictly_after(jd, SYNODIC_MONTH - age)
}

/// Julian Day of the next full moon, strictly after `jd`.
///
/// Past the full-moon age the target wraps to the following cycle.
pub fn next_full_moon(jd: f64) -> f64 {
    let age = mean_moon_age(jd);
    let days_ahead = if age < FULL_MOON_AGE {
        FULL_MOON_AGE - age
    } else {
        SYNODIC_MONTH - age + FULL_MOON_AGE
    };
    strictly_after(jd, days_ahead)
}

/// `jd + days_ahead`, or one more cycle when the step vanishes in rounding.
fn strictly_after(jd: f64, days_ahead: f64) -> f64 {
    let target = jd + days_ahead;
    if target > jd {
        target
    } else {
        jd + days_ahead + SYNODIC_MONTH
    }
}
