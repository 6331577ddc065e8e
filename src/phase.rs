//! Eight-way moon phase classification by mean age.

use serde::Serialize;

use crate::lunar::{normalize, SYNODIC_MONTH};

/// Named phase of the Moon.
///
/// Serialized names match the labels used by existing front ends
/// (`"new"`, `"waxing-crescent"`, ..., `"full"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoonPhase {
    #[serde(rename = "new")]
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    #[serde(rename = "full")]
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cycle order, starting at New.
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];
}

/// Classify a mean age (days since New) into one of eight phases.
///
/// Buckets are checked in cycle order and the first match wins, so every
/// age in `[0, SYNODIC_MONTH)` lands in exactly one phase. Ages outside that
/// range are wrapped into it first.
///
/// `_illumination` does not take part in the decision.
pub fn determine_moon_phase(age: f64, _illumination: f64) -> MoonPhase {
    match normalize(age, SYNODIC_MONTH) {
        a if !(1.0..29.0).contains(&a) => MoonPhase::NewMoon,
        a if a < 7.4 => MoonPhase::WaxingCrescent,
        a if a < 7.5 => MoonPhase::FirstQuarter,
        a if a < 14.8 => MoonPhase::WaxingGibbous,
        a if a < 15.0 => MoonPhase::FullMoon,
        a if a < 22.1 => MoonPhase::WaningGibbous,
        a if a < 22.2 => MoonPhase::LastQuarter,
        _ => MoonPhase::WaningCrescent,
    }
}
