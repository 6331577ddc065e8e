//! # Moon Age Text Rendering
//!
//! This module turns a [`MoonAgeInfo`] into text for terminals and status
//! bars: phase names in English or Japanese, phase emoji, a multi-line report
//! and a compact one-line label.
//!
//! Functions here take an already resolved [`Language`]; `Language::Auto`
//! renders as English. Resolve it with [`Language::resolve`] first to honour
//! the process locale.

use crate::{config::Language, MoonAgeInfo, MoonPhase};

/// Localized labels for the report.
struct Labels {
    title: &'static str,
    age: &'static str,
    days: &'static str,
    illumination: &'static str,
    next_new_moon: &'static str,
    next_full_moon: &'static str,
}

const LABELS_EN: Labels = Labels {
    title: "Moon Age Information",
    age: "Age",
    days: "days",
    illumination: "Illumination",
    next_new_moon: "Next New Moon",
    next_full_moon: "Next Full Moon",
};

const LABELS_JA: Labels = Labels {
    title: "月齢情報",
    age: "月齢",
    days: "日",
    illumination: "照度",
    next_new_moon: "次の新月",
    next_full_moon: "次の満月",
};

fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::Ja => &LABELS_JA,
        Language::En | Language::Auto => &LABELS_EN,
    }
}

/// Display name of a phase.
pub fn phase_name(phase: MoonPhase, lang: Language) -> &'static str {
    match lang {
        Language::Ja => match phase {
            MoonPhase::NewMoon => "新月",
            MoonPhase::WaxingCrescent => "三日月",
            MoonPhase::FirstQuarter => "上弦",
            MoonPhase::WaxingGibbous => "十三夜",
            MoonPhase::FullMoon => "満月",
            MoonPhase::WaningGibbous => "十六夜",
            MoonPhase::LastQuarter => "下弦",
            MoonPhase::WaningCrescent => "有明",
        },
        Language::En | Language::Auto => match phase {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        },
    }
}

/// Emoji for a phase (northern-hemisphere orientation).
pub fn phase_emoji(phase: MoonPhase) -> &'static str {
    match phase {
        MoonPhase::NewMoon => "🌑",
        MoonPhase::WaxingCrescent => "🌒",
        MoonPhase::FirstQuarter => "🌓",
        MoonPhase::WaxingGibbous => "🌔",
        MoonPhase::FullMoon => "🌕",
        MoonPhase::WaningGibbous => "🌖",
        MoonPhase::LastQuarter => "🌗",
        MoonPhase::WaningCrescent => "🌘",
    }
}

/// Multi-line report: title, phase, age, illumination and upcoming events.
///
/// # Example
/// ```
/// use moon_age_lib::{calculate_moon_age, config::Language, renderer, CivilDateTime};
///
/// let info = calculate_moon_age(CivilDateTime::new(2024, 1, 11, 11, 57, 0).unwrap());
/// let report = renderer::format_report(&info, Language::En);
/// assert!(report.contains("🌑 New Moon"));
/// ```
pub fn format_report(info: &MoonAgeInfo, lang: Language) -> String {
    let labels = labels(lang);
    [
        labels.title.to_string(),
        format!("{} {}", phase_emoji(info.phase), phase_name(info.phase, lang)),
        format!("{}: {:.2} {}", labels.age, info.age, labels.days),
        format!("{}: {:.2}%", labels.illumination, info.illumination),
        format!("{}: {}", labels.next_new_moon, info.next_new_moon),
        format!("{}: {}", labels.next_full_moon, info.next_full_moon),
    ]
    .join("\n")
}

/// Compact status-bar label, e.g. `🌒 3.21d 12.34%`.
pub fn format_status(info: &MoonAgeInfo, show_percentage: bool) -> String {
    let mut status = format!("{} {:.2}d", phase_emoji(info.phase), info.age);
    if show_percentage {
        status.push_str(&format!(" {:.2}%", info.illumination));
    }
    status
}

/// Print the report to stdout.
pub fn draw_ascii(info: &MoonAgeInfo, lang: Language) {
    println!("{}", format_report(info, lang));
}
