//! # Moon Age Application Entry Point
//!
//! This binary crate is a thin front end over the calculator library: it
//! loads settings, aligns the requested instant to the configured zone and
//! prints the result as a report, a status label or JSON.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use moon_age_lib::config::{Config, Language, CONFIG_FILE};
use moon_age_lib::{calculate_moon_age, renderer, CivilDateTime};

/// Moon age calculator - age, illumination, phase and next new/full moon
#[derive(Parser, Debug)]
#[command(name = "moon-age", version)]
#[command(about = "Show the Moon's age, illumination, phase and upcoming new/full moons")]
struct Args {
    /// Date-time to evaluate (YYYY-MM-DD[ HH:MM[:SS]]), already in the wanted zone.
    /// Defaults to now in the configured zone.
    #[arg(long)]
    at: Option<CivilDateTime>,

    /// Settings file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Output language: auto, en or ja (overrides the settings file)
    #[arg(long)]
    lang: Option<Language>,

    /// Print only the one-line status label
    #[arg(long, conflicts_with = "json")]
    status: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for --json / --status
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moon_age=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load_from_path(&args.config);
    if let Some(lang) = args.lang {
        config.display.language = lang;
    }

    if args.save_config {
        config
            .save_to_path(&args.config)
            .with_context(|| format!("saving settings to {}", args.config.display()))?;
    }

    let instant = match args.at {
        Some(instant) => instant,
        None => config
            .timezone
            .current_time()
            .context("aligning the current time to the configured zone")?,
    };
    tracing::debug!(%instant, "calculating moon age");

    let info = calculate_moon_age(instant);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else if args.status {
        println!(
            "{}",
            renderer::format_status(&info, config.display.show_percentage)
        );
    } else {
        renderer::draw_ascii(&info, config.display.language.resolve());
    }

    Ok(())
}
