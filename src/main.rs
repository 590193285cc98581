//! Operator entry point for the `easygas-monitor` calibration tool.
//!
//! This binary runs the pre-activation checks an installer performs on a new
//! or recalibrated sensor pair:
//! - Loading calibration overrides from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Validating both calibrations against their physical sanity bounds
//! - Printing the validation report (all violations, not just the first)
//! - Optionally mapping a JSON file of bench test readings through the
//!   converter and printing the calibration report
//!
//! A calibration with any violation blocks activation: the tool prints the
//! full report and exits with an error so wrapping scripts stop there.
//!
//! # Environment Variables
//! - `EASYGAS_*` calibration overrides – see [`config::load_from_env`]
//! - `EASYGAS_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `EASYGAS_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, fs, io::IsTerminal};

use anyhow::{Context, Result};
use chrono::Utc;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use easygas_monitor::{calibration_report, config, validation_report, TestReading};

// ---

fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let report = validation_report(&cfg.ultrasonic, &cfg.gas_sensor);
    println!("{report}");

    // Gate both calibrations before any conversion work
    let ultrasonic = cfg
        .ultrasonic
        .validated()
        .context("ultrasonic calibration rejected, fix the violations above")?;
    let gas = cfg
        .gas_sensor
        .validated()
        .context("gas sensor calibration rejected, fix the violations above")?;

    tracing::info!("Calibrations valid");

    if let Some(path) = &cfg.test_readings_path {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read test readings from '{}'", path))?;
        let readings: Vec<TestReading> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid test readings JSON in '{}'", path))?;

        tracing::info!("Loaded {} test readings from {}", readings.len(), path);

        let report = calibration_report(&ultrasonic, &gas, &readings, Utc::now());
        println!("{report}");
    }

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `EASYGAS_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by the `EASYGAS_LOG_LEVEL` env var
///
/// This should be called once at application startup before any logging
/// or tracing macros are invoked. It installs the subscriber globally
/// for the lifetime of the process.
fn init_tracing() {
    // ---
    let span_events = match env::var("EASYGAS_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    // Determine if we should use colors
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to EASYGAS_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("EASYGAS_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(level.to_string())
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
