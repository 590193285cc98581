//! Configuration loader for the `easygas-monitor` operator tool.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). Calibration values default to the
//! deployment constants and can be overridden individually, which is how an
//! installer dials in a specific cylinder without recompiling.

use std::env;

use anyhow::{anyhow, Result};

use crate::calibration::{GasSensorCalibration, UltrasonicCalibration};

/// Parse an optional float environment variable with a default value.
macro_rules! parse_env_f32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<f32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the session. The calibrations here are raw and
/// unvalidated; callers gate them through `validated()` before any conversion.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Ultrasonic sensor calibration assembled from env overrides.
    pub ultrasonic: UltrasonicCalibration,

    /// Gas sensor calibration assembled from env overrides.
    pub gas_sensor: GasSensorCalibration,

    /// Optional path to a JSON file of bench test readings for the
    /// calibration report.
    pub test_readings_path: Option<String>,
}

/// Load configuration from environment variables with defaults.
///
/// Optional (defaults in parentheses):
/// - `EASYGAS_CYLINDER_HEIGHT_CM` (30.0)
/// - `EASYGAS_EMPTY_DISTANCE_CM` (28.0)
/// - `EASYGAS_FULL_DISTANCE_CM` (3.0)
/// - `EASYGAS_SOUND_VELOCITY` (343.0)
/// - `EASYGAS_TEMP_VELOCITY_COEFF` (0.6)
/// - `EASYGAS_LEAK_THRESHOLD_V` (1.5)
/// - `EASYGAS_CLEAN_AIR_V` (0.4)
/// - `EASYGAS_SENSOR_SENSITIVITY` (1.0)
/// - `EASYGAS_TEST_READINGS` – path to a test-readings JSON file
///
/// Returns an error if any variable is present but not a valid number.
pub fn load_from_env() -> Result<Config> {
    // ---
    let ultrasonic_defaults = UltrasonicCalibration::default();
    let gas_defaults = GasSensorCalibration::default();

    let ultrasonic = UltrasonicCalibration {
        cylinder_height_cm: parse_env_f32!(
            "EASYGAS_CYLINDER_HEIGHT_CM",
            ultrasonic_defaults.cylinder_height_cm
        ),
        empty_distance_cm: parse_env_f32!(
            "EASYGAS_EMPTY_DISTANCE_CM",
            ultrasonic_defaults.empty_distance_cm
        ),
        full_distance_cm: parse_env_f32!(
            "EASYGAS_FULL_DISTANCE_CM",
            ultrasonic_defaults.full_distance_cm
        ),
        sound_velocity: parse_env_f32!("EASYGAS_SOUND_VELOCITY", ultrasonic_defaults.sound_velocity),
        temp_velocity_coeff: parse_env_f32!(
            "EASYGAS_TEMP_VELOCITY_COEFF",
            ultrasonic_defaults.temp_velocity_coeff
        ),
    };

    let gas_sensor = GasSensorCalibration {
        leak_threshold_voltage: parse_env_f32!(
            "EASYGAS_LEAK_THRESHOLD_V",
            gas_defaults.leak_threshold_voltage
        ),
        clean_air_voltage: parse_env_f32!("EASYGAS_CLEAN_AIR_V", gas_defaults.clean_air_voltage),
        sensor_sensitivity: parse_env_f32!(
            "EASYGAS_SENSOR_SENSITIVITY",
            gas_defaults.sensor_sensitivity
        ),
    };

    let test_readings_path = env::var("EASYGAS_TEST_READINGS").ok();

    Ok(Config {
        ultrasonic,
        gas_sensor,
        test_readings_path,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  CYLINDER_HEIGHT_CM  : {}", self.ultrasonic.cylinder_height_cm);
        tracing::info!("  EMPTY_DISTANCE_CM   : {}", self.ultrasonic.empty_distance_cm);
        tracing::info!("  FULL_DISTANCE_CM    : {}", self.ultrasonic.full_distance_cm);
        tracing::info!("  SOUND_VELOCITY      : {}", self.ultrasonic.sound_velocity);
        tracing::info!("  TEMP_VELOCITY_COEFF : {}", self.ultrasonic.temp_velocity_coeff);
        tracing::info!("  LEAK_THRESHOLD_V    : {}", self.gas_sensor.leak_threshold_voltage);
        tracing::info!("  CLEAN_AIR_V         : {}", self.gas_sensor.clean_air_voltage);
        tracing::info!("  SENSOR_SENSITIVITY  : {}", self.gas_sensor.sensor_sensitivity);
        tracing::info!(
            "  TEST_READINGS       : {}",
            self.test_readings_path.as_deref().unwrap_or("(none)")
        );
    }
}
