//! Simple data models for the gas monitoring core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// One raw reading cycle from the acquisition layer.
///
/// The acquisition layer has already resolved echo timeouts by substituting
/// the last known distance, so `distance_cm` is always a usable value here.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorSample {
    // ---
    pub distance_cm: f32,
    pub temperature_c: f32,
    pub sensor_voltage: f32,
    pub timestamp: DateTime<Utc>,
}

/// Derived reading handed to the storage/UI collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct GasReading {
    // ---
    /// Fill percentage in `[0, 100]`, rounded to one decimal place.
    pub level_percent: f32,
    pub leak_detected: bool,
    pub timestamp: DateTime<Utc>,
}

/// Round a level percentage to the one-decimal display precision used
/// everywhere a level leaves the core.
pub fn round_level(level: f32) -> f32 {
    // ---
    (level * 10.0).round() / 10.0
}
