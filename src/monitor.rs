//! Monitoring session: ties one sensor stream's converter and leak status
//! together and turns raw samples into the readings the storage/UI
//! collaborator consumes.

use crate::calibration::{ValidatedGasSensor, ValidatedUltrasonic};
use crate::leak::{leak_detected, LeakStatus};
use crate::level::LevelConverter;
use crate::models::{round_level, GasReading, SensorSample};

// ---

/// State for one monitored cylinder over a session.
///
/// Holds the per-stream smoothing accumulator (inside the converter) and the
/// sticky leak status. One instance per physical sensor pair.
#[derive(Debug, Clone)]
pub struct MonitorSession {
    // ---
    converter: LevelConverter,
    gas_calibration: ValidatedGasSensor,
    leak_status: LeakStatus,
}

impl MonitorSession {
    /// Create a session with smoothing enabled, the deployment configuration.
    pub fn new(ultrasonic: ValidatedUltrasonic, gas: ValidatedGasSensor) -> Self {
        // ---
        Self {
            converter: LevelConverter::with_smoothing(ultrasonic),
            gas_calibration: gas,
            leak_status: LeakStatus::default(),
        }
    }

    /// Process one sample into a reading.
    ///
    /// The reading's `leak_detected` reflects the sticky session status, not
    /// just this sample, so the UI keeps alarming after a transient spike.
    pub fn process(&mut self, sample: &SensorSample) -> GasReading {
        // ---
        let level = self.converter.convert(sample.distance_cm);

        let sample_leak = leak_detected(sample.sensor_voltage, &self.gas_calibration);
        self.leak_status.observe(sample_leak);

        let reading = GasReading {
            level_percent: round_level(level),
            leak_detected: self.leak_status.is_detected(),
            timestamp: sample.timestamp,
        };

        tracing::debug!(
            "Sample d={:.1}cm v={:.2}V -> level={:.1}% leak={}",
            sample.distance_cm,
            sample.sensor_voltage,
            reading.level_percent,
            reading.leak_detected
        );

        reading
    }

    pub fn leak_status(&self) -> LeakStatus {
        // ---
        self.leak_status
    }

    /// Operator acknowledgment (manual reset or emergency shutoff).
    pub fn clear_leak(&mut self) {
        // ---
        self.leak_status.clear();
    }
}
