//! Calibration parameters for the ultrasonic level sensor and the MQ-type
//! gas sensor, plus the sanity-bound validator that gates them.
//!
//! Calibrations are plain value types so they can be loaded from the
//! environment or deserialized from operator input, but the converter and
//! detector only accept the `Validated*` wrappers produced by
//! [`UltrasonicCalibration::validated`] / [`GasSensorCalibration::validated`].
//! An invalid calibration therefore cannot reach any computation; callers that
//! want the raw violation list (e.g. to render a form) use `violations()`
//! directly.

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};

// ---

/// Ultrasonic distance-sensor calibration, immutable per monitoring session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UltrasonicCalibration {
    // ---
    /// Physical tank height in cm.
    pub cylinder_height_cm: f32,
    /// Sensor-to-surface distance when the tank is empty.
    pub empty_distance_cm: f32,
    /// Sensor-to-surface distance when the tank is full.
    pub full_distance_cm: f32,
    /// Nominal speed of sound at the 20 °C reference, in m/s.
    pub sound_velocity: f32,
    /// Velocity correction per °C away from the 20 °C reference.
    pub temp_velocity_coeff: f32,
}

impl UltrasonicCalibration {
    /// Check every sanity bound and report all violations, in fixed order.
    ///
    /// An empty list means the calibration is valid. Never fails for finite
    /// numeric input.
    pub fn violations(&self) -> Vec<String> {
        // ---
        let mut errors = Vec::new();

        if self.cylinder_height_cm <= 0.0 || self.cylinder_height_cm > 100.0 {
            errors.push("Cylinder height must be between 0 and 100 cm".to_string());
        }

        if self.empty_distance_cm <= self.full_distance_cm {
            errors.push("Empty distance must be greater than full distance".to_string());
        }

        if self.full_distance_cm < 1.0 {
            errors.push("Full distance must be at least 1 cm".to_string());
        }

        if self.sound_velocity < 300.0 || self.sound_velocity > 400.0 {
            errors.push("Sound velocity should be between 300-400 m/s".to_string());
        }

        errors
    }

    /// Validate and wrap, so downstream code can rely on the invariants.
    pub fn validated(self) -> MonitorResult<ValidatedUltrasonic> {
        // ---
        let errors = self.violations();
        if errors.is_empty() {
            Ok(ValidatedUltrasonic(self))
        } else {
            Err(MonitorError::InvalidCalibration(errors))
        }
    }
}

impl Default for UltrasonicCalibration {
    /// Deployment defaults for a standard 14.2 kg cylinder: 343 m/s is the
    /// speed of sound in air at 20 °C, 0.6 m/s/°C its temperature slope.
    fn default() -> Self {
        // ---
        Self {
            cylinder_height_cm: 30.0,
            empty_distance_cm: 28.0,
            full_distance_cm: 3.0,
            sound_velocity: 343.0,
            temp_velocity_coeff: 0.6,
        }
    }
}

/// An [`UltrasonicCalibration`] whose invariants have been checked.
///
/// Only constructible through [`UltrasonicCalibration::validated`].
#[derive(Debug, Clone, Copy)]
pub struct ValidatedUltrasonic(UltrasonicCalibration);

impl ValidatedUltrasonic {
    pub fn get(&self) -> &UltrasonicCalibration {
        // ---
        &self.0
    }
}

// ---

/// MQ-type gas-sensor calibration, immutable per monitoring session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GasSensorCalibration {
    // ---
    /// Voltage above which a leak is declared.
    pub leak_threshold_voltage: f32,
    /// Baseline output voltage in leak-free air.
    pub clean_air_voltage: f32,
    /// Sensitivity multiplier, must be positive.
    pub sensor_sensitivity: f32,
}

impl GasSensorCalibration {
    /// Check every sanity bound and report all violations, in fixed order.
    pub fn violations(&self) -> Vec<String> {
        // ---
        let mut errors = Vec::new();

        if self.leak_threshold_voltage <= self.clean_air_voltage {
            errors.push("Leak threshold must be higher than clean air voltage".to_string());
        }

        // 3.3 V is the ADC supply-voltage ceiling on the target board
        if self.leak_threshold_voltage > 3.3 {
            errors.push("Leak threshold cannot exceed 3.3V (ESP32 max)".to_string());
        }

        if self.clean_air_voltage < 0.0 {
            errors.push("Clean air voltage cannot be negative".to_string());
        }

        if self.sensor_sensitivity <= 0.0 {
            errors.push("Sensor sensitivity must be greater than 0".to_string());
        }

        errors
    }

    /// Validate and wrap, so downstream code can rely on the invariants.
    pub fn validated(self) -> MonitorResult<ValidatedGasSensor> {
        // ---
        let errors = self.violations();
        if errors.is_empty() {
            Ok(ValidatedGasSensor(self))
        } else {
            Err(MonitorError::InvalidCalibration(errors))
        }
    }
}

impl Default for GasSensorCalibration {
    /// Deployment defaults for an MQ-5 sensor.
    fn default() -> Self {
        // ---
        Self {
            leak_threshold_voltage: 1.5,
            clean_air_voltage: 0.4,
            sensor_sensitivity: 1.0,
        }
    }
}

/// A [`GasSensorCalibration`] whose invariants have been checked.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedGasSensor(GasSensorCalibration);

impl ValidatedGasSensor {
    pub fn get(&self) -> &GasSensorCalibration {
        // ---
        &self.0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_default_ultrasonic_is_valid() {
        // ---
        let cal = UltrasonicCalibration::default();
        assert!(cal.violations().is_empty());
        assert!(cal.validated().is_ok());
    }

    #[test]
    fn test_default_gas_sensor_is_valid() {
        // ---
        let cal = GasSensorCalibration::default();
        assert!(cal.violations().is_empty());
        assert!(cal.validated().is_ok());
    }

    #[test]
    fn test_empty_below_full_is_rejected() {
        // ---
        let cal = UltrasonicCalibration {
            empty_distance_cm: 2.0,
            full_distance_cm: 3.0,
            ..UltrasonicCalibration::default()
        };

        let errors = cal.violations();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "Empty distance must be greater than full distance");
    }

    #[test]
    fn test_ultrasonic_violations_accumulate_in_order() {
        // ---
        // Every rule broken at once: height out of range, empty <= full,
        // full < 1, velocity out of range.
        let cal = UltrasonicCalibration {
            cylinder_height_cm: 0.0,
            empty_distance_cm: 0.2,
            full_distance_cm: 0.5,
            sound_velocity: 250.0,
            temp_velocity_coeff: 0.6,
        };

        let errors = cal.violations();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], "Cylinder height must be between 0 and 100 cm");
        assert_eq!(errors[1], "Empty distance must be greater than full distance");
        assert_eq!(errors[2], "Full distance must be at least 1 cm");
        assert_eq!(errors[3], "Sound velocity should be between 300-400 m/s");
    }

    #[test]
    fn test_ultrasonic_bounds_are_inclusive() {
        // ---
        // Edge values that sit exactly on the allowed bounds
        let cal = UltrasonicCalibration {
            cylinder_height_cm: 100.0,
            empty_distance_cm: 28.0,
            full_distance_cm: 1.0,
            sound_velocity: 300.0,
            temp_velocity_coeff: 0.6,
        };
        assert!(cal.violations().is_empty());

        let cal = UltrasonicCalibration {
            sound_velocity: 400.0,
            ..cal
        };
        assert!(cal.violations().is_empty());
    }

    #[test]
    fn test_gas_sensor_violations() {
        // ---
        let cal = GasSensorCalibration {
            leak_threshold_voltage: 0.3,
            clean_air_voltage: 0.4,
            sensor_sensitivity: 1.0,
        };
        let errors = cal.violations();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "Leak threshold must be higher than clean air voltage");

        let cal = GasSensorCalibration {
            leak_threshold_voltage: 3.4,
            clean_air_voltage: 0.4,
            sensor_sensitivity: 1.0,
        };
        assert_eq!(
            cal.violations(),
            vec!["Leak threshold cannot exceed 3.3V (ESP32 max)".to_string()]
        );

        let cal = GasSensorCalibration {
            leak_threshold_voltage: 1.5,
            clean_air_voltage: -0.1,
            sensor_sensitivity: 0.0,
        };
        let errors = cal.violations();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Clean air voltage cannot be negative");
        assert_eq!(errors[1], "Sensor sensitivity must be greater than 0");
    }

    #[test]
    fn test_invalid_calibration_error_carries_all_violations() {
        // ---
        let cal = GasSensorCalibration {
            leak_threshold_voltage: 3.4,
            clean_air_voltage: -0.1,
            sensor_sensitivity: 1.0,
        };

        let err = cal.validated().unwrap_err();
        // Threshold above 3.3 V and negative clean-air baseline
        assert_eq!(err.violations().len(), 2);
    }
}
