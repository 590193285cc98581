//! Operator-facing report text.
//!
//! Two reports: a validation report listing calibration values plus any
//! sanity-bound violations (works on unvalidated input, that is its point),
//! and a calibration report that additionally maps a set of test readings
//! through the converter so an installer can eyeball the curve before
//! activating a calibration.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::calibration::{
    GasSensorCalibration, UltrasonicCalibration, ValidatedGasSensor, ValidatedUltrasonic,
};
use crate::leak::leak_detected;
use crate::level::raw_level_percent;

// ---

/// One bench reading taken during installation, loaded from operator JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct TestReading {
    // ---
    pub distance_cm: f32,
    pub voltage: f32,
    pub temperature_c: f32,
}

/// Render both calibrations and every violation found, for display before a
/// calibration is activated. An invalid calibration must block activation;
/// this report is what the operator sees in that case.
pub fn validation_report(
    ultrasonic: &UltrasonicCalibration,
    gas: &GasSensorCalibration,
) -> String {
    // ---
    let mut report = String::from("=== EasyGas Calibration Validation ===\n\n");

    write_ultrasonic_section(&mut report, ultrasonic);
    write_gas_section(&mut report, gas);

    let mut violations = ultrasonic.violations();
    violations.extend(gas.violations());

    if violations.is_empty() {
        report.push_str("All calibration values within physical bounds.\n");
    } else {
        let _ = writeln!(report, "Violations ({}):", violations.len());
        for v in &violations {
            let _ = writeln!(report, "- {}", v);
        }
    }

    report
}

/// Render a full calibration report, enumerating the given bench readings as
/// mapped through the converter. Levels print at the one-decimal display
/// precision.
pub fn calibration_report(
    ultrasonic: &ValidatedUltrasonic,
    gas: &ValidatedGasSensor,
    test_readings: &[TestReading],
    generated_at: DateTime<Utc>,
) -> String {
    // ---
    let mut report = String::from("=== EasyGas Calibration Report ===\n\n");

    write_ultrasonic_section(&mut report, ultrasonic.get());
    write_gas_section(&mut report, gas.get());

    if !test_readings.is_empty() {
        report.push_str("Test Readings:\n");
        for (index, reading) in test_readings.iter().enumerate() {
            let level = raw_level_percent(reading.distance_cm, ultrasonic);
            let leak = leak_detected(reading.voltage, gas);
            let _ = writeln!(
                report,
                "{}. Distance: {}cm, Gas Level: {:.1}%, Voltage: {}V, Temp: {}°C{}",
                index + 1,
                reading.distance_cm,
                level,
                reading.voltage,
                reading.temperature_c,
                if leak { " [LEAK]" } else { "" },
            );
        }
    }

    let _ = write!(report, "\nGenerated: {}\n", generated_at.to_rfc3339());
    report
}

// ---

fn write_ultrasonic_section(report: &mut String, cal: &UltrasonicCalibration) {
    // ---
    report.push_str("Ultrasonic Sensor Configuration:\n");
    let _ = writeln!(report, "- Cylinder Height: {} cm", cal.cylinder_height_cm);
    let _ = writeln!(report, "- Empty Distance: {} cm", cal.empty_distance_cm);
    let _ = writeln!(report, "- Full Distance: {} cm", cal.full_distance_cm);
    let _ = writeln!(report, "- Sound Velocity: {} m/s", cal.sound_velocity);
    let _ = writeln!(
        report,
        "- Temperature Coefficient: {} m/s/°C\n",
        cal.temp_velocity_coeff
    );
}

fn write_gas_section(report: &mut String, cal: &GasSensorCalibration) {
    // ---
    report.push_str("Gas Sensor Configuration:\n");
    let _ = writeln!(report, "- Leak Threshold: {} V", cal.leak_threshold_voltage);
    let _ = writeln!(report, "- Clean Air Baseline: {} V", cal.clean_air_voltage);
    let _ = writeln!(
        report,
        "- Sensitivity Multiplier: {}\n",
        cal.sensor_sensitivity
    );
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validation_report_lists_violations() {
        // ---
        let ultrasonic = UltrasonicCalibration {
            empty_distance_cm: 2.0,
            full_distance_cm: 3.0,
            ..UltrasonicCalibration::default()
        };
        let gas = GasSensorCalibration::default();

        let report = validation_report(&ultrasonic, &gas);
        assert!(report.contains("Violations (1):"));
        assert!(report.contains("- Empty distance must be greater than full distance"));
    }

    #[test]
    fn test_validation_report_clean() {
        // ---
        let report = validation_report(
            &UltrasonicCalibration::default(),
            &GasSensorCalibration::default(),
        );
        assert!(report.contains("All calibration values within physical bounds."));
        assert!(!report.contains("Violations"));
    }

    #[test]
    fn test_calibration_report_maps_readings() {
        // ---
        let ultrasonic = UltrasonicCalibration::default().validated().unwrap();
        let gas = GasSensorCalibration::default().validated().unwrap();

        let readings = vec![
            TestReading {
                distance_cm: 15.5,
                voltage: 0.4,
                temperature_c: 25.0,
            },
            TestReading {
                distance_cm: 18.5,
                voltage: 1.6,
                temperature_c: 25.0,
            },
        ];

        let generated_at = Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap();
        let report = calibration_report(&ultrasonic, &gas, &readings, generated_at);

        assert!(report.contains("1. Distance: 15.5cm, Gas Level: 50.0%, Voltage: 0.4V, Temp: 25°C"));
        assert!(report.contains("2. Distance: 18.5cm, Gas Level: 38.0%, Voltage: 1.6V, Temp: 25°C [LEAK]"));
        assert!(report.contains("Generated: 2025-03-26T18:45:00+00:00"));
    }

    #[test]
    fn test_calibration_report_without_readings() {
        // ---
        let ultrasonic = UltrasonicCalibration::default().validated().unwrap();
        let gas = GasSensorCalibration::default().validated().unwrap();

        let report = calibration_report(&ultrasonic, &gas, &[], Utc::now());
        assert!(!report.contains("Test Readings:"));
        assert!(report.contains("- Cylinder Height: 30 cm"));
        assert!(report.contains("- Leak Threshold: 1.5 V"));
    }
}
