//! Gas leak detection.
//!
//! Two layers: a stateless threshold comparison per sample, and the sticky
//! session-level status. The status is auto-set on any triggering sample but
//! only cleared by an explicit acknowledgment (manual reset or emergency
//! shutoff), never by the detector observing a subsequent clean reading. A
//! transient spike therefore latches the alarm until someone looks at it.
//!
//! There is deliberately no debounce window: a single sample above the
//! threshold triggers. TODO: add an optional debounce window before trusting
//! this against a real MQ-5, whose output spikes on supply noise.

use crate::calibration::ValidatedGasSensor;

// ---

/// Stateless per-sample leak check: voltage strictly above the calibrated
/// threshold means leak.
pub fn leak_detected(sensor_voltage: f32, calibration: &ValidatedGasSensor) -> bool {
    // ---
    sensor_voltage > calibration.get().leak_threshold_voltage
}

/// Session-level leak status. `Detected` is sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeakStatus {
    #[default]
    Normal,
    Detected,
}

impl LeakStatus {
    /// Fold one per-sample detection result into the session status.
    ///
    /// Transitions to `Detected` on a triggering sample; a clean sample never
    /// transitions back.
    pub fn observe(&mut self, sample_leak: bool) {
        // ---
        if sample_leak && *self == LeakStatus::Normal {
            tracing::warn!("Gas leak detected, latching alarm until acknowledged");
            *self = LeakStatus::Detected;
        }
    }

    /// Explicit acknowledgment path (manual reset or emergency shutoff).
    pub fn clear(&mut self) {
        // ---
        if *self == LeakStatus::Detected {
            tracing::info!("Leak alarm cleared by operator");
        }
        *self = LeakStatus::Normal;
    }

    pub fn is_detected(&self) -> bool {
        // ---
        *self == LeakStatus::Detected
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::calibration::GasSensorCalibration;

    fn create_test_calibration() -> ValidatedGasSensor {
        // ---
        // threshold=1.5 V, the deployment default
        GasSensorCalibration::default().validated().unwrap()
    }

    #[test]
    fn test_threshold_comparison() {
        // ---
        let cal = create_test_calibration();

        assert!(leak_detected(1.6, &cal));
        assert!(!leak_detected(1.4, &cal));

        // Exactly at the threshold is not a leak (strictly greater-than)
        assert!(!leak_detected(1.5, &cal));
    }

    #[test]
    fn test_status_latches_on_detection() {
        // ---
        let mut status = LeakStatus::default();
        assert!(!status.is_detected());

        status.observe(true);
        assert!(status.is_detected());

        // Clean readings do not reset the alarm
        status.observe(false);
        status.observe(false);
        assert!(status.is_detected());
    }

    #[test]
    fn test_explicit_clear_resets() {
        // ---
        let mut status = LeakStatus::default();
        status.observe(true);

        status.clear();
        assert!(!status.is_detected());

        // And it can latch again afterwards
        status.observe(true);
        assert!(status.is_detected());
    }

    #[test]
    fn test_clear_on_normal_is_a_no_op() {
        // ---
        let mut status = LeakStatus::Normal;
        status.clear();
        assert_eq!(status, LeakStatus::Normal);
    }
}
