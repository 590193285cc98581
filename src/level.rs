//! Distance-to-level conversion for the ultrasonic sensor.
//!
//! Two distinct steps, matching the two call sites on the firmware side:
//!
//! 1. echo timing → distance, which is where the temperature-adjusted sound
//!    velocity applies;
//! 2. distance → fill percentage, which uses the calibration distances
//!    directly and never touches the adjusted velocity.
//!
//! A [`LevelConverter`] holds the per-sensor state (smoothing accumulator and
//! last known distance), so each physical sensor stream gets its own instance
//! and concurrent streams never share an accumulator.

use crate::calibration::ValidatedUltrasonic;

// ---

/// Weight of the newest raw level in the exponential smoothing filter; the
/// remainder carries over from the previous output.
pub const SMOOTHING_ALPHA: f32 = 0.7;

/// Reference temperature for the nominal sound velocity, in °C.
const REFERENCE_TEMP_C: f32 = 20.0;

/// Map a distance reading to a fill percentage, stateless.
///
/// Piecewise: closer than the full-distance mark reads as 100% (this also
/// covers sensor error readings that land implausibly close), farther than
/// the empty-distance mark reads as 0%, and the zone between maps linearly.
/// The final clamp defends against floating-point overshoot at the
/// boundaries.
pub fn raw_level_percent(distance_cm: f32, calibration: &ValidatedUltrasonic) -> f32 {
    // ---
    let cal = calibration.get();

    let level = if distance_cm < cal.full_distance_cm {
        100.0
    } else if distance_cm > cal.empty_distance_cm {
        0.0
    } else {
        ((cal.empty_distance_cm - distance_cm) / (cal.empty_distance_cm - cal.full_distance_cm))
            * 100.0
    };

    level.clamp(0.0, 100.0)
}

/// Stateful converter for one physical sensor stream.
#[derive(Debug, Clone)]
pub struct LevelConverter {
    // ---
    calibration: ValidatedUltrasonic,
    smoothing: bool,
    /// Previous smoothed output, `None` until the first sample.
    last_level: Option<f32>,
    /// Last successfully measured distance, used when the echo timer times
    /// out. Starts at the empty distance, as the firmware does.
    last_distance_cm: f32,
}

impl LevelConverter {
    /// Create a converter with smoothing disabled.
    pub fn new(calibration: ValidatedUltrasonic) -> Self {
        // ---
        let last_distance_cm = calibration.get().empty_distance_cm;
        Self {
            calibration,
            smoothing: false,
            last_level: None,
            last_distance_cm,
        }
    }

    /// Create a converter with the exponential smoothing filter enabled.
    pub fn with_smoothing(calibration: ValidatedUltrasonic) -> Self {
        // ---
        Self {
            smoothing: true,
            ..Self::new(calibration)
        }
    }

    pub fn calibration(&self) -> &ValidatedUltrasonic {
        // ---
        &self.calibration
    }

    /// Temperature-compensated sound velocity in m/s.
    ///
    /// Only meaningful for the echo-timing step; the percentage formula works
    /// on calibration distances directly.
    pub fn adjusted_velocity(&self, temperature_c: f32) -> f32 {
        // ---
        let cal = self.calibration.get();
        cal.sound_velocity + cal.temp_velocity_coeff * (temperature_c - REFERENCE_TEMP_C)
    }

    /// Convert a raw echo-pulse duration (µs) into a distance in cm.
    ///
    /// A zero duration means the echo timer timed out; the last known
    /// distance is substituted so the downstream percentage holds steady
    /// instead of spiking.
    pub fn distance_from_echo(&mut self, duration_us: u32, temperature_c: f32) -> f32 {
        // ---
        if duration_us == 0 {
            tracing::debug!(
                "Echo timeout, reusing last known distance {:.1} cm",
                self.last_distance_cm
            );
            return self.last_distance_cm;
        }

        // Round trip at v m/s: d_cm = t_us * v / 20000
        let distance_cm = duration_us as f32 * self.adjusted_velocity(temperature_c) / 20000.0;
        self.last_distance_cm = distance_cm;
        distance_cm
    }

    /// Convert a distance reading into a fill percentage, applying the
    /// smoothing filter when enabled. Updates this stream's accumulator.
    pub fn convert(&mut self, distance_cm: f32) -> f32 {
        // ---
        let raw = raw_level_percent(distance_cm, &self.calibration);

        let level = match (self.smoothing, self.last_level) {
            (true, Some(prev)) => SMOOTHING_ALPHA * raw + (1.0 - SMOOTHING_ALPHA) * prev,
            _ => raw,
        };

        self.last_level = Some(level);
        level
    }
}
