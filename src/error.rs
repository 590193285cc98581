//! Error types for the gas monitoring core.
//!
//! The core itself is pure computation and can fail in exactly one way: a
//! calibration that violates its physical sanity bounds. Conversion and leak
//! detection never fail for well-formed numeric input, and acquisition
//! timeouts are resolved upstream into a stale-but-valid distance before a
//! sample ever reaches this crate.

use thiserror::Error;

// ---

/// Error type for the monitoring core.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A calibration failed one or more sanity checks. Carries the full
    /// ordered list of violations so an operator can fix everything in one
    /// pass rather than replaying the same form repeatedly.
    #[error("invalid calibration: {}", .0.join("; "))]
    InvalidCalibration(Vec<String>),
}

impl MonitorError {
    /// The individual violation messages, if this is a calibration error.
    pub fn violations(&self) -> &[String] {
        // ---
        match self {
            MonitorError::InvalidCalibration(v) => v,
        }
    }
}

/// Result type for core operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
