//! Gas-level calibration and leak-detection core for the EasyGas LPG monitor.
//!
//! This library is the computational heart of the monitoring system: it maps
//! ultrasonic distance readings to a cylinder fill percentage and raw gas
//! sensor voltages to a sticky leak status. Everything here is pure,
//! synchronous computation; acquisition, storage, and the UI are external
//! collaborators that feed samples in and carry readings out.
//!
//! - [`calibration`] – sensor calibration parameters, sanity-bound validation,
//!   and the validate-then-build gate
//! - [`level`] – echo timing → distance and distance → fill percentage
//! - [`leak`] – per-sample threshold check and sticky session status
//! - [`monitor`] – per-cylinder session tying the above together
//! - [`report`] – operator-facing validation and calibration report text
//! - [`config`] – environment-driven calibration overrides

pub mod calibration;
pub mod config;
pub mod error;
pub mod leak;
pub mod level;
pub mod models;
pub mod monitor;
pub mod report;

pub use calibration::{
    GasSensorCalibration, UltrasonicCalibration, ValidatedGasSensor, ValidatedUltrasonic,
};
pub use config::Config;
pub use error::{MonitorError, MonitorResult};
pub use leak::{leak_detected, LeakStatus};
pub use level::{raw_level_percent, LevelConverter, SMOOTHING_ALPHA};
pub use models::{GasReading, SensorSample};
pub use monitor::MonitorSession;
pub use report::{calibration_report, validation_report, TestReading};
