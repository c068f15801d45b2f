//! Calibration configuration and shared runtime state

pub mod config;
pub mod shared;

pub use config::{Calibration, CalibrationParams, CalibrationUpdates, ConfigurationManager};
pub use shared::SharedCalibration;
