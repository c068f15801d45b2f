//! Calibration validation and error types

pub mod data;
pub mod error;

pub use data::{CalibrationValidator, ValidationResult};
pub use error::{ConfigError, NavError, ParseError, Result};
