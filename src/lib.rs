//! Radial Navigation
//!
//! Converts GPS fixes into clock-face addresses (`"4:30 & D"`) around a fixed
//! origin and back, and answers distance, heading and nearest-landmark
//! questions between those addresses.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod navigation;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{GeoCoordinate, RadialAddress};
pub use crate::algorithms::{CompassRose, Heading, OffsetCurve};
pub use crate::processing::{format_address, format_export, parse_address, to_address, RecordParser, StreetTable};
pub use crate::navigation::{Landmark, LandmarkIndex, Navigator, SharedLandmarkIndex};
pub use crate::utils::{Calibration, CalibrationParams, CalibrationUpdates, ConfigurationManager, SharedCalibration};
pub use crate::validation::{ConfigError, NavError, ParseError, Result};
pub use crate::api::{Directions, JsonFormatter, PanelUpdate, TextFormatter};
