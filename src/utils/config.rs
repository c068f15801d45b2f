use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::algorithms::projection::OffsetCurve;
use crate::core::constants::{
    DEFAULT_BLOCK_WIDTH, DEFAULT_ESPLANADE_DISTANCE, DEFAULT_ORIGIN_LATITUDE,
    DEFAULT_ORIGIN_LONGITUDE,
};
use crate::core::GeoCoordinate;
use crate::processing::streets::StreetTable;
use crate::validation::data::CalibrationValidator;
use crate::validation::error::ConfigError;

/// Site calibration used by every conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Central reference point
    pub origin: GeoCoordinate,
    /// Angular correction curve
    pub offset: OffsetCurve,
    /// Distance from the origin to the Esplanade (feet)
    pub esplanade_distance: f64,
    /// Radial width of one lettered block (feet)
    pub block_width: f64,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            origin: GeoCoordinate::from_degrees(DEFAULT_ORIGIN_LATITUDE, DEFAULT_ORIGIN_LONGITUDE),
            offset: OffsetCurve::default(),
            esplanade_distance: DEFAULT_ESPLANADE_DISTANCE,
            block_width: DEFAULT_BLOCK_WIDTH,
        }
    }
}

/// Calibration parameters together with the street layout they apply to.
///
/// This is the unit handed to conversions; both halves always come from the
/// same point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Calibration {
    pub params: CalibrationParams,
    #[serde(default)]
    pub streets: StreetTable,
}

/// Batch of calibration changes applied all-or-nothing
#[derive(Debug, Clone, Default)]
pub struct CalibrationUpdates {
    pub origin: Option<(f64, f64)>,
    pub offset_coefficients: Option<[f64; 4]>,
    pub esplanade_distance: Option<f64>,
    pub block_width: Option<f64>,
    pub streets: Option<StreetTable>,
}

impl CalibrationUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, latitude: f64, longitude: f64) -> Self {
        self.origin = Some((latitude, longitude));
        self
    }

    pub fn with_offset_coefficients(mut self, coefficients: [f64; 4]) -> Self {
        self.offset_coefficients = Some(coefficients);
        self
    }

    pub fn with_esplanade_distance(mut self, distance: f64) -> Self {
        self.esplanade_distance = Some(distance);
        self
    }

    pub fn with_block_width(mut self, width: f64) -> Self {
        self.block_width = Some(width);
        self
    }

    pub fn with_streets(mut self, streets: StreetTable) -> Self {
        self.streets = Some(streets);
        self
    }

    pub fn count_updates(&self) -> usize {
        [
            self.origin.is_some(),
            self.offset_coefficients.is_some(),
            self.esplanade_distance.is_some(),
            self.block_width.is_some(),
            self.streets.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Apply to a copy of `current` and validate the result as a whole
    pub fn apply_to(&self, current: &Calibration) -> Result<Calibration, ConfigError> {
        let mut next = current.clone();
        if let Some((latitude, longitude)) = self.origin {
            next.params.origin = GeoCoordinate::new(latitude, longitude).map_err(|e| {
                ConfigError::invalid("origin", format!("{},{}", latitude, longitude), &e.to_string())
            })?;
        }
        if let Some(coefficients) = self.offset_coefficients {
            next.params.offset = OffsetCurve::new(coefficients);
        }
        if let Some(distance) = self.esplanade_distance {
            next.params.esplanade_distance = distance;
        }
        if let Some(width) = self.block_width {
            next.params.block_width = width;
        }
        if let Some(streets) = &self.streets {
            next.streets = streets.clone();
        }
        CalibrationValidator::new().check(&next)?;
        Ok(next)
    }
}

/// Saved state for rollback
#[derive(Debug, Clone)]
pub struct ConfigurationSnapshot {
    calibration: Calibration,
    is_modified: bool,
}

/// Owns the calibration and its JSON file
#[derive(Debug)]
pub struct ConfigurationManager {
    calibration: Calibration,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a manager holding the default calibration
    pub fn new() -> Self {
        Self {
            calibration: Calibration::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Replace the whole calibration after validation
    pub fn update_calibration(&mut self, calibration: Calibration) -> Result<(), ConfigError> {
        CalibrationValidator::new().check(&calibration)?;
        self.calibration = calibration;
        self.is_modified = true;
        Ok(())
    }

    /// Load calibration from a JSON file; the current one is kept on failure
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: format!("failed to read config file '{}': {}", path.display(), e),
        })?;

        let calibration: Calibration =
            serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
                message: format!("failed to parse config file '{}': {}", path.display(), e),
            })?;

        CalibrationValidator::new().check(&calibration)?;

        info!("loaded calibration from {}", path.display());
        self.calibration = calibration;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save calibration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.calibration).map_err(|e| {
            ConfigError::Serialization {
                message: format!("failed to serialize calibration: {}", e),
            }
        })?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            message: format!("failed to write config file '{}': {}", path.display(), e),
        })?;

        info!("saved calibration to {}", path.display());
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the file the calibration was last loaded from or saved to
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::Io {
                message: "no file path set for saving configuration".to_string(),
            }),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    // Runtime parameter adjustment. Each setter returns the previous value.

    pub fn set_origin(&mut self, latitude: f64, longitude: f64) -> Result<GeoCoordinate, ConfigError> {
        let old = self.calibration.params.origin;
        self.update_parameters(CalibrationUpdates::new().with_origin(latitude, longitude))?;
        Ok(old)
    }

    pub fn origin(&self) -> GeoCoordinate {
        self.calibration.params.origin
    }

    pub fn set_offset_coefficients(&mut self, coefficients: [f64; 4]) -> Result<[f64; 4], ConfigError> {
        let old = self.calibration.params.offset.coefficients;
        self.update_parameters(CalibrationUpdates::new().with_offset_coefficients(coefficients))?;
        Ok(old)
    }

    pub fn offset_coefficients(&self) -> [f64; 4] {
        self.calibration.params.offset.coefficients
    }

    pub fn set_esplanade_distance(&mut self, distance: f64) -> Result<f64, ConfigError> {
        let old = self.calibration.params.esplanade_distance;
        self.update_parameters(CalibrationUpdates::new().with_esplanade_distance(distance))?;
        Ok(old)
    }

    pub fn esplanade_distance(&self) -> f64 {
        self.calibration.params.esplanade_distance
    }

    pub fn set_block_width(&mut self, width: f64) -> Result<f64, ConfigError> {
        let old = self.calibration.params.block_width;
        self.update_parameters(CalibrationUpdates::new().with_block_width(width))?;
        Ok(old)
    }

    pub fn block_width(&self) -> f64 {
        self.calibration.params.block_width
    }

    pub fn set_street_table(&mut self, streets: StreetTable) -> Result<StreetTable, ConfigError> {
        let old = self.calibration.streets.clone();
        self.update_parameters(CalibrationUpdates::new().with_streets(streets))?;
        Ok(old)
    }

    /// Apply several changes at once; nothing changes if any of them is invalid
    pub fn update_parameters(&mut self, updates: CalibrationUpdates) -> Result<usize, ConfigError> {
        match updates.apply_to(&self.calibration) {
            Ok(next) => {
                let count = updates.count_updates();
                info!("applied {} calibration update(s)", count);
                self.calibration = next;
                self.is_modified = true;
                Ok(count)
            }
            Err(e) => {
                warn!("calibration update rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn create_snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            calibration: self.calibration.clone(),
            is_modified: self.is_modified,
        }
    }

    pub fn restore_from_snapshot(&mut self, snapshot: ConfigurationSnapshot) {
        self.calibration = snapshot.calibration;
        self.is_modified = snapshot.is_modified;
    }
}
