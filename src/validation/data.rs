use log::debug;

use crate::utils::config::Calibration;
use crate::validation::error::ConfigError;

/// Limits applied when validating calibration values
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Block widths below this are accepted but reported (feet)
    pub min_reasonable_block_width: f64,
    /// Esplanade distances above this are accepted but reported (feet)
    pub max_reasonable_esplanade: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_reasonable_block_width: 50.0,
            max_reasonable_esplanade: 10_000.0,
        }
    }
}

/// Outcome of validating a calibration
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks calibration values before they are allowed to replace the current ones
#[derive(Debug, Clone)]
pub struct CalibrationValidator {
    config: ValidationConfig,
}

impl Default for CalibrationValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationValidator {
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Collect every problem with a calibration
    pub fn validate(&self, calibration: &Calibration) -> ValidationResult {
        let mut result = ValidationResult::default();
        let params = &calibration.params;

        if !params.origin.is_valid() {
            result.errors.push(ConfigError::invalid(
                "origin",
                format!("{},{}", params.origin.latitude(), params.origin.longitude()),
                "latitude must be within [-90, 90] and longitude within [-180, 180]",
            ));
        }

        for (i, c) in params.offset.coefficients.iter().enumerate() {
            if !c.is_finite() {
                result.errors.push(ConfigError::invalid(
                    &format!("offset_coefficients[{}]", i),
                    c,
                    "coefficient must be finite",
                ));
            }
        }

        if !params.esplanade_distance.is_finite() || params.esplanade_distance < 0.0 {
            result.errors.push(ConfigError::invalid(
                "esplanade_distance",
                params.esplanade_distance,
                "must be a finite, non-negative distance in feet",
            ));
        } else if params.esplanade_distance > self.config.max_reasonable_esplanade {
            result.warnings.push(format!(
                "esplanade distance {} ft is unusually large",
                params.esplanade_distance
            ));
        }

        if !params.block_width.is_finite() || params.block_width <= 0.0 {
            result.errors.push(ConfigError::invalid(
                "block_width",
                params.block_width,
                "must be a finite, positive width in feet",
            ));
        } else if params.block_width < self.config.min_reasonable_block_width {
            result.warnings.push(format!(
                "block width {} ft is unusually narrow",
                params.block_width
            ));
        }

        if let Err(e) = calibration.streets.validate() {
            result.errors.push(e);
        }

        result
    }

    /// First error of [`validate`](Self::validate), if any
    pub fn check(&self, calibration: &Calibration) -> Result<(), ConfigError> {
        let result = self.validate(calibration);
        for warning in &result.warnings {
            debug!("calibration warning: {}", warning);
        }
        match result.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
