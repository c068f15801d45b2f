//! Calibration shared between conversion threads
//!
//! Readers take an `Arc` snapshot and convert against it without holding the
//! lock; a recalibration builds a complete new `Calibration` and swaps it in
//! under the write lock, so no reader ever sees a mix of old and new values.

use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};

use crate::utils::config::{Calibration, CalibrationUpdates};
use crate::validation::data::CalibrationValidator;
use crate::validation::error::ConfigError;

#[derive(Debug, Clone)]
pub struct SharedCalibration {
    current: Arc<RwLock<Arc<Calibration>>>,
}

impl Default for SharedCalibration {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}

impl SharedCalibration {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(calibration))),
        }
    }

    /// Consistent view of the calibration for one or more conversions
    pub fn snapshot(&self) -> Arc<Calibration> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Apply a batch of updates atomically; the previous calibration stays
    /// in place if the result does not validate
    pub fn apply(&self, updates: &CalibrationUpdates) -> Result<Arc<Calibration>, ConfigError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match updates.apply_to(&guard) {
            Ok(next) => {
                let next = Arc::new(next);
                *guard = Arc::clone(&next);
                info!("recalibrated ({} field(s) changed)", updates.count_updates());
                Ok(next)
            }
            Err(e) => {
                warn!("recalibration rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Swap in a complete calibration
    pub fn replace(&self, calibration: Calibration) -> Result<(), ConfigError> {
        CalibrationValidator::new().check(&calibration)?;
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(calibration);
        info!("calibration replaced");
        Ok(())
    }
}
