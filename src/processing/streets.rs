//! Lettered street bands around the origin
//!
//! Two layouts are supported: the uniform grid, where every block beyond the
//! Esplanade has the calibrated `block_width`, and a custom table of explicit
//! thresholds for surveyed layouts whose blocks vary in width.

use serde::{Deserialize, Serialize};

use crate::core::constants::{ESPLANADE_LABEL, LETTERED_STREET_COUNT};
use crate::utils::config::CalibrationParams;
use crate::validation::error::ConfigError;

/// One band of a custom table: distances from `threshold` up to the next
/// band's threshold carry `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetBand {
    pub threshold: f64,
    pub label: String,
}

impl StreetBand {
    pub fn new(threshold: f64, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreetTable {
    #[default]
    /// Esplanade plus A-L, each `block_width` wide, read from the calibration
    Uniform,
    /// Explicit ascending bands; distances past `outer_limit` are unnamed
    Custom {
        bands: Vec<StreetBand>,
        outer_limit: f64,
    },
}

impl StreetTable {
    /// Build a validated custom table
    pub fn custom(bands: Vec<StreetBand>, outer_limit: f64) -> Result<Self, ConfigError> {
        let table = StreetTable::Custom { bands, outer_limit };
        table.validate()?;
        Ok(table)
    }

    /// Check band ordering and labels; the uniform table is always valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (bands, outer_limit) = match self {
            StreetTable::Uniform => return Ok(()),
            StreetTable::Custom { bands, outer_limit } => (bands, *outer_limit),
        };

        if bands.is_empty() {
            return Err(ConfigError::StreetTable {
                reason: "at least one band is required".to_string(),
            });
        }
        for (i, band) in bands.iter().enumerate() {
            if !band.threshold.is_finite() || band.threshold < 0.0 {
                return Err(ConfigError::StreetTable {
                    reason: format!("band '{}' has invalid threshold {}", band.label, band.threshold),
                });
            }
            if band.label.trim().is_empty() {
                return Err(ConfigError::StreetTable {
                    reason: format!("band {} has an empty label", i),
                });
            }
            if i > 0 && band.threshold <= bands[i - 1].threshold {
                return Err(ConfigError::StreetTable {
                    reason: format!("threshold of '{}' is not ascending", band.label),
                });
            }
            if bands[..i]
                .iter()
                .any(|other| other.label.eq_ignore_ascii_case(&band.label))
            {
                return Err(ConfigError::StreetTable {
                    reason: format!("duplicate label '{}'", band.label),
                });
            }
        }
        let last = bands[bands.len() - 1].threshold;
        if !outer_limit.is_finite() || outer_limit < last {
            return Err(ConfigError::StreetTable {
                reason: format!("outer limit {} is below the last threshold {}", outer_limit, last),
            });
        }
        Ok(())
    }

    /// Street label for a distance, or `None` outside the named bands
    pub fn label_for(&self, distance: f64, params: &CalibrationParams) -> Option<String> {
        if !distance.is_finite() {
            return None;
        }
        match self {
            StreetTable::Uniform => uniform_label(distance, params),
            StreetTable::Custom { bands, outer_limit } => {
                let first = bands.first()?;
                if distance < first.threshold || distance > *outer_limit {
                    return None;
                }
                bands
                    .iter()
                    .rev()
                    .find(|band| band.threshold <= distance)
                    .map(|band| band.label.clone())
            }
        }
    }

    /// Representative distance for a label: the middle of its band.
    ///
    /// Labels are matched case-insensitively. Unknown labels resolve to the
    /// esplanade distance.
    pub fn distance_for(&self, label: &str, params: &CalibrationParams) -> f64 {
        let label = label.trim();
        match self {
            StreetTable::Uniform => uniform_distance(label, params),
            StreetTable::Custom { bands, outer_limit } => {
                let position = bands
                    .iter()
                    .position(|band| band.label.eq_ignore_ascii_case(label));
                match position {
                    Some(i) => {
                        let lower = bands[i].threshold;
                        let upper = bands
                            .get(i + 1)
                            .map(|next| next.threshold)
                            .unwrap_or(*outer_limit);
                        lower + (upper - lower) / 2.0
                    }
                    None => params.esplanade_distance,
                }
            }
        }
    }

    /// Labels in ascending distance order
    pub fn labels(&self) -> Vec<String> {
        match self {
            StreetTable::Uniform => std::iter::once(ESPLANADE_LABEL.to_string())
                .chain((0..LETTERED_STREET_COUNT).map(|i| ((b'A' + i) as char).to_string()))
                .collect(),
            StreetTable::Custom { bands, .. } => bands.iter().map(|b| b.label.clone()).collect(),
        }
    }
}

fn uniform_label(distance: f64, params: &CalibrationParams) -> Option<String> {
    let esplanade = params.esplanade_distance;
    let block = params.block_width;
    let outer = esplanade + LETTERED_STREET_COUNT as f64 * block;

    if distance < esplanade || distance > outer {
        return None;
    }
    if distance < esplanade + block {
        return Some(ESPLANADE_LABEL.to_string());
    }
    let index = ((distance - esplanade) / block).floor() as u8;
    let index = index.clamp(1, LETTERED_STREET_COUNT);
    Some(((b'A' + index - 1) as char).to_string())
}

fn uniform_distance(label: &str, params: &CalibrationParams) -> f64 {
    let esplanade = params.esplanade_distance;
    let block = params.block_width;

    if label.eq_ignore_ascii_case(ESPLANADE_LABEL) {
        return esplanade + block / 2.0;
    }

    let mut chars = label.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase(),
        _ => return esplanade,
    };
    let last = (b'A' + LETTERED_STREET_COUNT - 1) as char;
    if !('A'..=last).contains(&letter) {
        return esplanade;
    }

    let index = (letter as u8 - b'A' + 1) as f64;
    // The last street is the outer edge itself, so its midpoint is capped
    let blocks = (index + 0.5).min(LETTERED_STREET_COUNT as f64);
    esplanade + blocks * block
}
