//! Error classification for address conversion and calibration
//!
//! Every condition here is local and recoverable: parse failures are handed
//! back to the caller, rejected calibration updates leave the previous
//! configuration in place.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

/// Malformed address, coordinate or record text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("malformed address '{input}': {reason}")]
    MalformedAddress { input: String, reason: String },

    #[error("invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: &'static str, actual: usize },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn malformed(input: &str, reason: &str) -> Self {
        ParseError::MalformedAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn number(field: &'static str, value: &str) -> Self {
        ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }

    /// Attach a 1-based line number to an error raised while reading records
    pub fn at_line(self, line: usize) -> Self {
        ParseError::Line {
            line,
            source: Box::new(self),
        }
    }
}

/// Rejected calibration or configuration change
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("street table rejected: {reason}")]
    StreetTable { reason: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NavError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::number("hour", "x");
        assert_eq!(err.to_string(), "invalid hour: 'x'");

        let err = ParseError::malformed("4-30", "missing '&' separator").at_line(7);
        assert_eq!(
            err.to_string(),
            "line 7: malformed address '4-30': missing '&' separator"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("block_width", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'block_width' = '-1': must be positive"
        );
    }

    #[test]
    fn test_nav_error_from() {
        let err: NavError = ConfigError::Io {
            message: "gone".to_string(),
        }
        .into();
        assert!(matches!(err, NavError::Config(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
