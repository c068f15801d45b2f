use log::{debug, warn};

use crate::core::{GeoCoordinate, RadialAddress};
use crate::processing::codec::{parse_address, parse_street_or_distance, to_address};
use crate::utils::config::Calibration;
use crate::validation::error::ParseError;

/// Where a record is, as written in the source line
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPosition {
    /// `latitude, longitude`
    Geographic(GeoCoordinate),
    /// `hour, minute, street-or-distance`, kept as text until resolved
    Radial {
        hour: u32,
        minute: u32,
        street: String,
    },
    /// A full `"H:MM & street"` address
    Address(String),
}

/// One parsed bulk-load line
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkRecord {
    /// `None` for amenity files, which carry positions only
    pub name: Option<String>,
    pub position: RecordPosition,
    pub description: Option<String>,
}

impl LandmarkRecord {
    /// Radial address of the record under the given calibration
    pub fn resolve(&self, calibration: &Calibration) -> Result<RadialAddress, ParseError> {
        match &self.position {
            RecordPosition::Geographic(geo) => Ok(to_address(geo, calibration)),
            RecordPosition::Radial {
                hour,
                minute,
                street,
            } => {
                let distance = parse_street_or_distance(street, calibration)?;
                RadialAddress::new(*hour, *minute, distance)
            }
            RecordPosition::Address(text) => parse_address(text, calibration),
        }
    }
}

/// Records and per-line failures from one input
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<LandmarkRecord>,
    pub errors: Vec<ParseError>,
}

/// Splits delimited lines into [`LandmarkRecord`]s.
///
/// Unnamed input takes `lat,lon` or `hour,minute,street`; named input takes
/// `name,lat,lon`, `name,hour,minute,street` or `name<delim>H:MM & street`
/// with an optional trailing description. Blank lines and lines starting
/// with `#` are skipped.
pub struct RecordParser {
    delimiter: char,
    named: bool,
}

impl RecordParser {
    /// Comma-separated records with a leading name
    pub fn named() -> Self {
        Self {
            delimiter: ',',
            named: true,
        }
    }

    /// Comma-separated positions without names
    pub fn unnamed() -> Self {
        Self {
            delimiter: ',',
            named: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a single line
    pub fn parse_line(&self, line: &str) -> Result<LandmarkRecord, ParseError> {
        let fields: Vec<&str> = line.split(self.delimiter).map(str::trim).collect();
        if self.named {
            self.parse_named(&fields)
        } else {
            let position = parse_position(&fields, "2 or 3")?;
            Ok(LandmarkRecord {
                name: None,
                position,
                description: None,
            })
        }
    }

    fn parse_named(&self, fields: &[&str]) -> Result<LandmarkRecord, ParseError> {
        let (name, rest) = match fields.split_first() {
            Some((name, rest)) if !name.is_empty() => (name.to_string(), rest),
            _ => return Err(ParseError::malformed(&fields.join(","), "missing name")),
        };

        // Text address form, optionally followed by a description
        if let Some(address) = rest.first().filter(|f| f.contains('&')) {
            if rest.len() > 2 {
                return Err(ParseError::FieldCount {
                    expected: "2 or 3",
                    actual: fields.len(),
                });
            }
            let description = rest.get(1).filter(|d| !d.is_empty()).map(|d| d.to_string());
            return Ok(LandmarkRecord {
                name: Some(name),
                position: RecordPosition::Address(address.to_string()),
                description,
            });
        }

        let position = parse_position(rest, "3 or 4").map_err(|e| match e {
            ParseError::FieldCount { expected, actual } => ParseError::FieldCount {
                expected,
                actual: actual + 1,
            },
            other => other,
        })?;
        Ok(LandmarkRecord {
            name: Some(name),
            position,
            description: None,
        })
    }

    /// Parse every line, keeping going past bad ones
    pub fn parse_lines<'a, I>(&self, lines: I) -> ParsedRecords
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parsed = ParsedRecords::default();
        for (index, line) in lines.into_iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self.parse_line(trimmed) {
                Ok(record) => parsed.records.push(record),
                Err(e) => {
                    let e = e.at_line(index + 1);
                    warn!("skipping record: {}", e);
                    parsed.errors.push(e);
                }
            }
        }
        debug!(
            "parsed {} record(s), {} rejected",
            parsed.records.len(),
            parsed.errors.len()
        );
        parsed
    }

    pub fn parse_str(&self, text: &str) -> ParsedRecords {
        self.parse_lines(text.lines())
    }
}

fn parse_position(fields: &[&str], expected: &'static str) -> Result<RecordPosition, ParseError> {
    match fields {
        [lat, lon] => {
            let latitude = lat
                .parse::<f64>()
                .map_err(|_| ParseError::number("latitude", lat))?;
            let longitude = lon
                .parse::<f64>()
                .map_err(|_| ParseError::number("longitude", lon))?;
            Ok(RecordPosition::Geographic(GeoCoordinate::new(latitude, longitude)?))
        }
        [hour, minute, street] => {
            let hour = hour
                .parse::<u32>()
                .map_err(|_| ParseError::number("hour", hour))?;
            let minute = minute
                .parse::<u32>()
                .map_err(|_| ParseError::number("minute", minute))?;
            if street.is_empty() {
                return Err(ParseError::malformed(&fields.join(","), "missing street"));
            }
            Ok(RecordPosition::Radial {
                hour,
                minute,
                street: street.to_string(),
            })
        }
        _ => Err(ParseError::FieldCount {
            expected,
            actual: fields.len(),
        }),
    }
}
