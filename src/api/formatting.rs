//! Panel output formatting
//!
//! Human-readable text for the terminal and JSON for anything consuming
//! the panel programmatically.

use serde::Serialize;

use crate::api::types::{Directions, PanelUpdate};

/// Text formatter for panel updates
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single line instead of one line per section
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Address plus distance and heading, e.g. `"4:30 & D (1200', north)"`
    pub fn format_directions(&self, directions: &Directions) -> String {
        match &directions.target {
            Some(name) if !self.compact => {
                format!("{}: {} ({})", name, directions.address, directions)
            }
            _ => format!("{} ({})", directions.address, directions),
        }
    }

    pub fn format_panel(&self, panel: &PanelUpdate) -> String {
        let current = panel.current.as_deref().unwrap_or("no fix");
        let sections = [
            ("Restroom", &panel.nearest_amenity),
            ("Home", &panel.home),
            ("Destination", &panel.destination),
        ];

        if self.compact {
            let mut output = format!("Here: {}", current);
            for (label, directions) in sections {
                if let Some(directions) = directions {
                    output.push_str(&format!(" | {}: {}", label, directions));
                }
            }
            return output;
        }

        let mut output = format!("Location:    {}\n", current);
        for (label, directions) in sections {
            let line = match directions {
                Some(directions) => self.format_directions(directions),
                None => "-".to_string(),
            };
            output.push_str(&format!("{:<12} {}\n", format!("{}:", label), line));
        }
        output
    }
}

/// JSON formatter for panel updates and directions
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geometry::Heading;

    fn panel() -> PanelUpdate {
        PanelUpdate {
            current: Some("6:00 & A".to_string()),
            nearest_amenity: Some(Directions {
                target: None,
                address: "6:15 & B".to_string(),
                distance_ft: 310,
                heading: Heading::Southeast,
            }),
            home: None,
            destination: Some(Directions {
                target: Some("Dust Lounge".to_string()),
                address: "4:30 & D".to_string(),
                distance_ft: 2200,
                heading: Heading::East,
            }),
        }
    }

    #[test]
    fn test_text_panel() {
        let text = TextFormatter::new().format_panel(&panel());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Location:    6:00 & A");
        assert_eq!(lines[1], "Restroom:    6:15 & B (310', southeast)");
        assert_eq!(lines[2], "Home:        -");
        assert_eq!(lines[3], "Destination: Dust Lounge: 4:30 & D (2200', east)");
    }

    #[test]
    fn test_compact_panel() {
        let text = TextFormatter::compact().format_panel(&panel());
        assert_eq!(
            text,
            "Here: 6:00 & A | Restroom: 310', southeast | Destination: 2200', east"
        );
        assert_eq!(
            TextFormatter::compact().format_panel(&PanelUpdate::default()),
            "Here: no fix"
        );
    }

    #[test]
    fn test_json_panel() {
        let json = JsonFormatter::new().format_json(&panel()).unwrap();
        let back: PanelUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, panel());
        assert!(json.contains(r#""home":null"#));
    }
}
