//! Output contracts and formatters

pub mod formatting;
pub mod types;

pub use formatting::{JsonFormatter, TextFormatter};
pub use types::{Directions, OutputFormat, PanelUpdate};
