//! Street layout, address text and bulk-load records

pub mod codec;
pub mod parser;
pub mod streets;

pub use codec::{format_address, format_export, parse_address, to_address, to_distance, to_street_label};
pub use parser::{LandmarkRecord, ParsedRecords, RecordParser, RecordPosition};
pub use streets::{StreetBand, StreetTable};
