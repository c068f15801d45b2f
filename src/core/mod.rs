//! Core types and constants for radial addressing

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
