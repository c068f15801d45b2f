//! Landmark search and navigation state

pub mod index;
pub mod navigator;

pub use index::{nearest, Landmark, LandmarkIndex, SharedLandmarkIndex};
pub use navigator::Navigator;
