//! Color profiling and nearest-color matching

/// Nearest-color search over profiled tiles
pub mod matching;
/// Average color computation for images and image regions
pub mod profile;

pub use profile::Color;
