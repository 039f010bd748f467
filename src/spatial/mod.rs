//! Spatial layout of the mosaic grid

/// Grid geometry and cell bounds
pub mod grid;

pub use grid::{Cell, GridGeometry};
