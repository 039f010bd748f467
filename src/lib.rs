//! Photomosaic construction by average color matching
//!
//! A target image is split into a grid of equal cells. Every cell is replaced
//! by the tile image whose mean RGB color lies closest to the cell's own mean
//! color, scanning the tiles in a fixed sorted order so that equal distances
//! always resolve to the same tile.

#![forbid(unsafe_code)]

/// Average color profiling and nearest-color matching
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Tile set loading and mosaic assembly
pub mod mosaic;
/// Grid geometry over the target image
pub mod spatial;

pub use color::Color;
pub use io::error::{MosaicError, Result};
pub use mosaic::{MosaicConfig, create_mosaic};
