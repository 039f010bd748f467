//! Tile set construction and mosaic assembly

/// Target loading, cell matching and canvas composition
pub mod assembler;
/// Loading and profiling of tile images
pub mod tileset;

pub use assembler::{MosaicConfig, compose, create_mosaic, create_mosaic_with_progress};
pub use tileset::{Tile, TileSet};
