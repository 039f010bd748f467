//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

// Grid defaults, 50x50 cells
/// Default number of grid columns
pub const DEFAULT_COLUMNS: u32 = 50;
/// Default number of grid rows
pub const DEFAULT_ROWS: u32 = 50;
/// Default grid size as accepted on the command line
pub const DEFAULT_GRID: &str = "50x50";

/// Separator between columns and rows in a grid size argument
pub const GRID_SEPARATOR: char = 'x';

/// Resampling filter used to fit tiles to a grid cell
///
/// Fixed so repeated runs over the same inputs give identical output
pub const TILE_RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Resampling filter used when enlarging the finished mosaic
pub const OUTPUT_SCALE_FILTER: FilterType = FilterType::Nearest;

/// Default enlargement factor of the finished mosaic
pub const DEFAULT_OUTPUT_SCALE: u32 = 1;
/// Largest accepted enlargement factor
pub const MAX_OUTPUT_SCALE: u32 = 16;

// Output settings
/// Suffix added to the target's file stem for the default output name
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of the default output file
pub const OUTPUT_EXTENSION: &str = "jpg";

// Diagnostics
/// Number of tile colors listed at debug log level
pub const MAX_TILE_COLOR_DIAGNOSTICS: usize = 1000;
/// Tiles between progress log lines when progress bars are hidden
pub const TILE_LOG_INTERVAL: usize = 10;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
