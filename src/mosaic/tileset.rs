//! Tile loading, resizing and profiling
//!
//! Tiles are read from a single directory in lexicographic path order so the
//! index of every tile, and therefore tie-breaking during matching, does not
//! depend on how the platform lists directory entries. Files that fail to
//! decode or carry an alpha channel are logged and left out.

use crate::color::matching::closest_tile;
use crate::color::profile::{Color, average_color};
use crate::io::configuration::{MAX_TILE_COLOR_DIAGNOSTICS, TILE_LOG_INTERVAL, TILE_RESIZE_FILTER};
use crate::io::error::{MosaicError, Result, WithContext, invalid_configuration};
use crate::io::image::load_image;
use crate::io::progress::MosaicProgress;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// A tile resized to one grid cell together with its average color
#[derive(Debug, Clone)]
pub struct Tile {
    /// File the tile was loaded from
    pub path: PathBuf,
    /// Pixels at exactly one cell's dimensions
    pub image: RgbImage,
    /// Average color of the resized pixels
    pub color: Color,
}

/// Ordered collection of profiled tiles
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
    colors: Vec<Color>,
}

impl TileSet {
    /// Build a tile set from already profiled tiles, keeping their order
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let colors = tiles.iter().map(|tile| tile.color).collect();
        Self { tiles, colors }
    }

    /// Load every usable tile in `directory`, resized to `cell_size`
    ///
    /// Unreadable files and files with an alpha channel are skipped. An empty
    /// result is not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `directory` does not exist or is not a directory
    /// - The directory listing cannot be read
    pub fn load(
        directory: &Path,
        cell_size: (u32, u32),
        progress: &mut impl MosaicProgress,
    ) -> Result<Self> {
        let paths = list_tile_files(directory)?;
        progress.tiles_started(paths.len());

        let mut tiles = Vec::with_capacity(paths.len());
        for (index, path) in paths.into_iter().enumerate() {
            match load_tile(&path, cell_size) {
                Ok(tile) => {
                    progress.tile_processed(index, &path, true);
                    tiles.push(tile);
                }
                Err(error) => {
                    log::warn!("Skipping tile: {error}");
                    progress.tile_processed(index, &path, false);
                }
            }

            if index % TILE_LOG_INTERVAL == 0 {
                log::debug!("Processed {} tile images", index + 1);
            }
        }

        let tile_set = Self::from_tiles(tiles);
        log::info!(
            "Loaded {} tile images from '{}'",
            tile_set.len(),
            directory.display()
        );
        tile_set.log_color_diagnostics();

        Ok(tile_set)
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile survived loading
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in index order
    pub const fn tiles(&self) -> &[Tile] {
        self.tiles.as_slice()
    }

    /// Average colors, co-indexed with `tiles`
    pub const fn colors(&self) -> &[Color] {
        self.colors.as_slice()
    }

    /// Tile at `index`
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Tile whose color is nearest to `target`, first one on ties
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if the set has no tiles
    pub fn closest(&self, target: &Color) -> Result<&Tile> {
        let index = closest_tile(&self.colors, target)?;
        self.tiles.get(index).ok_or_else(|| MosaicError::EmptyTileSet {
            directory: PathBuf::new(),
        })
    }

    fn log_color_diagnostics(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        for (index, tile) in self.tiles.iter().take(MAX_TILE_COLOR_DIAGNOSTICS).enumerate() {
            let [red, green, blue] = tile.color.channels();
            log::debug!(
                "Tile {index} '{}': ({red:.2}, {green:.2}, {blue:.2})",
                tile.path.display()
            );
        }
    }
}

/// Decode, resize and profile a single tile
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be decoded as an image
/// - The image has an alpha channel
pub fn load_tile(path: &Path, cell_size: (u32, u32)) -> Result<Tile> {
    let (cell_width, cell_height) = cell_size;
    let resized = load_image(path)?.resize_exact(cell_width, cell_height, TILE_RESIZE_FILTER);
    let color = average_color(&resized).with_path(path)?;

    Ok(Tile {
        path: path.to_path_buf(),
        image: resized.to_rgb8(),
        color,
    })
}

/// Regular files in `directory`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory is missing or cannot be listed
pub fn list_tile_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(invalid_configuration(
            "tile_image_dir",
            &directory.display(),
            &"tile directory does not exist or is not a directory",
        ));
    }

    let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "list tile directory",
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| MosaicError::FileSystem {
                path: directory.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();

        if path.is_file() {
            paths.push(path);
        } else {
            log::debug!("Ignoring non-file entry '{}'", path.display());
        }
    }

    paths.sort();
    Ok(paths)
}
