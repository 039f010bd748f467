//! Mosaic assembly: target loading, cell matching and canvas composition

use crate::color::profile::average_region_color;
use crate::io::error::{MosaicError, Result, WithContext, invalid_configuration};
use crate::io::image::load_image;
use crate::io::progress::{MosaicProgress, SilentProgress};
use crate::mosaic::tileset::TileSet;
use crate::spatial::grid::GridGeometry;
use image::{DynamicImage, RgbImage, imageops};
use std::path::PathBuf;

/// Inputs of a single mosaic build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Image to reproduce
    pub target_image_path: PathBuf,
    /// Directory holding candidate tile images
    pub tile_image_dir: PathBuf,
    /// Grid size as `(columns, rows)`
    pub grid_size: (u32, u32),
}

impl MosaicConfig {
    /// Create a configuration
    pub fn new(
        target_image_path: impl Into<PathBuf>,
        tile_image_dir: impl Into<PathBuf>,
        grid_size: (u32, u32),
    ) -> Self {
        Self {
            target_image_path: target_image_path.into(),
            tile_image_dir: tile_image_dir.into(),
            grid_size,
        }
    }

    /// Check everything that can be checked before touching any image
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - Either grid count is zero
    /// - The target path is not a file
    /// - The tile directory does not exist
    pub fn validate(&self) -> Result<()> {
        let (columns, rows) = self.grid_size;
        if columns == 0 || rows == 0 {
            return Err(invalid_configuration(
                "grid_size",
                &format!("{columns}x{rows}"),
                &"grid must have at least one cell on each axis",
            ));
        }

        if !self.target_image_path.is_file() {
            return Err(invalid_configuration(
                "target_image_path",
                &self.target_image_path.display(),
                &"target image does not exist or is not a file",
            ));
        }

        if !self.tile_image_dir.is_dir() {
            return Err(invalid_configuration(
                "tile_image_dir",
                &self.tile_image_dir.display(),
                &"tile directory does not exist or is not a directory",
            ));
        }

        Ok(())
    }
}

/// Build a mosaic without progress reporting
///
/// # Errors
///
/// See [`create_mosaic_with_progress`]
pub fn create_mosaic(config: &MosaicConfig) -> Result<RgbImage> {
    create_mosaic_with_progress(config, &mut SilentProgress)
}

/// Build a mosaic, reporting progress to `progress`
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid or the grid is finer than the target
/// - The target cannot be decoded or has an alpha channel
/// - No tile in the tile directory could be used
pub fn create_mosaic_with_progress(
    config: &MosaicConfig,
    progress: &mut impl MosaicProgress,
) -> Result<RgbImage> {
    config.validate()?;

    log::info!(
        "Loading target image '{}'",
        config.target_image_path.display()
    );
    let target = load_target(config)?;
    let geometry = GridGeometry::new((target.width(), target.height()), config.grid_size)?;
    log::info!(
        "Target {}x{}, grid {}x{} (each cell is {}x{} pixels)",
        geometry.target_width,
        geometry.target_height,
        geometry.columns,
        geometry.rows,
        geometry.cell_width,
        geometry.cell_height
    );

    let tiles = TileSet::load(&config.tile_image_dir, geometry.cell_size(), progress)?;
    if tiles.is_empty() {
        return Err(MosaicError::EmptyTileSet {
            directory: config.tile_image_dir.clone(),
        });
    }

    compose(&target, &geometry, &tiles, progress).with_path(&config.target_image_path)
}

/// Paint every cell of `geometry` with the tile nearest its average color
///
/// Cells are visited column by column. Pixels outside the covered area stay
/// black.
///
/// # Errors
///
/// Returns an error if:
/// - `tiles` is empty
/// - The target has an alpha channel
/// - `geometry` does not fit inside `target`
pub fn compose(
    target: &DynamicImage,
    geometry: &GridGeometry,
    tiles: &TileSet,
    progress: &mut impl MosaicProgress,
) -> Result<RgbImage> {
    if tiles.is_empty() {
        return Err(MosaicError::EmptyTileSet {
            directory: PathBuf::new(),
        });
    }

    let mut canvas = RgbImage::new(geometry.target_width, geometry.target_height);
    progress.assembly_started(geometry.columns);

    for column in 0..geometry.columns {
        for cell in geometry.column_cells(column) {
            let cell_color = average_region_color(target, &cell)?;
            let tile = tiles.closest(&cell_color)?;
            imageops::replace(
                &mut canvas,
                &tile.image,
                i64::from(cell.left),
                i64::from(cell.top),
            );
        }

        progress.column_completed(column);
        log::debug!("Completed column {} of {}", column + 1, geometry.columns);
    }

    progress.finish();
    log::info!("Mosaic creation complete");
    Ok(canvas)
}

fn load_target(config: &MosaicConfig) -> Result<DynamicImage> {
    let target = load_image(&config.target_image_path)?;

    let color_type = target.color();
    if color_type.has_alpha() {
        return Err(MosaicError::UnsupportedImageFormat {
            path: Some(config.target_image_path.clone()),
            color_type,
        });
    }

    Ok(target)
}
