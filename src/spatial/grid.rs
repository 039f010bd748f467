//! Grid geometry partitioning a target image into equal rectangular cells
//!
//! Cell dimensions are the floor of the target size divided by the grid
//! counts. Pixels past the last full cell on either axis belong to no cell
//! and are never painted.

use crate::io::error::{Result, invalid_configuration};

/// Pixel bounds of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Zero-based column index
    pub column: u32,
    /// Zero-based row index
    pub row: u32,
    /// Left edge in pixels (inclusive)
    pub left: u32,
    /// Top edge in pixels (inclusive)
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Cell {
    /// Right edge in pixels (exclusive)
    pub const fn right(&self) -> u32 {
        self.left + self.width
    }

    /// Bottom edge in pixels (exclusive)
    pub const fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Grid laid over a target image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Number of cells across
    pub columns: u32,
    /// Number of cells down
    pub rows: u32,
    /// Width of every cell in pixels
    pub cell_width: u32,
    /// Height of every cell in pixels
    pub cell_height: u32,
    /// Target image width in pixels
    pub target_width: u32,
    /// Target image height in pixels
    pub target_height: u32,
}

impl GridGeometry {
    /// Derive cell dimensions for a `(columns, rows)` grid over a target
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - Either grid count is zero
    /// - Either grid count exceeds the target's pixel size on that axis
    pub fn new(target_dimensions: (u32, u32), grid_size: (u32, u32)) -> Result<Self> {
        let (target_width, target_height) = target_dimensions;
        let (columns, rows) = grid_size;

        validate_axis("columns", columns, target_width, "width")?;
        validate_axis("rows", rows, target_height, "height")?;

        Ok(Self {
            columns,
            rows,
            cell_width: target_width / columns,
            cell_height: target_height / rows,
            target_width,
            target_height,
        })
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Cell dimensions as `(width, height)`
    pub const fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Width of the area covered by cells
    pub const fn covered_width(&self) -> u32 {
        self.cell_width * self.columns
    }

    /// Height of the area covered by cells
    pub const fn covered_height(&self) -> u32 {
        self.cell_height * self.rows
    }

    /// Bounds of the cell at `(column, row)`, if inside the grid
    pub const fn cell(&self, column: u32, row: u32) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }

        Some(Cell {
            column,
            row,
            left: column * self.cell_width,
            top: row * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        })
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(&self, column: u32) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).filter_map(move |row| self.cell(column, row))
    }

    /// All cells, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.columns).flat_map(move |column| self.column_cells(column))
    }
}

fn validate_axis(
    parameter: &'static str,
    count: u32,
    pixels: u32,
    axis: &str,
) -> Result<()> {
    if count == 0 {
        return Err(invalid_configuration(
            parameter,
            &count,
            &"grid must have at least one cell on each axis",
        ));
    }

    if count > pixels {
        return Err(invalid_configuration(
            parameter,
            &count,
            &format!("exceeds target {axis} of {pixels} pixels, cells would be empty"),
        ));
    }

    Ok(())
}
