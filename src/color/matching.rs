//! Nearest-color tile search

use crate::color::profile::Color;
use crate::io::error::{MosaicError, Result};
use std::path::PathBuf;

/// Index of the color closest to `target` by Euclidean distance
///
/// Scans every candidate in order. On equal distances the earliest candidate
/// is kept, so a fixed tile ordering always yields the same choice.
///
/// # Errors
///
/// Returns `EmptyTileSet` if there are no candidates to choose from
pub fn closest_tile(colors: &[Color], target: &Color) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, color) in colors.iter().enumerate() {
        let distance = color.distance(target);
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
        .ok_or_else(|| MosaicError::EmptyTileSet {
            directory: PathBuf::new(),
        })
}
