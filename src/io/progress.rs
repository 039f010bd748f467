//! Progress reporting for tile loading and mosaic assembly

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;

/// Observer notified as a mosaic is built
///
/// All methods default to doing nothing.
pub trait MosaicProgress {
    /// Tile loading is about to process `total` files
    fn tiles_started(&mut self, _total: usize) {}

    /// The tile at `index` was processed; `accepted` is false when it was skipped
    fn tile_processed(&mut self, _index: usize, _path: &Path, _accepted: bool) {}

    /// Matching is about to process `columns` grid columns
    fn assembly_started(&mut self, _columns: u32) {}

    /// Every cell of `column` has been painted
    fn column_completed(&mut self, _column: u32) {}

    /// The mosaic is complete
    fn finish(&mut self) {}
}

/// Progress observer that reports nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl MosaicProgress for SilentProgress {}

/// Terminal progress bars for the two phases of a run
///
/// One bar counts tiles as they are loaded, a second counts completed grid
/// columns during assembly.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    tile_bar: Option<ProgressBar>,
    column_bar: Option<ProgressBar>,
    accepted_tiles: usize,
    skipped_tiles: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            tile_bar: None,
            column_bar: None,
            accepted_tiles: 0,
            skipped_tiles: 0,
        }
    }

    /// Tiles kept so far
    pub const fn accepted_tiles(&self) -> usize {
        self.accepted_tiles
    }

    /// Tiles skipped so far
    pub const fn skipped_tiles(&self) -> usize {
        self.skipped_tiles
    }

    fn bar_style(label: &str) -> ProgressStyle {
        let template =
            format!("{label:>8} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ")
    }

    fn add_bar(&self, length: u64, label: &str) -> ProgressBar {
        let bar = ProgressBar::new(length);
        bar.set_style(Self::bar_style(label));
        self.multi_progress.add(bar)
    }
}

impl MosaicProgress for ProgressManager {
    fn tiles_started(&mut self, total: usize) {
        self.accepted_tiles = 0;
        self.skipped_tiles = 0;
        self.tile_bar = Some(self.add_bar(total as u64, "Tiles"));
    }

    fn tile_processed(&mut self, _index: usize, path: &Path, accepted: bool) {
        if accepted {
            self.accepted_tiles += 1;
        } else {
            self.skipped_tiles += 1;
        }

        if let Some(ref bar) = self.tile_bar {
            bar.inc(1);
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(format!("{name} ({} skipped)", self.skipped_tiles));
        }
    }

    fn assembly_started(&mut self, columns: u32) {
        if let Some(ref bar) = self.tile_bar {
            bar.finish_with_message(format!(
                "{} loaded, {} skipped",
                self.accepted_tiles, self.skipped_tiles
            ));
        }
        self.column_bar = Some(self.add_bar(u64::from(columns), "Columns"));
    }

    fn column_completed(&mut self, column: u32) {
        if let Some(ref bar) = self.column_bar {
            bar.set_position(u64::from(column) + 1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref bar) = self.column_bar {
            bar.finish_with_message("Mosaic complete");
        }
        let _ = self.multi_progress.clear();
    }
}
