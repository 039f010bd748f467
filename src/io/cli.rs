//! Command-line interface for building a photomosaic from a target image

use crate::io::configuration::{
    DEFAULT_GRID, DEFAULT_OUTPUT_SCALE, GRID_SEPARATOR, MAX_OUTPUT_SCALE, OUTPUT_EXTENSION,
    OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{save_mosaic, scale_mosaic};
use crate::io::progress::{ProgressManager, SilentProgress};
use crate::mosaic::assembler::{MosaicConfig, create_mosaic_with_progress};
use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    version,
    about = "Rebuild an image from tile images matched by average color"
)]
/// Command-line arguments for the mosaic builder
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image to reproduce as a mosaic
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate tile images
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Grid size as COLUMNSxROWS
    #[arg(short, long, default_value = DEFAULT_GRID, value_parser = parse_grid_size)]
    pub grid: (u32, u32),

    /// Output file (defaults to <target>_mosaic.jpg next to the target)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enlarge the finished mosaic by this factor
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_OUTPUT_SCALE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_OUTPUT_SCALE))
    )]
    pub scale: u32,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-tile diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Build the mosaic even if the output file exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if an existing output file should be left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.target))
    }

    /// Mosaic inputs described by these arguments
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig::new(&self.target, &self.tiles, self.grid)
    }
}

/// Parse a grid size written as `COLUMNSxROWS`
///
/// # Errors
///
/// Returns a message if the text is not two positive integers separated by `x`
pub fn parse_grid_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let lowered = value.to_ascii_lowercase();
    let Some((columns, rows)) = lowered.split_once(GRID_SEPARATOR) else {
        return Err(format!(
            "expected COLUMNS{GRID_SEPARATOR}ROWS, for example {DEFAULT_GRID}"
        ));
    };

    let parse = |text: &str, name: &str| -> std::result::Result<u32, String> {
        match text.parse::<u32>() {
            Ok(0) => Err(format!("{name} must be at least 1")),
            Ok(count) => Ok(count),
            Err(e) => Err(format!("invalid {name} '{text}': {e}")),
        }
    };

    Ok((parse(columns.trim(), "columns")?, parse(rows.trim(), "rows")?))
}

/// Output path used when none is given: `<stem>_mosaic.jpg` beside the target
pub fn default_output_path(target: &Path) -> PathBuf {
    let stem = target.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
        stem.to_string_lossy()
    );

    if let Some(parent) = target.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs one mosaic build from parsed arguments to a written file
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build and save the mosaic
    ///
    /// Nothing is written unless the whole mosaic was built.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the target cannot be
    /// used, no tile is usable, or the output cannot be written
    pub fn process(&self) -> Result<()> {
        let output_path = self.cli.output_path();
        if self.cli.skip_existing() && output_path.exists() {
            log::warn!(
                "Skipping: {} (output exists, use --no-skip to overwrite)",
                output_path.display()
            );
            return Ok(());
        }

        let start_time = Instant::now();
        let config = self.cli.mosaic_config();

        let mosaic = if self.cli.should_show_progress() {
            create_mosaic_with_progress(&config, &mut ProgressManager::new())?
        } else {
            create_mosaic_with_progress(&config, &mut SilentProgress)?
        };

        let scaled = scale_mosaic(&mosaic, self.cli.scale)?;
        save_mosaic(&scaled, &output_path)?;

        log::info!(
            "Saved {}x{} mosaic to '{}' in {:.2?}",
            scaled.width(),
            scaled.height(),
            output_path.display(),
            start_time.elapsed()
        );
        Ok(())
    }
}
