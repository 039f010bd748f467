//! CLI entry point for the photomosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();

    let log_config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .build();
    // A logger can only be installed once per process
    let _ = TermLogger::init(
        cli.log_level(),
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let processor = MosaicProcessor::new(cli);
    processor.process()
}
