//! CLI entry point for photomosaic generation

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .init();

    let processor = MosaicProcessor::new(cli);
    processor.process()
}
