//! Command-line interface for building a photomosaic from a tile directory

use crate::algorithm::cache::MatchCache;
use crate::algorithm::composer::MosaicComposer;
use crate::algorithm::matcher::LinearMatcher;
use crate::io::configuration::{DEFAULT_OUTPUT_PATH, DEFAULT_SEGMENT_SIZE, MAX_SEGMENT_SIZE};
use crate::io::error::Result;
use crate::io::image::output_format;
use crate::io::progress::{NoProgress, ProgressManager, ProgressReporter};
use crate::spatial::{LibraryConfig, LoadPolicy, TileLibrary};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(
    author,
    version,
    about = "Generate a photomosaic from a source image and a directory of tiles"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Source image the mosaic reproduces, one tile per pixel
    #[arg(value_name = "SOURCE_FILE")]
    pub source_file: PathBuf,

    /// Directory of tile images (any size, any supported format)
    #[arg(value_name = "SEGMENTS_DIR")]
    pub segments_dir: PathBuf,

    /// Output file; the format follows the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub out: PathBuf,

    /// Side length of each square tile in pixels
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SEGMENT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SEGMENT_SIZE))
    )]
    pub size: u32,

    /// Blend a half-pixel dark frame into the border of every tile
    #[arg(short, long)]
    pub frames: bool,

    /// Downsample the source to at most this many columns first
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Skip tile files that cannot be decoded instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flag
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Tile library settings derived from the flags
    pub const fn library_config(&self) -> LibraryConfig {
        let load_policy = if self.skip_invalid {
            LoadPolicy::Skip
        } else {
            LoadPolicy::Abort
        };
        LibraryConfig::new(self.size)
            .with_frame(self.frames)
            .with_load_policy(load_policy)
    }
}

/// Runs the load-then-compose pipeline for one invocation
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the tile library and write the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output extension does not name a supported format
    /// - The tile directory cannot be read or yields no usable tiles
    /// - A tile or the source image cannot be decoded
    /// - The output cannot be written
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        output_format(&self.cli.out)?;

        let library = {
            let mut progress = self.reporter("Loading tiles");
            TileLibrary::build(
                &self.cli.segments_dir,
                &self.cli.library_config(),
                progress.as_mut(),
            )?
        };

        let mut composer = MosaicComposer::with_matcher(&library, MatchCache::new(LinearMatcher))?
            .with_max_columns(self.cli.width)?;
        {
            let mut progress = self.reporter("Composing");
            composer.compose(&self.cli.source_file, &self.cli.out, progress.as_mut())?;
        }

        let cache = composer.matcher();
        log::info!(
            "Finished {} in {:.2?} ({} distinct colors matched, {} cache hits)",
            self.cli.out.display(),
            start_time.elapsed(),
            cache.len(),
            cache.stats.hits
        );

        Ok(())
    }

    fn reporter(&self, label: &'static str) -> Box<dyn ProgressReporter> {
        if self.cli.should_show_progress() {
            Box::new(ProgressManager::new(label))
        } else {
            Box::new(NoProgress)
        }
    }
}
