//! Command line, image I/O, progress display and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Defaults and limits
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Image decoding, resizing and atomic export
pub mod image;
/// Progress reporting interfaces and terminal bars
pub mod progress;
