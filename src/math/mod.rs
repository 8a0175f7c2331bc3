//! Color arithmetic shared by the matching and correction stages

/// Integer color vectors with averaging, subtraction, distance and clamped addition
pub mod color;

pub use color::Color;
