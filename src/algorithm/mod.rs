/// Memoizing matcher keyed on target color
pub mod cache;
/// Mosaic composition over a whole source image
pub mod composer;
/// Additive tone correction of matched tiles
pub mod correction;
/// Nearest-color tile matching strategies
pub mod matcher;
