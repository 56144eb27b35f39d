//! Tile identifiers and the bounds-safe level grid consumed by world generation.

pub mod level;
pub mod tile;

pub use level::{Level, LevelError, LevelInfo};
pub use tile::Tile;
