//! Level previews: RGBA images, PNG files and ASCII dumps.
//!
//! Used by the command-line front end and by tests to eyeball generation
//! output.

mod image;
mod renderers;

pub use self::image::{DebugImage, Rgba};
pub use renderers::{render_ascii, render_level, tile_color};
