//! Row-major RGBA raster used for level previews.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::WorldgenError;

/// An RGBA color.
pub type Rgba = [u8; 4];

/// A preview image, stored as row-major RGBA bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// A transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Paint a `size × size` block whose top-left pixel is `(x, y)`, clipped to the image.
    pub fn fill_block(&mut self, x: u32, y: u32, size: u32, color: Rgba) {
        let x_end = x.saturating_add(size).min(self.width);
        let y_end = y.saturating_add(size).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, color);
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of distinct RGB colors, ignoring alpha.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|c| (c[0], c[1], c[2]))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Encode the image as an 8-bit RGBA PNG into `out`.
    pub fn encode_png<W: Write>(&self, out: W) -> Result<(), WorldgenError> {
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the image to `path` as a PNG file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), WorldgenError> {
        let file = File::create(path.as_ref())?;
        self.encode_png(BufWriter::new(file))
    }
}
