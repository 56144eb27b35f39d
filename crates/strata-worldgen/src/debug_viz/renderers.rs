//! Level renderers: one color or glyph per tile.

use strata_level::{Level, Tile};

use super::image::{DebugImage, Rgba};
use crate::error::WorldgenError;

/// Preview color for a tile.
pub fn tile_color(tile: Tile) -> Rgba {
    let [r, g, b] = match tile {
        Tile::Void => return [0, 0, 0, 0],
        Tile::Water => [30, 80, 200],
        Tile::Lava => [230, 80, 20],
        Tile::Rock => [120, 120, 120],
        Tile::HardRock => [90, 90, 100],
        Tile::Basalt => [50, 45, 55],
        Tile::Sand => [220, 200, 130],
        Tile::Grass => [60, 160, 50],
        Tile::Dirt => [130, 90, 50],
        Tile::Stone => [170, 165, 155],
        Tile::Cactus => [40, 120, 60],
        Tile::Tree => [20, 90, 20],
        Tile::TallGrass => [90, 190, 70],
        Tile::Daisy => [245, 245, 230],
        Tile::Poppy => [210, 30, 40],
        Tile::IronOre => [200, 150, 130],
        Tile::GoldOre => [240, 200, 40],
        Tile::GemOre => [180, 60, 220],
        Tile::MithrilOre => [120, 220, 230],
        Tile::Cloud => [235, 240, 250],
        Tile::CloudBank => [180, 190, 210],
        Tile::StairsUp => [255, 255, 0],
        Tile::StairsDown => [255, 0, 255],
    };
    [r, g, b, 255]
}

/// Largest width or height of a rendered preview, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Render `level` with each tile drawn as a `scale × scale` block.
///
/// A `scale` of 0 is treated as 1.
///
/// # Errors
///
/// Returns [`WorldgenError::ImageTooLarge`] if either side of the image would
/// exceed [`MAX_IMAGE_SIDE`].
pub fn render_level(level: &Level, scale: u32) -> Result<DebugImage, WorldgenError> {
    let scale = scale.max(1);
    let side = |tiles: u32| tiles.checked_mul(scale).filter(|&px| px <= MAX_IMAGE_SIDE);
    let (Some(width), Some(height)) = (side(level.width()), side(level.height())) else {
        return Err(WorldgenError::ImageTooLarge {
            width: level.width(),
            height: level.height(),
            scale,
        });
    };

    let mut image = DebugImage::new(width, height);
    for (x, y, tile) in level.iter() {
        image.fill_block(x as u32 * scale, y as u32 * scale, scale, tile_color(tile));
    }
    Ok(image)
}

/// Render `level` as text, one line per row, using [`Tile::glyph`].
pub fn render_ascii(level: &Level) -> String {
    let mut out = String::with_capacity((level.width() as usize + 1) * level.height() as usize);
    for y in 0..level.height() as i32 {
        for x in 0..level.width() as i32 {
            out.push(level.get(x, y).glyph());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strata_level::LevelInfo;

    fn sample_level() -> Level {
        let mut level = Level::new(LevelInfo::new(0, 0, 4, 3).unwrap()).unwrap();
        level.fill(Tile::Grass);
        level.set(0, 0, Tile::Water);
        level.set(3, 2, Tile::Tree);
        level
    }

    #[test]
    fn test_tile_colors_are_distinct() {
        let colors: HashSet<Rgba> = Tile::ALL.iter().map(|&t| tile_color(t)).collect();
        assert_eq!(colors.len(), Tile::COUNT, "every tile should have its own color");
    }

    #[test]
    fn test_only_void_is_transparent() {
        for tile in Tile::ALL {
            let alpha = tile_color(tile)[3];
            assert_eq!(alpha == 0, tile == Tile::Void, "{tile}");
        }
    }

    #[test]
    fn test_render_level_scales() {
        let level = sample_level();
        let image = render_level(&level, 3).unwrap();
        assert_eq!(image.dimensions(), (12, 9));
        assert_eq!(image.get_pixel(0, 0), tile_color(Tile::Water));
        assert_eq!(image.get_pixel(2, 2), tile_color(Tile::Water));
        assert_eq!(image.get_pixel(3, 0), tile_color(Tile::Grass));
        assert_eq!(image.get_pixel(11, 8), tile_color(Tile::Tree));
        assert_eq!(image.unique_color_count(), 3);
    }

    #[test]
    fn test_render_level_zero_scale() {
        let image = render_level(&sample_level(), 0).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
    }

    #[test]
    fn test_render_level_rejects_oversized_scale() {
        let level = sample_level();
        for scale in [MAX_IMAGE_SIDE, u32::MAX / 2, u32::MAX] {
            assert!(
                matches!(
                    render_level(&level, scale),
                    Err(WorldgenError::ImageTooLarge { width: 4, height: 3, .. })
                ),
                "scale {scale} should be rejected"
            );
        }
    }

    #[test]
    fn test_render_ascii() {
        let text = render_ascii(&sample_level());
        assert_eq!(text, "~...\n....\n...T\n");
    }
}
