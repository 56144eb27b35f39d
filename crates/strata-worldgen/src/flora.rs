//! Vegetation decoration: cacti on sand, trees and tall grass on grass, and
//! rectangular flower patches.

use strata_level::{Level, Tile};
use tracing::trace;

use crate::seed::{LevelRng, NoiseSource};
use crate::shaping::safe_pow;

/// Tunables for the flora pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloraParams {
    /// One sand cell in `cactus_rarity` becomes a cactus.
    pub cactus_rarity: u32,
    /// Flora noise scale divisor.
    pub noise_scale: f64,
    /// Exponent applied to the flora noise.
    pub noise_exponent: f64,
    /// Flora noise at or above which grass becomes a tree.
    pub tree_threshold: f64,
    /// Inclusive flora-noise band in which grass may become tall grass.
    pub tall_grass_band: (f64, f64),
    /// One remaining grass cell in `flower_rarity` seeds a flower patch.
    pub flower_rarity: u32,
    /// Range of the flora channel offset.
    pub channel_span: f64,
}

impl Default for FloraParams {
    fn default() -> Self {
        Self {
            cactus_rarity: 128,
            noise_scale: 8.0,
            noise_exponent: 1.1,
            tree_threshold: 0.2,
            tall_grass_band: (-0.08, 0.0),
            flower_rarity: 32,
            channel_span: 128.0,
        }
    }
}

/// What the flora pass placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloraStats {
    pub cacti: u32,
    pub trees: u32,
    pub tall_grass: u32,
    pub flower_patches: u32,
    pub flowers: u32,
}

/// Decorate the level in a single row-major pass.
///
/// The flora channel offset is drawn once before the first cell.
pub fn decorate(
    level: &mut Level,
    noise: &NoiseSource,
    rng: &mut LevelRng,
    params: &FloraParams,
) -> FloraStats {
    let channel = rng.next_f64() * params.channel_span;
    let mut stats = FloraStats::default();

    for y in 0..level.height() as i32 {
        for x in 0..level.width() as i32 {
            match level.get(x, y) {
                Tile::Sand => {
                    if rng.next_int(params.cactus_rarity) == 0 {
                        level.set(x, y, Tile::Cactus);
                        stats.cacti += 1;
                    }
                }
                Tile::Grass => {
                    let (fx, fy) = (x as f64 / params.noise_scale, y as f64 / params.noise_scale);
                    let nf = safe_pow(noise.sample(fx, fy, channel), params.noise_exponent);
                    let (low, high) = params.tall_grass_band;

                    if nf >= params.tree_threshold {
                        level.set(x, y, Tile::Tree);
                        stats.trees += 1;
                    } else if nf <= high && nf >= low && rng.next_int(2) != 0 {
                        level.set(x, y, Tile::TallGrass);
                        stats.tall_grass += 1;
                    } else if rng.next_int(params.flower_rarity) == 0 {
                        stats.flowers += place_flower_patch(level, rng, x, y);
                        stats.flower_patches += 1;
                    }
                }
                _ => {}
            }
        }
    }

    trace!(?stats, "flora placed");
    stats
}

/// Scatter a rectangular patch of flowers anchored at `(x, y)`.
///
/// The patch is `l × w` cells with `l, w = (s - 2) + [0, 4)` and
/// `s = 4 + [0, 3)`. Each cell is skipped one time in six and is only
/// overwritten when it currently holds grass; one flower in five is the
/// primary kind. Cells past the grid edge read as the boundary sentinel and
/// are left alone. Returns the number of flowers written.
pub fn place_flower_patch(level: &mut Level, rng: &mut LevelRng, x: i32, y: i32) -> u32 {
    let s = 4 + rng.next_int(3) as i32;
    let l = (s - 2) + rng.next_int(4) as i32;
    let w = (s - 2) + rng.next_int(4) as i32;

    let primary = if rng.next_bool() {
        Tile::Daisy
    } else {
        Tile::Poppy
    };
    let secondary = if primary == Tile::Daisy {
        Tile::Poppy
    } else {
        Tile::Daisy
    };

    let mut written = 0;
    for yy in 0..l {
        for xx in 0..w {
            let (tx, ty) = (x + xx, y + yy);
            if rng.next_int(6) != 0 && level.get(tx, ty) == Tile::Grass {
                let flower = if rng.next_int(5) == 0 {
                    primary
                } else {
                    secondary
                };
                if level.in_bounds(tx, ty) {
                    level.set(tx, ty, flower);
                    written += 1;
                }
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_level::LevelInfo;

    fn grass_level(width: u32, height: u32) -> Level {
        let mut level = Level::new(LevelInfo::new(3, 0, width, height).unwrap()).unwrap();
        level.fill(Tile::Grass);
        level
    }

    #[test]
    fn test_flower_patch_only_replaces_grass() {
        for seed in 0..64 {
            let mut level = grass_level(12, 12);
            // Checkerboard of non-grass obstacles.
            for y in 0..12 {
                for x in 0..12 {
                    if (x + y) % 2 == 0 {
                        level.set(x, y, Tile::Rock);
                    }
                }
            }
            let before = level.clone();
            let mut rng = LevelRng::new(seed);
            place_flower_patch(&mut level, &mut rng, 2, 2);

            for (x, y, t) in level.iter() {
                if t.is_flower() {
                    assert_eq!(
                        before.get(x, y),
                        Tile::Grass,
                        "seed {seed}: flower written over non-grass at ({x}, {y})"
                    );
                } else {
                    assert_eq!(t, before.get(x, y));
                }
            }
        }
    }

    #[test]
    fn test_flower_patch_stays_in_rectangle() {
        for seed in 0..64 {
            let mut level = grass_level(24, 24);
            let mut rng = LevelRng::new(seed);
            place_flower_patch(&mut level, &mut rng, 5, 7);
            for (x, y, t) in level.iter() {
                if t.is_flower() {
                    // s - 2 + 3 with s <= 6 bounds each side at 7 cells.
                    assert!((5..12).contains(&x) && (7..14).contains(&y), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_flower_patch_clipped_at_edge() {
        for seed in 0..32 {
            let mut level = grass_level(8, 8);
            let mut rng = LevelRng::new(seed);
            let written = place_flower_patch(&mut level, &mut rng, 6, 6);
            let flowers = level.count(Tile::Daisy) + level.count(Tile::Poppy);
            assert_eq!(written, flowers);
            assert!(flowers <= 4, "only the 2x2 in-grid corner can hold flowers");
        }
    }

    #[test]
    fn test_flower_patch_mixes_primary_and_secondary() {
        let mut level = grass_level(64, 64);
        let mut rng = LevelRng::new(17);
        for i in 0..8 {
            place_flower_patch(&mut level, &mut rng, i * 8, i * 8);
        }
        assert!(level.count(Tile::Daisy) > 0);
        assert!(level.count(Tile::Poppy) > 0);
    }

    #[test]
    fn test_decorate_leaves_other_tiles() {
        let mut level = Level::new(LevelInfo::new(3, 0, 32, 32).unwrap()).unwrap();
        level.fill(Tile::Rock);
        level.set(4, 4, Tile::Water);
        let before = level.clone();
        let noise = NoiseSource::new(3);
        let mut rng = LevelRng::new(3);
        let stats = decorate(&mut level, &noise, &mut rng, &FloraParams::default());
        assert_eq!(level, before);
        assert_eq!(stats, FloraStats::default());
    }

    #[test]
    fn test_decorate_sand_only_grows_cacti() {
        let mut level = Level::new(LevelInfo::new(3, 0, 64, 64).unwrap()).unwrap();
        level.fill(Tile::Sand);
        let noise = NoiseSource::new(3);
        let mut rng = LevelRng::new(3);
        let stats = decorate(&mut level, &noise, &mut rng, &FloraParams::default());
        assert_eq!(level.count(Tile::Cactus), stats.cacti);
        assert_eq!(level.count(Tile::Sand) + stats.cacti, 64 * 64);
        assert!(stats.cacti > 0, "4096 sand cells at 1/128 should grow cacti");
    }

    #[test]
    fn test_decorate_grass_outcomes() {
        let mut level = grass_level(96, 96);
        let noise = NoiseSource::new(21);
        let mut rng = LevelRng::new(21);
        let stats = decorate(&mut level, &noise, &mut rng, &FloraParams::default());

        assert_eq!(level.count(Tile::Tree), stats.trees);
        assert_eq!(level.count(Tile::TallGrass), stats.tall_grass);
        assert_eq!(level.count(Tile::Cactus), 0, "no sand, no cacti");
        for (_, _, t) in level.iter() {
            assert!(
                matches!(
                    t,
                    Tile::Grass | Tile::Tree | Tile::TallGrass | Tile::Daisy | Tile::Poppy
                ),
                "unexpected {t} on a grass-only level"
            );
        }
    }

    #[test]
    fn test_decorate_deterministic() {
        let run = || {
            let mut level = grass_level(48, 48);
            level.set(10, 10, Tile::Sand);
            let noise = NoiseSource::new(8);
            let mut rng = LevelRng::new(8);
            decorate(&mut level, &noise, &mut rng, &FloraParams::default());
            level
        };
        assert_eq!(run(), run());
    }
}
