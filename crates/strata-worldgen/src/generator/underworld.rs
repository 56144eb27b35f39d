//! Underground levels: rock walls, open cave floor, lava pockets and ore veins.

use strata_level::{Level, Tile};
use tracing::debug;

use super::{GeneratorContext, LevelGenerator};
use crate::refine::smooth;
use crate::seed::ChannelOffsets;
use crate::shaping::safe_pow;

/// Elevation at or above which a cell is wall.
const WALL_LEVEL: f64 = 0.15;
/// Soft-ground noise at or above which floor becomes the soft tile.
const SOFT_GROUND: f64 = 0.25;
/// Liquid noise threshold at liquid level 0; each level lowers it.
const LAVA_BASE: f64 = 0.62;
const LAVA_PER_LEVEL: f64 = 0.04;

/// One ore kind embedded in walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OreVein {
    pub ore: Tile,
    /// One wall cell in `rarity` holds this ore.
    pub rarity: u32,
}

impl OreVein {
    pub const fn new(ore: Tile, rarity: u32) -> Self {
        Self { ore, rarity }
    }
}

/// Configuration for one underground depth.
#[derive(Clone, Debug, PartialEq)]
pub struct UnderworldParams {
    /// Open cave floor.
    pub floor: Tile,
    /// Secondary floor in patches (dirt near the surface).
    pub soft: Tile,
    /// Solid wall.
    pub wall: Tile,
    /// Ores in the order they are tried for each wall cell.
    pub ores: Vec<OreVein>,
    /// Number of smoothing sweeps.
    pub smooth_passes: u32,
    /// How much lava the level holds; higher is more.
    pub liquid_level: u32,
    /// Elevation bonus in the edge ring. Positive values close the map with wall.
    pub edge_bonus: f64,
}

impl UnderworldParams {
    /// Parameters for depths -1 to -3.
    pub fn for_depth(depth: i32) -> Option<Self> {
        let (soft, wall, ores, liquid_level) = match depth {
            -1 => (
                Tile::Dirt,
                Tile::Rock,
                vec![OreVein::new(Tile::IronOre, 48), OreVein::new(Tile::GoldOre, 448)],
                1,
            ),
            -2 => (
                Tile::Dirt,
                Tile::HardRock,
                vec![
                    OreVein::new(Tile::IronOre, 48),
                    OreVein::new(Tile::GoldOre, 60),
                    OreVein::new(Tile::GemOre, 384),
                ],
                2,
            ),
            -3 => (
                Tile::Stone,
                Tile::Basalt,
                vec![
                    OreVein::new(Tile::IronOre, 60),
                    OreVein::new(Tile::GoldOre, 60),
                    OreVein::new(Tile::GemOre, 128),
                    OreVein::new(Tile::MithrilOre, 256),
                ],
                5,
            ),
            _ => return None,
        };

        Some(Self {
            floor: Tile::Stone,
            soft,
            wall,
            ores,
            smooth_passes: 3,
            liquid_level,
            edge_bonus: 0.3,
        })
    }

    /// Liquid-noise threshold above which a floor cell becomes lava.
    pub fn lava_threshold(&self) -> f64 {
        LAVA_BASE - LAVA_PER_LEVEL * self.liquid_level as f64
    }
}

pub struct UnderworldGenerator {
    ctx: GeneratorContext,
    params: UnderworldParams,
}

impl UnderworldGenerator {
    pub fn new(ctx: GeneratorContext, params: UnderworldParams) -> Self {
        Self { ctx, params }
    }

    pub fn params(&self) -> &UnderworldParams {
        &self.params
    }

    fn base(&mut self, level: &mut Level) {
        let falloff = self.ctx.falloff(self.edge_bonus());
        let lava = self.params.lava_threshold();
        let (noise, rng) = self.ctx.sources();
        // Height drives the walls, terrain the soft ground, biome the lava.
        let o = ChannelOffsets::draw(rng);

        for y in 0..level.height() as i32 {
            for x in 0..level.width() as i32 {
                let (fx, fy) = (x as f64, y as f64);
                let nc = safe_pow(noise.sample(fx / 16.0, fy / 16.0, o.height), 1.1);
                let nr = noise.sample(fx / 8.0, fy / 8.0, o.roughness);
                let ns = noise.sample(fx / 12.0, fy / 12.0, o.terrain);
                let nl = noise.sample(fx / 20.0, fy / 20.0, o.biome);

                let h = falloff.elevation(x, y, nc, nr);
                let tile = if h >= WALL_LEVEL {
                    self.params.wall
                } else if nl >= lava {
                    Tile::Lava
                } else if ns >= SOFT_GROUND {
                    self.params.soft
                } else {
                    self.params.floor
                };
                level.set(x, y, tile);
            }
        }
    }

    /// Embed ores in walls. Returns the number of ore tiles placed.
    fn mine(&mut self, level: &mut Level) -> u32 {
        let (_, rng) = self.ctx.sources();
        let mut placed = 0;
        for y in 0..level.height() as i32 {
            for x in 0..level.width() as i32 {
                if level.get(x, y) != self.params.wall {
                    continue;
                }
                if let Some(vein) = self
                    .params
                    .ores
                    .iter()
                    .find(|vein| rng.next_int(vein.rarity) == 0)
                {
                    level.set(x, y, vein.ore);
                    placed += 1;
                }
            }
        }
        placed
    }
}

impl LevelGenerator for UnderworldGenerator {
    fn context(&self) -> &GeneratorContext {
        &self.ctx
    }

    fn edge_bonus(&self) -> f64 {
        self.params.edge_bonus
    }

    /// Underground levels are enclosed in their wall rock.
    fn boundary(&self) -> Tile {
        self.params.wall
    }

    fn generate_more(&mut self, level: &mut Level) {
        self.base(level);

        self.ctx.notify("SMOOTHING", 0.4);
        let smoothed = smooth(
            level,
            self.ctx.sources().1,
            self.params.smooth_passes,
            &[Tile::Lava],
        );

        self.ctx.notify("MINING", 0.8);
        let ores = self.mine(level);

        debug!(depth = self.ctx.depth(), smoothed, ores, "underworld generated");
    }
}
