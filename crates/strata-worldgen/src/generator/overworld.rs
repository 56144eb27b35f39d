//! Surface level: islands ringed by ocean, eroded coasts, and vegetation.

use strata_level::{Level, Tile};
use tracing::debug;

use super::{GeneratorContext, LevelGenerator};
use crate::classify::{BIOME_EXPONENT, TERRAIN_EXPONENT, classify_surface};
use crate::flora::{FloraParams, decorate};
use crate::refine::{erode, smooth};
use crate::seed::ChannelOffsets;
use crate::shaping::safe_pow;

/// Configuration for the surface generator.
#[derive(Clone, Debug, PartialEq)]
pub struct OverworldParams {
    /// Elevation bonus in the edge ring. Negative values push the border to water.
    pub edge_bonus: f64,
    /// Number of erosion sweeps.
    pub erosion_passes: u32,
    /// Number of smoothing sweeps between erosion and flora. 0 disables smoothing.
    pub smooth_passes: u32,
    /// Flora tunables.
    pub flora: FloraParams,
}

impl Default for OverworldParams {
    fn default() -> Self {
        Self {
            edge_bonus: -0.3,
            erosion_passes: 8,
            smooth_passes: 0,
            flora: FloraParams::default(),
        }
    }
}

/// Tiles smoothing never changes on the surface.
const SURFACE_IMMUTABLE: [Tile; 2] = [Tile::Water, Tile::Rock];

pub struct OverworldGenerator {
    ctx: GeneratorContext,
    params: OverworldParams,
}

impl OverworldGenerator {
    pub fn new(ctx: GeneratorContext, params: OverworldParams) -> Self {
        Self { ctx, params }
    }

    pub fn params(&self) -> &OverworldParams {
        &self.params
    }

    /// Lay down water, rock, sand and grass from the four base noise fields.
    fn base(&mut self, level: &mut Level) {
        let falloff = self.ctx.falloff(self.edge_bonus());
        let (noise, rng) = self.ctx.sources();
        let o = ChannelOffsets::draw(rng);

        for y in 0..level.height() as i32 {
            for x in 0..level.width() as i32 {
                let (fx, fy) = (x as f64, y as f64);
                let nh = safe_pow(noise.sample(fx / 24.0, fy / 24.0, o.height), 1.1);
                let nr = noise.sample(fx / 8.0, fy / 8.0, o.roughness);
                let nt = safe_pow(noise.sample(fx / 8.0, fy / 8.0, o.terrain), TERRAIN_EXPONENT);
                let nb = safe_pow(noise.sample(fx / 32.0, fy / 32.0, o.biome), BIOME_EXPONENT);

                let h = falloff.elevation(x, y, nh, nr);
                level.set(x, y, classify_surface(nt, nb, h));
            }
        }
    }
}

impl LevelGenerator for OverworldGenerator {
    fn context(&self) -> &GeneratorContext {
        &self.ctx
    }

    fn edge_bonus(&self) -> f64 {
        self.params.edge_bonus
    }

    /// The world beyond the surface map is open ocean.
    fn boundary(&self) -> Tile {
        Tile::Water
    }

    fn generate_more(&mut self, level: &mut Level) {
        self.base(level);

        self.ctx.notify("ERODING", 0.4);
        let eroded = erode(level, self.ctx.sources().1, self.params.erosion_passes);

        if self.params.smooth_passes > 0 {
            self.ctx.notify("SMOOTHING", 0.6);
            smooth(
                level,
                self.ctx.sources().1,
                self.params.smooth_passes,
                &SURFACE_IMMUTABLE,
            );
        }

        self.ctx.notify("PLANTING", 0.8);
        let (noise, rng) = self.ctx.sources();
        let flora = decorate(level, noise, rng, &self.params.flora);

        debug!(eroded, ?flora, "overworld generated");
    }
}
