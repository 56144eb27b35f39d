//! Sky level: walkable cloud islands and impassable cloud banks over open void.

use strata_level::{Level, Tile};
use tracing::debug;

use super::{GeneratorContext, LevelGenerator};
use crate::refine::smooth;
use crate::seed::ChannelOffsets;
use crate::shaping::safe_pow;

#[derive(Clone, Debug, PartialEq)]
pub struct CloudParams {
    /// Elevation at or above which a cell is cloud.
    pub cloud_level: f64,
    /// Elevation at or above which cloud thickens into a bank.
    pub bank_level: f64,
    /// Number of smoothing sweeps.
    pub smooth_passes: u32,
    /// Elevation bonus in the edge ring.
    pub edge_bonus: f64,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            cloud_level: 0.1,
            bank_level: 0.45,
            smooth_passes: 2,
            edge_bonus: -0.4,
        }
    }
}

pub struct CloudGenerator {
    ctx: GeneratorContext,
    params: CloudParams,
}

impl CloudGenerator {
    pub fn new(ctx: GeneratorContext, params: CloudParams) -> Self {
        Self { ctx, params }
    }

    fn base(&mut self, level: &mut Level) {
        let falloff = self.ctx.falloff(self.edge_bonus());
        let (noise, rng) = self.ctx.sources();
        let o = ChannelOffsets::draw(rng);

        for y in 0..level.height() as i32 {
            for x in 0..level.width() as i32 {
                let (fx, fy) = (x as f64, y as f64);
                let nc = safe_pow(noise.sample(fx / 24.0, fy / 24.0, o.height), 1.1);
                let nr = noise.sample(fx / 8.0, fy / 8.0, o.roughness);

                let h = falloff.elevation(x, y, nc, nr);
                let tile = if h >= self.params.bank_level {
                    Tile::CloudBank
                } else if h >= self.params.cloud_level {
                    Tile::Cloud
                } else {
                    Tile::Void
                };
                level.set(x, y, tile);
            }
        }
    }
}

impl LevelGenerator for CloudGenerator {
    fn context(&self) -> &GeneratorContext {
        &self.ctx
    }

    fn edge_bonus(&self) -> f64 {
        self.params.edge_bonus
    }

    fn boundary(&self) -> Tile {
        Tile::Void
    }

    fn generate_more(&mut self, level: &mut Level) {
        self.base(level);

        self.ctx.notify("DRIFTING", 0.5);
        let smoothed = smooth(
            level,
            self.ctx.sources().1,
            self.params.smooth_passes,
            &[Tile::Void],
        );

        debug!(smoothed, clouds = level.count(Tile::Cloud), "cloud layer generated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use std::sync::Arc;
    use strata_level::LevelInfo;

    fn generate(seed: u64) -> Level {
        let info = LevelInfo::new(seed, 1, 96, 96).unwrap();
        let ctx = GeneratorContext::new(info, Arc::new(NullProgress));
        let generator = CloudGenerator::new(ctx, CloudParams::default());
        let mut level = generator.new_level().unwrap();
        generator.generate(&mut level).unwrap();
        level
    }

    #[test]
    fn test_cloud_layer_tiles() {
        let level = generate(4);
        for (x, y, t) in level.iter() {
            assert!(
                matches!(t, Tile::Void | Tile::Cloud | Tile::CloudBank),
                "unexpected {t} at ({x}, {y})"
            );
        }
        assert!(level.count(Tile::Void) > 0, "the sky should have gaps");
    }

    #[test]
    fn test_cloud_layer_deterministic() {
        assert_eq!(generate(10), generate(10));
    }
}
