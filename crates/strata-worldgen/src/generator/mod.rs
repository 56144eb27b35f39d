//! The level generator contract and depth-based generator selection.
//!
//! Every depth-specific generator binds a level's seed, noise and RNG at
//! construction, then runs its phases exactly once through
//! [`LevelGenerator::generate`], which consumes the generator.

mod cloud;
mod overworld;
mod underworld;

use std::sync::Arc;

use strata_level::{Level, LevelInfo, Tile};
use tracing::debug;

use crate::error::WorldgenError;
use crate::falloff::EdgeFalloff;
use crate::progress::{ProgressSink, phase_label};
use crate::seed::{LevelRng, NoiseSource};

pub use cloud::{CloudGenerator, CloudParams};
pub use overworld::{OverworldGenerator, OverworldParams};
pub use underworld::{OreVein, UnderworldGenerator, UnderworldParams};

/// Deepest level with a generator.
pub const DEEPEST_DEPTH: i32 = -3;
/// Highest level with a generator.
pub const HIGHEST_DEPTH: i32 = 1;

/// Per-level state shared by all generator variants.
pub struct GeneratorContext {
    info: LevelInfo,
    noise: NoiseSource,
    rng: LevelRng,
    progress: Arc<dyn ProgressSink>,
}

impl GeneratorContext {
    /// Bind the noise and RNG for `info.seed`.
    pub fn new(info: LevelInfo, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            info,
            noise: NoiseSource::new(info.seed),
            rng: LevelRng::new(info.seed),
            progress,
        }
    }

    pub fn info(&self) -> LevelInfo {
        self.info
    }

    pub fn depth(&self) -> i32 {
        self.info.depth
    }

    /// Split borrow of the noise source and the RNG.
    pub fn sources(&mut self) -> (&NoiseSource, &mut LevelRng) {
        (&self.noise, &mut self.rng)
    }

    /// Edge falloff for this level's dimensions.
    pub fn falloff(&self, bonus: f64) -> EdgeFalloff {
        EdgeFalloff::new(self.info.width, self.info.height, bonus)
    }

    /// Notify the progress sink that `phase` has started.
    pub fn notify(&self, phase: &str, fraction: f64) {
        debug!(depth = self.info.depth, phase, "generation phase");
        self.progress.notify(&phase_label(self.info.depth, phase), fraction);
    }
}

/// The lifecycle every depth-specific generator implements.
pub trait LevelGenerator {
    /// Shared per-level state.
    fn context(&self) -> &GeneratorContext;

    /// Elevation bonus applied in the edge ring of the level.
    fn edge_bonus(&self) -> f64;

    /// Out-of-bounds sentinel for levels built by [`LevelGenerator::new_level`].
    fn boundary(&self) -> Tile;

    /// Depth-specific phases, run once after the common "forming" notification.
    fn generate_more(&mut self, level: &mut Level);

    fn depth(&self) -> i32 {
        self.context().depth()
    }

    /// Create an empty level matching this generator's bound properties.
    fn new_level(&self) -> Result<Level, WorldgenError> {
        Ok(Level::with_boundary(self.context().info(), self.boundary())?)
    }

    /// Populate `level`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldgenError::LevelMismatch`] before touching the grid if
    /// `level` is not the level this generator was built for, and
    /// [`WorldgenError::BoundaryMismatch`] if its out-of-bounds tile is not
    /// [`LevelGenerator::boundary`]. Erosion and smoothing read past the edge,
    /// so the sentinel is part of the output.
    fn generate(mut self, level: &mut Level) -> Result<(), WorldgenError>
    where
        Self: Sized,
    {
        let expected = self.context().info();
        if level.info() != expected {
            return Err(WorldgenError::LevelMismatch {
                expected,
                actual: level.info(),
            });
        }
        if level.boundary() != self.boundary() {
            return Err(WorldgenError::BoundaryMismatch {
                expected: self.boundary(),
                actual: level.boundary(),
            });
        }

        self.context().notify("FORMING", 0.0);
        self.generate_more(level);
        Ok(())
    }
}

/// One concrete generator per supported depth.
pub enum Generator {
    Overworld(OverworldGenerator),
    Underworld(UnderworldGenerator),
    Cloud(CloudGenerator),
}

impl LevelGenerator for Generator {
    fn context(&self) -> &GeneratorContext {
        match self {
            Generator::Overworld(g) => g.context(),
            Generator::Underworld(g) => g.context(),
            Generator::Cloud(g) => g.context(),
        }
    }

    fn edge_bonus(&self) -> f64 {
        match self {
            Generator::Overworld(g) => g.edge_bonus(),
            Generator::Underworld(g) => g.edge_bonus(),
            Generator::Cloud(g) => g.edge_bonus(),
        }
    }

    fn boundary(&self) -> Tile {
        match self {
            Generator::Overworld(g) => g.boundary(),
            Generator::Underworld(g) => g.boundary(),
            Generator::Cloud(g) => g.boundary(),
        }
    }

    fn generate_more(&mut self, level: &mut Level) {
        match self {
            Generator::Overworld(g) => g.generate_more(level),
            Generator::Underworld(g) => g.generate_more(level),
            Generator::Cloud(g) => g.generate_more(level),
        }
    }
}

/// Select the generator for a level by its depth.
///
/// Depth 1 is the cloud layer, 0 the surface, -1 to -3 the underworld.
///
/// # Errors
///
/// Returns [`WorldgenError::UnknownDepth`] for any other depth. This is a
/// configuration error and must not be retried.
pub fn select_generator(
    info: LevelInfo,
    progress: Arc<dyn ProgressSink>,
) -> Result<Generator, WorldgenError> {
    let ctx = GeneratorContext::new(info, progress);
    match info.depth {
        1 => Ok(Generator::Cloud(CloudGenerator::new(ctx, CloudParams::default()))),
        0 => Ok(Generator::Overworld(OverworldGenerator::new(
            ctx,
            OverworldParams::default(),
        ))),
        depth @ DEEPEST_DEPTH..=-1 => {
            let params = UnderworldParams::for_depth(depth)
                .ok_or(WorldgenError::UnknownDepth(depth))?;
            Ok(Generator::Underworld(UnderworldGenerator::new(ctx, params)))
        }
        depth => Err(WorldgenError::UnknownDepth(depth)),
    }
}

/// Convenience: select the generator for `info`, build its level and generate it.
pub fn generate_level(
    info: LevelInfo,
    progress: Arc<dyn ProgressSink>,
) -> Result<Level, WorldgenError> {
    let generator = select_generator(info, progress)?;
    let mut level = generator.new_level()?;
    generator.generate(&mut level)?;
    Ok(level)
}
