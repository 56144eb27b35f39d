//! Procedural tile-world generation: seeded noise, edge falloff, surface
//! classification, cellular-automata refinement, flora, and stairs between
//! vertically stacked levels.

mod error;

pub mod classify;
pub mod debug_viz;
pub mod falloff;
pub mod flora;
pub mod generator;
pub mod progress;
pub mod refine;
pub mod seed;
pub mod shaping;
pub mod stairs;
pub mod world;

pub use error::WorldgenError;
pub use generator::{
    CloudGenerator, CloudParams, DEEPEST_DEPTH, Generator, GeneratorContext, HIGHEST_DEPTH,
    LevelGenerator, OreVein, OverworldGenerator, OverworldParams, UnderworldGenerator,
    UnderworldParams, generate_level, select_generator,
};
pub use progress::{ChannelProgress, NullProgress, ProgressEvent, ProgressSink, TracingProgress};
pub use seed::{LevelRng, NoiseSource, derive_level_seed};
pub use stairs::{
    CloudStairsGenerator, DefaultStairsGenerator, Requirements, StairsGenerator,
    select_stairs_generator,
};
pub use world::{StairsLink, World, WorldParams, generate_world};

pub use strata_level::{Level, LevelError, LevelInfo, Tile};
