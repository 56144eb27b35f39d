//! World generation error types.

use strata_level::{LevelError, LevelInfo, Tile};

/// Errors that can occur while selecting generators or generating levels.
#[derive(Debug, thiserror::Error)]
pub enum WorldgenError {
    /// No generator exists for this depth. The caller broke the depth contract.
    #[error("no level generator for depth {0}")]
    UnknownDepth(i32),

    /// The level handed to a generator is not the one it was built for.
    #[error("generator bound to {expected:?} was given level {actual:?}")]
    LevelMismatch {
        expected: LevelInfo,
        actual: LevelInfo,
    },

    /// The level's out-of-bounds tile differs from the generator's.
    #[error("generator expects boundary {expected:?}, level has {actual:?}")]
    BoundaryMismatch { expected: Tile, actual: Tile },

    /// A debug image side would overflow `u32` or exceed the preview limit.
    #[error("debug image for a {width}x{height} level at scale {scale} is too large")]
    ImageTooLarge { width: u32, height: u32, scale: u32 },

    /// The requested level geometry is invalid.
    #[error(transparent)]
    Level(#[from] LevelError),

    /// A world stack must contain at least one depth.
    #[error("world has no levels")]
    EmptyWorld,

    /// A generation worker thread died before reporting its level.
    #[error("generation worker for depth {0} did not report a level")]
    WorkerLost(i32),

    /// Failed to encode a debug image.
    #[error("failed to encode debug image: {0}")]
    Image(#[from] png::EncodingError),

    /// Failed to write debug output.
    #[error("failed to write debug output: {0}")]
    Io(#[from] std::io::Error),
}
