//! Stairs linking between vertically adjacent levels.
//!
//! A stairs generator places pairs of tiles at identical coordinates: stairs
//! down on the upper level and stairs up on the lower one. Where a pair may
//! go is constrained per level by a [`Requirements`] bitmask.

mod cloud;
mod default;

use std::ops::{BitOr, BitOrAssign};

use strata_level::{Level, LevelInfo, Tile};

use crate::error::WorldgenError;

pub use cloud::CloudStairsGenerator;
pub use default::DefaultStairsGenerator;

/// Minimum spacing between candidate stairs cells.
pub const MIN_STAIRS_SPACING: u32 = 16;

/// Placement constraints for one side of a stairs pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Requirements(u8);

impl Requirements {
    pub const NONE: Self = Self(0);
    /// The cell must touch rock on at least one side.
    pub const REQUIRE_ROCKS: Self = Self(1 << 0);
    /// The cell and its four sides must be open, walkable floor.
    pub const REQUIRE_OPEN: Self = Self(1 << 1);
    /// No liquid anywhere in the surrounding 3×3 block.
    pub const REQUIRE_NO_LIQUID: Self = Self(1 << 2);

    /// Requirements for a level at `depth`: rock-adjacent on the surface, open
    /// underground, and never next to liquid.
    pub fn for_depth(depth: i32) -> Self {
        let mut reqs = Self::REQUIRE_NO_LIQUID;
        if depth == 0 {
            reqs |= Self::REQUIRE_ROCKS;
        }
        if depth < 0 {
            reqs |= Self::REQUIRE_OPEN;
        }
        reqs
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Requirements {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Requirements {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

const ORTHOGONALS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn is_stairs(tile: Tile) -> bool {
    matches!(tile, Tile::StairsUp | Tile::StairsDown)
}

/// Returns `true` if a stairs tile may be placed at `(x, y)` of `level`.
///
/// The cell must be in bounds, walkable and not already stairs, in addition
/// to the flags in `reqs`.
pub fn satisfies(level: &Level, x: i32, y: i32, reqs: Requirements) -> bool {
    if !level.in_bounds(x, y) {
        return false;
    }
    let here = level.get(x, y);
    if !here.is_walkable() || is_stairs(here) {
        return false;
    }

    if reqs.contains(Requirements::REQUIRE_ROCKS)
        && !ORTHOGONALS
            .iter()
            .any(|&(dx, dy)| level.get(x + dx, y + dy).is_rock())
    {
        return false;
    }

    if reqs.contains(Requirements::REQUIRE_OPEN)
        && !ORTHOGONALS.iter().all(|&(dx, dy)| {
            let t = level.get(x + dx, y + dy);
            t.is_walkable() && !is_stairs(t)
        })
    {
        return false;
    }

    if reqs.contains(Requirements::REQUIRE_NO_LIQUID) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if level.get(x + dx, y + dy).is_liquid() {
                    return false;
                }
            }
        }
    }

    true
}

/// Spacing between stairs candidates for a pair of levels.
pub fn stairs_spacing(lower: &LevelInfo, upper: &LevelInfo) -> u32 {
    (lower.width.max(upper.width) / 8).max(MIN_STAIRS_SPACING)
}

/// Write one stairs pair.
fn place_pair(lower: &mut Level, upper: &mut Level, x: i32, y: i32) {
    lower.set(x, y, Tile::StairsUp);
    upper.set(x, y, Tile::StairsDown);
}

/// Check that the levels handed to a stairs generator are the ones it was built for.
fn check_levels(
    expected: (LevelInfo, LevelInfo),
    lower: &Level,
    upper: &Level,
) -> Result<(), WorldgenError> {
    for (want, got) in [(expected.0, lower.info()), (expected.1, upper.info())] {
        if want != got {
            return Err(WorldgenError::LevelMismatch {
                expected: want,
                actual: got,
            });
        }
    }
    Ok(())
}

/// The stairs generator selected for a pair of adjacent levels.
pub enum StairsGenerator {
    Default(DefaultStairsGenerator),
    Cloud(CloudStairsGenerator),
}

impl StairsGenerator {
    /// Place stairs pairs and return their coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WorldgenError::LevelMismatch`] before writing anything if
    /// either level is not the one the generator was selected for.
    pub fn link(self, lower: &mut Level, upper: &mut Level) -> Result<Vec<(i32, i32)>, WorldgenError> {
        match self {
            StairsGenerator::Default(g) => g.link(lower, upper),
            StairsGenerator::Cloud(g) => g.link(lower, upper),
        }
    }
}

/// Select the stairs generator for the levels `lower` and `upper`.
///
/// Depth 1 on either side selects the cloud stairs. Otherwise the default
/// generator is seeded from the lower level and constrained per level by
/// [`Requirements::for_depth`].
pub fn select_stairs_generator(lower: &LevelInfo, upper: &LevelInfo) -> StairsGenerator {
    if lower.depth == 1 || upper.depth == 1 {
        return StairsGenerator::Cloud(CloudStairsGenerator::new(*lower, *upper));
    }

    StairsGenerator::Default(DefaultStairsGenerator::new(
        lower.seed,
        *lower,
        *upper,
        stairs_spacing(lower, upper),
        Requirements::for_depth(lower.depth),
        Requirements::for_depth(upper.depth),
    ))
}
