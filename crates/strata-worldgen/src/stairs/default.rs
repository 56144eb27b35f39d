use strata_level::{Level, LevelInfo};
use tracing::{debug, warn};

use super::{Requirements, check_levels, place_pair, satisfies};
use crate::error::WorldgenError;
use crate::seed::LevelRng;

/// Jittered placements tried per spacing cell before giving up on it.
pub const ATTEMPTS_PER_CELL: u32 = 16;

/// Places stairs on a coarse jittered lattice over the overlap of two levels.
pub struct DefaultStairsGenerator {
    rng: LevelRng,
    lower: LevelInfo,
    upper: LevelInfo,
    spacing: u32,
    lower_reqs: Requirements,
    upper_reqs: Requirements,
}

impl DefaultStairsGenerator {
    pub fn new(
        seed: u64,
        lower: LevelInfo,
        upper: LevelInfo,
        spacing: u32,
        lower_reqs: Requirements,
        upper_reqs: Requirements,
    ) -> Self {
        Self {
            rng: LevelRng::new(seed),
            lower,
            upper,
            spacing: spacing.max(1),
            lower_reqs,
            upper_reqs,
        }
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Link `lower` and `upper`, returning the placed coordinates.
    pub fn link(
        mut self,
        lower: &mut Level,
        upper: &mut Level,
    ) -> Result<Vec<(i32, i32)>, WorldgenError> {
        check_levels((self.lower, self.upper), lower, upper)?;

        let width = lower.width().min(upper.width());
        let height = lower.height().min(upper.height());
        let spacing = self.spacing;
        let mut placed = Vec::new();

        for cy in (0..height).step_by(spacing as usize) {
            for cx in (0..width).step_by(spacing as usize) {
                for _ in 0..ATTEMPTS_PER_CELL {
                    let x = (cx + self.rng.next_int(spacing)) as i32;
                    let y = (cy + self.rng.next_int(spacing)) as i32;
                    if satisfies(lower, x, y, self.lower_reqs)
                        && satisfies(upper, x, y, self.upper_reqs)
                    {
                        place_pair(lower, upper, x, y);
                        placed.push((x, y));
                        break;
                    }
                }
            }
        }

        if placed.is_empty() {
            warn!(
                lower = self.lower.depth,
                upper = self.upper.depth,
                "no stairs could be placed"
            );
        } else {
            debug!(
                lower = self.lower.depth,
                upper = self.upper.depth,
                count = placed.len(),
                "stairs linked"
            );
        }
        Ok(placed)
    }
}
