//! Cellular-automata refinement: erosion towards water and neighbour-majority smoothing.
//!
//! Both passes mutate the grid in place while sweeping row-major, so a cell
//! sees the already-updated state of the cells above and to its left. The
//! resulting top-left to bottom-right bias is part of the generated output.
//! Only the four diagonal neighbours are ever consulted.

use strata_level::{Level, Tile};
use tracing::trace;

use crate::seed::LevelRng;

/// Offsets of the diagonal neighbours, in sampling order NW, NE, SE, SW.
pub const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// Self-weight added to a cell's own tile when smoothing.
pub const SMOOTH_SELF_WEIGHT: u32 = 2;

/// The four diagonal neighbours of `(x, y)` in NW, NE, SE, SW order.
///
/// Out-of-grid neighbours read as the level's boundary sentinel.
#[inline]
pub fn diagonal_neighbors(level: &Level, x: i32, y: i32) -> [Tile; 4] {
    DIAGONALS.map(|(dx, dy)| level.get(x + dx, y + dy))
}

/// Run `passes` erosion sweeps. Returns the number of cells turned into water.
pub fn erode(level: &mut Level, rng: &mut LevelRng, passes: u32) -> u32 {
    let mut eroded = 0;
    for pass in 0..passes {
        let converted = erode_sweep(level, rng);
        trace!(pass, converted, "erosion sweep");
        eroded += converted;
    }
    eroded
}

/// One erosion sweep.
///
/// A non-water cell with `n > 0` diagonal water neighbours draws from
/// `[0, n)` and becomes water when the draw exceeds 1. Cells with fewer than
/// three water neighbours can therefore never erode.
pub fn erode_sweep(level: &mut Level, rng: &mut LevelRng) -> u32 {
    let mut converted = 0;
    for y in 0..level.height() as i32 {
        for x in 0..level.width() as i32 {
            if level.get(x, y) == Tile::Water {
                continue;
            }

            let water = diagonal_neighbors(level, x, y)
                .iter()
                .filter(|&&t| t == Tile::Water)
                .count() as u32;

            if water > 0 && rng.next_int(water) > 1 {
                level.set(x, y, Tile::Water);
                converted += 1;
            }
        }
    }
    converted
}

/// Run `passes` smoothing sweeps, leaving tiles in `immutable` untouched.
/// Returns the number of cell changes across all sweeps.
pub fn smooth(level: &mut Level, rng: &mut LevelRng, passes: u32, immutable: &[Tile]) -> u32 {
    let mut changed = 0;
    for pass in 0..passes {
        let n = smooth_sweep(level, rng, immutable);
        trace!(pass, changed = n, "smoothing sweep");
        changed += n;
    }
    changed
}

/// One smoothing sweep.
///
/// Each mutable cell histograms its diagonal neighbours, adds
/// [`SMOOTH_SELF_WEIGHT`] to its own tile, then every neighbour in sampling
/// order draws from `[0, count)`. The first strictly highest draw above zero
/// wins; if none beats zero the cell keeps its tile.
pub fn smooth_sweep(level: &mut Level, rng: &mut LevelRng, immutable: &[Tile]) -> u32 {
    let mut changed = 0;
    for y in 0..level.height() as i32 {
        for x in 0..level.width() as i32 {
            let current = level.get(x, y);
            if immutable.contains(&current) {
                continue;
            }

            let neighbors = diagonal_neighbors(level, x, y);
            let mut counts = [0u32; Tile::COUNT];
            for n in neighbors {
                counts[n as usize] += 1;
            }
            counts[current as usize] += SMOOTH_SELF_WEIGHT;

            let mut best = 0;
            let mut winner = current;
            for n in neighbors {
                let draw = rng.next_int(counts[n as usize]);
                if draw > best {
                    best = draw;
                    winner = n;
                }
            }

            if winner != current {
                changed += 1;
            }
            level.set(x, y, winner);
        }
    }
    changed
}
