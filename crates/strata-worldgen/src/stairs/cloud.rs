use strata_level::{Level, LevelInfo, Tile};
use tracing::{debug, warn};

use super::{ORTHOGONALS, Requirements, check_levels, place_pair, satisfies};
use crate::error::WorldgenError;
use crate::seed::LevelRng;

/// Random placements tried before the cloud link gives up.
pub const MAX_ATTEMPTS: u32 = 2048;
/// One link per this many cells of the narrower level's width.
const WIDTH_PER_LINK: u32 = 32;
/// Minimum Chebyshev distance between two cloud links.
const MIN_SEPARATION: i32 = 8;

/// Links the cloud layer to the level on the other side of it.
///
/// The cloud side needs a cloud cell surrounded by cloud. The other side needs
/// dry walkable land.
pub struct CloudStairsGenerator {
    rng: LevelRng,
    lower: LevelInfo,
    upper: LevelInfo,
}

impl CloudStairsGenerator {
    pub fn new(lower: LevelInfo, upper: LevelInfo) -> Self {
        Self {
            rng: LevelRng::new(lower.seed),
            lower,
            upper,
        }
    }

    /// Number of links wanted for the pair.
    pub fn target(&self) -> usize {
        (self.lower.width.min(self.upper.width) / WIDTH_PER_LINK).max(1) as usize
    }

    /// Link `lower` and `upper`, returning the placed coordinates.
    pub fn link(
        mut self,
        lower: &mut Level,
        upper: &mut Level,
    ) -> Result<Vec<(i32, i32)>, WorldgenError> {
        check_levels((self.lower, self.upper), lower, upper)?;

        let target = self.target();
        let width = lower.width().min(upper.width());
        let height = lower.height().min(upper.height());
        let cloud_is_upper = self.upper.depth == 1;
        let mut placed: Vec<(i32, i32)> = Vec::with_capacity(target);

        for _ in 0..MAX_ATTEMPTS {
            if placed.len() >= target {
                break;
            }
            let x = self.rng.next_int(width) as i32;
            let y = self.rng.next_int(height) as i32;

            if placed
                .iter()
                .any(|&(px, py)| (px - x).abs().max((py - y).abs()) < MIN_SEPARATION)
            {
                continue;
            }

            let (sky, ground) = if cloud_is_upper {
                (&*upper, &*lower)
            } else {
                (&*lower, &*upper)
            };
            if is_cloud_interior(sky, x, y)
                && satisfies(ground, x, y, Requirements::REQUIRE_NO_LIQUID)
            {
                place_pair(lower, upper, x, y);
                placed.push((x, y));
            }
        }

        if placed.is_empty() {
            warn!(
                lower = self.lower.depth,
                upper = self.upper.depth,
                "no cloud stairs could be placed"
            );
        } else {
            debug!(count = placed.len(), target, "cloud stairs linked");
        }
        Ok(placed)
    }
}

/// A cloud cell whose four sides are also cloud.
fn is_cloud_interior(level: &Level, x: i32, y: i32) -> bool {
    level.in_bounds(x, y)
        && level.get(x, y) == Tile::Cloud
        && ORTHOGONALS
            .iter()
            .all(|&(dx, dy)| level.get(x + dx, y + dy) == Tile::Cloud)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(depth: i32, width: u32, tile: Tile) -> Level {
        let mut level = Level::new(LevelInfo::new(12, depth, width, 64).unwrap()).unwrap();
        level.fill(tile);
        level
    }

    #[test]
    fn test_target_scales_with_width() {
        let narrow = CloudStairsGenerator::new(
            LevelInfo::new(1, 0, 16, 16).unwrap(),
            LevelInfo::new(1, 1, 16, 16).unwrap(),
        );
        assert_eq!(narrow.target(), 1);
        let wide = CloudStairsGenerator::new(
            LevelInfo::new(1, 0, 128, 16).unwrap(),
            LevelInfo::new(1, 1, 256, 16).unwrap(),
        );
        assert_eq!(wide.target(), 4);
    }

    #[test]
    fn test_links_cloud_to_land() {
        let mut ground = level(0, 128, Tile::Grass);
        let mut sky = level(1, 128, Tile::Cloud);
        let placed = CloudStairsGenerator::new(ground.info(), sky.info())
            .link(&mut ground, &mut sky)
            .unwrap();

        assert_eq!(placed.len(), 4);
        for &(x, y) in &placed {
            assert_eq!(ground.get(x, y), Tile::StairsUp);
            assert_eq!(sky.get(x, y), Tile::StairsDown);
        }
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                let d = (a.0 - b.0).abs().max((a.1 - b.1).abs());
                assert!(d >= MIN_SEPARATION, "links {a:?} and {b:?} too close");
            }
        }
    }

    #[test]
    fn test_no_links_over_water_or_banks() {
        let mut ground = level(0, 64, Tile::Water);
        let mut sky = level(1, 64, Tile::Cloud);
        let placed = CloudStairsGenerator::new(ground.info(), sky.info())
            .link(&mut ground, &mut sky)
            .unwrap();
        assert!(placed.is_empty());

        let mut ground = level(0, 64, Tile::Grass);
        let mut sky = level(1, 64, Tile::CloudBank);
        let placed = CloudStairsGenerator::new(ground.info(), sky.info())
            .link(&mut ground, &mut sky)
            .unwrap();
        assert!(placed.is_empty());
        assert_eq!(sky.count(Tile::StairsDown), 0);
    }

    #[test]
    fn test_cloud_below_is_also_linked() {
        let mut sky = level(1, 64, Tile::Cloud);
        let mut above = level(2, 64, Tile::Grass);
        let placed = CloudStairsGenerator::new(sky.info(), above.info())
            .link(&mut sky, &mut above)
            .unwrap();
        assert_eq!(placed.len(), 2);
        for &(x, y) in &placed {
            assert_eq!(sky.get(x, y), Tile::StairsUp);
        }
    }
}
