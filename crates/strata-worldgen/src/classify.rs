//! Surface tile classification from shaped noise and elevation.

use strata_level::Tile;

/// Elevation at or below which a cell is water.
pub const WATER_LEVEL: f64 = 0.02;
/// Elevation at or below which low, non-rocky ground becomes beach sand.
pub const BEACH_LEVEL: f64 = 0.10;
/// Terrain-type noise at or below which a cell is rock.
pub const ROCK_TERRAIN: f64 = -0.25;
/// Minimum terrain-type noise for beach sand.
pub const BEACH_TERRAIN: f64 = -0.14;
/// Biome-bias noise at or above which a cell is desert sand.
pub const DESERT_BIOME: f64 = 0.32;

/// Exponent applied to the terrain-type noise before classification.
pub const TERRAIN_EXPONENT: f64 = 1.2;
/// Exponent applied to the biome-bias noise before classification.
pub const BIOME_EXPONENT: f64 = 1.3;

/// Map terrain-type noise `nt`, biome-bias noise `nb` and elevation `h` to a
/// surface tile. Rules are checked in order and the first match wins, so the
/// result is always one of water, rock, sand or grass.
pub fn classify_surface(nt: f64, nb: f64, h: f64) -> Tile {
    if h <= WATER_LEVEL {
        Tile::Water
    } else if nt <= ROCK_TERRAIN {
        Tile::Rock
    } else if (h <= BEACH_LEVEL && nt >= BEACH_TERRAIN) || nb >= DESERT_BIOME {
        // Beach, then desert.
        Tile::Sand
    } else {
        Tile::Grass
    }
}
