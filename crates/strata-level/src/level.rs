//! Row-major tile grid for a single level of the world.
//!
//! Reads outside the grid return the level's boundary sentinel and writes outside
//! it are ignored, so neighbour sampling at the edge never needs special casing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tile::Tile;

/// Errors that can occur when constructing a level.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// Width or height is zero; the falloff math divides by both.
    #[error("degenerate level geometry: {width}x{height}")]
    DegenerateGeometry {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// The read-only identity of a level: everything a generator binds at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Seed from which all noise and RNG state of the level derives.
    pub seed: u64,
    /// Vertical position: positive is sky, 0 is the surface, negative is underground.
    pub depth: i32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
}

impl LevelInfo {
    /// Creates level properties, rejecting zero-sized grids.
    pub fn new(seed: u64, depth: i32, width: u32, height: u32) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::DegenerateGeometry { width, height });
        }
        Ok(Self {
            seed,
            depth,
            width,
            height,
        })
    }
}

/// A width × height grid of [`Tile`] values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    info: LevelInfo,
    /// Returned by [`Level::get`] for coordinates outside the grid.
    boundary: Tile,
    tiles: Vec<Tile>,
}

impl Level {
    /// Creates a level filled with [`Tile::Void`] whose boundary sentinel is also void.
    pub fn new(info: LevelInfo) -> Result<Self, LevelError> {
        Self::with_boundary(info, Tile::Void)
    }

    /// Creates a void-filled level with a custom out-of-bounds sentinel.
    pub fn with_boundary(info: LevelInfo, boundary: Tile) -> Result<Self, LevelError> {
        // Re-check: `LevelInfo` fields are public and may have been built by hand.
        if info.width == 0 || info.height == 0 {
            return Err(LevelError::DegenerateGeometry {
                width: info.width,
                height: info.height,
            });
        }
        let len = info.width as usize * info.height as usize;
        Ok(Self {
            info,
            boundary,
            tiles: vec![Tile::Void; len],
        })
    }

    /// Returns the level's identity.
    pub fn info(&self) -> LevelInfo {
        self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn seed(&self) -> u64 {
        self.info.seed
    }

    pub fn depth(&self) -> i32 {
        self.info.depth
    }

    /// Returns the out-of-bounds sentinel tile.
    pub fn boundary(&self) -> Tile {
        self.boundary
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.info.width && (y as u32) < self.info.height
    }

    /// Returns the tile at `(x, y)`, or the boundary sentinel outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        match self.index(x, y) {
            Some(i) => self.tiles[i],
            None => self.boundary,
        }
    }

    /// Sets the tile at `(x, y)`. Does nothing outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Resets every cell to `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Row-major view of all cells.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates over `(x, y, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        let width = self.info.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| ((i % width) as i32, (i / width) as i32, t))
    }

    /// Histogram of tiles indexed by tile ID.
    pub fn tile_counts(&self) -> [u32; Tile::COUNT] {
        let mut counts = [0u32; Tile::COUNT];
        for &t in &self.tiles {
            counts[t as usize] += 1;
        }
        counts
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: Tile) -> u32 {
        self.tile_counts()[tile as usize]
    }

    /// Hash of the grid contents for determinism comparison.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.info.width.hash(&mut hasher);
        self.info.height.hash(&mut hasher);
        for &t in &self.tiles {
            t.id().hash(&mut hasher);
        }
        hasher.finish()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.info.width as usize + x as usize)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
