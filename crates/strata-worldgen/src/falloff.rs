//! Elevation model: base noise plus roughness, biased in a ring along the map edge.
//!
//! The ring starts at a normalized distance of `1 - 32 / width`, so its
//! thickness is always 32 cells' worth regardless of grid resolution.

use glam::DVec2;

use crate::shaping::falloff_norm;

/// Cells of edge ring, measured along the width axis.
pub const EDGE_RING_CELLS: f64 = 32.0;

/// Radial falloff for a grid of fixed dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFalloff {
    half: DVec2,
    threshold: f64,
    bonus: f64,
}

impl EdgeFalloff {
    /// Build the falloff for a `width × height` grid with the given edge bonus.
    ///
    /// Both dimensions are non-zero: [`strata_level::LevelInfo`] rejects
    /// degenerate geometry before any generator exists.
    pub fn new(width: u32, height: u32, bonus: f64) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            half: DVec2::new(width as f64 / 2.0, height as f64 / 2.0),
            threshold: 1.0 - EDGE_RING_CELLS / width as f64,
            bonus,
        }
    }

    /// Normalized distance of cell `(x, y)` from the grid center.
    pub fn distance(&self, x: i32, y: i32) -> f64 {
        let offset = (DVec2::new(x as f64, y as f64) - self.half).abs() / self.half;
        falloff_norm(offset.x, offset.y)
    }

    /// Distance beyond which the edge bonus applies.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns `true` if cell `(x, y)` lies in the edge ring.
    pub fn in_edge_ring(&self, x: i32, y: i32) -> bool {
        self.distance(x, y) > self.threshold
    }

    /// Elevation `h = nb + nr * 0.5 (+ bonus in the edge ring)`.
    pub fn elevation(&self, x: i32, y: i32, nb: f64, nr: f64) -> f64 {
        let bonus = if self.in_edge_ring(x, y) {
            self.bonus
        } else {
            0.0
        };
        nb + nr * 0.5 + bonus
    }
}
