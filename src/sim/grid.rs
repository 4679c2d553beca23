//! World/cell coordinate mapping
//!
//! World coordinates are continuous, origin at the board center; cell indices
//! are discrete, `(0, 0)` at the north-west corner. The mapping is total:
//! out-of-range inputs are allowed and simply produce out-of-range outputs,
//! bounds policy belongs to the callers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete maze cell address
///
/// Signed so off-board predictions (one step past an edge) stay representable.
/// North is `-j`, west is `-i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub i: i32,
    pub j: i32,
}

impl CellIndex {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    #[inline]
    pub fn north(self) -> Self {
        Self::new(self.i, self.j - 1)
    }

    #[inline]
    pub fn south(self) -> Self {
        Self::new(self.i, self.j + 1)
    }

    #[inline]
    pub fn west(self) -> Self {
        Self::new(self.i - 1, self.j)
    }

    #[inline]
    pub fn east(self) -> Self {
        Self::new(self.i + 1, self.j)
    }

    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.i) && (0..size).contains(&self.j)
    }

    /// Human-readable `"(i,j)"` form used for the host's cell label
    pub fn label(self) -> String {
        format!("({},{})", self.i, self.j)
    }
}

/// Board geometry: an odd-sized square of unit cells centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Integer half-size, the index of the center cell
    #[inline]
    pub fn half_cells(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// World-space half extent of the board (e.g. 5.5 for size 11)
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size as f32 * 0.5
    }

    /// Map a world position to its cell index
    ///
    /// Positions exactly on a cell boundary round toward the higher index.
    #[inline]
    pub fn to_cell(&self, world: Vec2) -> CellIndex {
        let half = self.half_cells() as f32;
        CellIndex::new(
            (world.x + half + 0.5).floor() as i32,
            (world.y + half + 0.5).floor() as i32,
        )
    }

    /// Map a cell index to the world position of its center
    #[inline]
    pub fn to_world(&self, cell: CellIndex) -> Vec2 {
        let half = self.half_cells();
        Vec2::new((cell.i - half) as f32, (cell.j - half) as f32)
    }
}
