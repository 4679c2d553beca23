//! Maze occupancy state
//!
//! A square table of wall flags, mutated only by explicit placement/removal.
//! Reads are fail-safe: anything off the board counts as occupied, since
//! off-board is always impassable. The maze holds no render handles; hosts
//! mirror wall meshes from the [`WallChange`] notifications.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::CellIndex;

/// Wall mutation outside the board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("cell ({i},{j}) is outside the {size}x{size} board")]
    OutOfBounds { i: i32, j: i32, size: usize },
}

/// Notification of a single occupancy change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallChange {
    pub cell: CellIndex,
    /// Occupancy after the change
    pub occupied: bool,
}

/// Square occupancy table, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    size: usize,
    cells: Vec<bool>,
}

impl Maze {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn offset(&self, cell: CellIndex) -> Option<usize> {
        cell.in_bounds(self.size)
            .then(|| cell.j as usize * self.size + cell.i as usize)
    }

    /// Whether travel into `cell` is obstructed; off-board cells are always
    /// occupied
    #[inline]
    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        match self.offset(cell) {
            Some(offset) => self.cells[offset],
            None => true,
        }
    }

    pub fn set_wall(&mut self, cell: CellIndex) -> Result<WallChange, MazeError> {
        self.write(cell, true)
    }

    pub fn clear_wall(&mut self, cell: CellIndex) -> Result<WallChange, MazeError> {
        self.write(cell, false)
    }

    /// Flip the wall at `cell`, returning the resulting occupancy
    pub fn toggle_wall(&mut self, cell: CellIndex) -> Result<WallChange, MazeError> {
        let occupied = match self.offset(cell) {
            Some(offset) => self.cells[offset],
            None => {
                return Err(MazeError::OutOfBounds {
                    i: cell.i,
                    j: cell.j,
                    size: self.size,
                });
            }
        };
        self.write(cell, !occupied)
    }

    fn write(&mut self, cell: CellIndex, occupied: bool) -> Result<WallChange, MazeError> {
        match self.offset(cell) {
            Some(offset) => {
                self.cells[offset] = occupied;
                Ok(WallChange { cell, occupied })
            }
            None => Err(MazeError::OutOfBounds {
                i: cell.i,
                j: cell.j,
                size: self.size,
            }),
        }
    }

    /// Number of placed walls
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over all occupied cells, row-major
    pub fn walls(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().enumerate().filter_map(|(offset, &occ)| {
            occ.then(|| {
                CellIndex::new((offset % self.size) as i32, (offset / self.size) as i32)
            })
        })
    }
}
