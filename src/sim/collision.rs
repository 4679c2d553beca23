//! Blocked/clear decision for a predicted cell
//!
//! Board edges and occupied cells always block. An empty cell reached on an
//! exact diagonal heading is additionally blocked when both orthogonal
//! neighbors forming the corner being cut are occupied - otherwise the sprite
//! would slip through the gap between two touching walls.

use super::grid::CellIndex;
use super::maze::Maze;
use crate::normalize_degrees;

/// Decide whether travel into `target` is blocked
///
/// Rules, in order: off-board blocks; occupied blocks; exact 45/135/225/315
/// headings block when the corner's neighbor pair is fully occupied. The
/// heading is rounded to the nearest whole degree before the diagonal
/// comparison, so only exact diagonals engage the corner rule.
pub fn is_blocked(maze: &Maze, target: CellIndex, heading_degrees: f32) -> bool {
    if !target.in_bounds(maze.size()) {
        return true;
    }
    if maze.is_occupied(target) {
        return true;
    }

    let heading = normalize_degrees(heading_degrees).round() as i32 % 360;
    let corner_pair = match heading {
        45 => Some((target.north(), target.west())),
        135 => Some((target.north(), target.east())),
        225 => Some((target.south(), target.east())),
        315 => Some((target.south(), target.west())),
        _ => None,
    };

    match corner_pair {
        // Off-board neighbors read as occupied, which is the wanted policy:
        // a corner against the boundary wall still blocks
        Some((a, b)) => maze.is_occupied(a) && maze.is_occupied(b),
        None => false,
    }
}
