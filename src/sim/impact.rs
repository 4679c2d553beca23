//! Impact point and surface-normal resolution
//!
//! Given a blocked prediction, works out where the sprite actually strikes
//! and which way the struck surface faces. Two regimes: the board boundary
//! (cardinal or corner normals straight from the edge table) and interior
//! walls (heading bucketed into a quadrant, then the closer of the two
//! candidate cell faces wins; an exact-corner tie is settled by the blocked
//! cell's orthogonal neighbors).
//!
//! Normals feed [`super::reflect`], which is invariant under a 180-degree
//! normal flip, so each face uses the literal table value: x-max 0, x-min 180,
//! z-max 270, z-min 90.

use glam::Vec2;

use super::grid::{Board, CellIndex};
use super::maze::Maze;
use crate::consts::CELL_WIDTH;
use crate::{heading_degrees, normalize_degrees, round_coord};

/// A resolved impact: where the sprite strikes and the surface normal there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Impact point, clamped to the current cell's box (interior) or the
    /// board edge (boundary)
    pub position: Vec2,
    /// Normal of the struck face or corner, degrees `[0, 360)`
    pub normal_degrees: f32,
}

/// Resolve the impact for a blocked prediction
///
/// `impact_estimate` is the sweep position from the motion predictor. All
/// coordinate comparisons happen after rounding to 3 decimals so float jitter
/// cannot turn a face tie into a miss.
pub fn resolve_impact(
    board: &Board,
    maze: &Maze,
    clamp_epsilon: f32,
    pos: Vec2,
    vel: Vec2,
    impact_estimate: Vec2,
) -> Impact {
    let heading = heading_degrees(vel);
    let exact = Vec2::new(round_coord(pos.x), round_coord(pos.y));
    let cell_center = board.to_world(board.to_cell(exact));

    let half = CELL_WIDTH * 0.5;
    let estimate = Vec2::new(round_coord(impact_estimate.x), round_coord(impact_estimate.y));
    let clamped = estimate.clamp(
        cell_center - Vec2::splat(half),
        cell_center + Vec2::splat(half),
    );

    let blocked_cell = board.to_cell(impact_estimate);
    if !blocked_cell.in_bounds(board.size()) {
        match resolve_boundary(board, clamp_epsilon, clamped) {
            Some(impact) => return impact,
            None => {
                // Prediction says off-board but the clamped estimate reaches
                // no edge; degrade to the interior face logic for this tick
                log::warn!(
                    "blocked cell ({},{}) is off-board but impact ({:.3},{:.3}) touches no edge",
                    blocked_cell.i,
                    blocked_cell.j,
                    clamped.x,
                    clamped.y
                );
            }
        }
    }

    resolve_interior(maze, heading, cell_center, clamped, blocked_cell)
}

/// Board-boundary regime: cardinal face normals, or an inward diagonal when
/// both axes sit at their limits
fn resolve_boundary(board: &Board, clamp_epsilon: f32, clamped: Vec2) -> Option<Impact> {
    let limit = board.half_extent();
    let edge = limit - clamp_epsilon;

    let x_hit = if clamped.x >= edge {
        Some((limit, 0.0))
    } else if clamped.x <= -edge {
        Some((-limit, 180.0))
    } else {
        None
    };
    let z_hit = if clamped.y >= edge {
        Some((limit, 270.0))
    } else if clamped.y <= -edge {
        Some((-limit, 90.0))
    } else {
        None
    };

    match (x_hit, z_hit) {
        (Some((x, _)), Some((z, _))) => {
            let normal_degrees = match (x > 0.0, z > 0.0) {
                (true, true) => 225.0,
                (true, false) => 135.0,
                (false, true) => 315.0,
                (false, false) => 45.0,
            };
            Some(Impact {
                position: Vec2::new(x, z),
                normal_degrees,
            })
        }
        (Some((x, normal_degrees)), None) => Some(Impact {
            position: Vec2::new(x, clamped.y),
            normal_degrees,
        }),
        (None, Some((z, normal_degrees))) => Some(Impact {
            position: Vec2::new(clamped.x, z),
            normal_degrees,
        }),
        (None, None) => None,
    }
}

/// Interior-wall regime
///
/// Per quadrant the sprite can only strike two faces of its current cell; the
/// one the impact point sits closer to is the struck face. Equal distances
/// mean an exact corner hit, settled by which of the blocked cell's two
/// orthogonal neighbors carry a wall: a single occupied neighbor extends that
/// wall run, so its face normal applies; both or neither leave a free corner
/// and the diagonal normal.
fn resolve_interior(
    maze: &Maze,
    heading: f32,
    cell_center: Vec2,
    clamped: Vec2,
    blocked_cell: CellIndex,
) -> Impact {
    let half = CELL_WIDTH * 0.5;
    let min = cell_center - Vec2::splat(half);
    let max = cell_center + Vec2::splat(half);

    // Per-quadrant candidates: distance to the x face and its normal,
    // distance to the z face and its normal, the corner diagonal, and the
    // blocked cell's tie-breaking neighbors (z-stacked first, then x-stacked)
    let quadrant = normalize_degrees(heading);
    let (dist_x, x_normal, dist_z, z_normal, diagonal, stack_z, stack_x) = if quadrant < 90.0 {
        // North-west approach: +x +z
        (
            max.x - clamped.x,
            0.0,
            max.y - clamped.y,
            90.0,
            45.0,
            blocked_cell.north(),
            blocked_cell.west(),
        )
    } else if quadrant < 180.0 {
        // North-east approach: -x +z
        (
            clamped.x - min.x,
            180.0,
            max.y - clamped.y,
            90.0,
            135.0,
            blocked_cell.north(),
            blocked_cell.east(),
        )
    } else if quadrant < 270.0 {
        // South-east approach: -x -z
        (
            clamped.x - min.x,
            180.0,
            clamped.y - min.y,
            270.0,
            225.0,
            blocked_cell.south(),
            blocked_cell.east(),
        )
    } else {
        // South-west approach: +x -z
        (
            max.x - clamped.x,
            0.0,
            clamped.y - min.y,
            270.0,
            315.0,
            blocked_cell.south(),
            blocked_cell.west(),
        )
    };

    let dist_x = round_coord(dist_x);
    let dist_z = round_coord(dist_z);

    let normal_degrees = if dist_x == dist_z {
        // Exact corner hit
        match (maze.is_occupied(stack_z), maze.is_occupied(stack_x)) {
            (true, false) => x_normal,
            (false, true) => z_normal,
            _ => diagonal,
        }
    } else if dist_z < dist_x {
        z_normal
    } else {
        x_normal
    };

    Impact {
        position: clamped,
        normal_degrees,
    }
}
