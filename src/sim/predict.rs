//! Next-cell prediction
//!
//! Marches a cloned position along the sprite's current heading in fixed
//! increments until the occupying cell index changes. The accumulated clone at
//! the first divergence is the impact estimate; its index is the predicted
//! next cell.

use glam::Vec2;

use super::grid::{Board, CellIndex};
use crate::{consts::CELL_WIDTH, heading_degrees, velocity_from_heading};

/// Outcome of a prediction sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// The next cell the sprite will enter on its current heading
    pub cell: CellIndex,
    /// Estimated position of the boundary crossing
    pub impact_estimate: Vec2,
    /// Heading sampled at sweep start, degrees `[0, 360)`
    pub heading_degrees: f32,
}

/// Predict the next cell boundary crossing from `pos` along `vel`
///
/// The heading is sampled once at entry and held fixed for the whole sweep;
/// no mid-sweep re-sampling. The sweep increment must be small relative to
/// the cell width (enforced by config validation) or a diagonal path can hop
/// a boundary without the index ever changing - a fidelity/performance
/// trade-off, not something this function compensates for.
///
/// Callers must pass a non-zero, finite velocity.
pub fn predict_next_cell(
    board: &Board,
    pos: Vec2,
    vel: Vec2,
    sweeper_increment: f32,
) -> Prediction {
    debug_assert!(
        vel.length_squared() > 0.0 && vel.is_finite(),
        "predictor requires a non-zero finite velocity"
    );

    let heading = heading_degrees(vel);
    let step = velocity_from_heading(heading, sweeper_increment);
    let start_cell = board.to_cell(pos);

    // Two cell diagonals is more than any single crossing can need; past that
    // the sweep is wedged (degenerate input) and the tick degrades.
    let max_steps = (2.0 * CELL_WIDTH * std::f32::consts::SQRT_2 / sweeper_increment) as u32;

    let mut clone = pos;
    let mut cell = start_cell;
    let mut steps = 0u32;
    while cell == start_cell {
        if steps >= max_steps {
            log::warn!(
                "prediction sweep from ({:.3},{:.3}) heading {heading:.1} exhausted {max_steps} steps",
                pos.x,
                pos.y
            );
            break;
        }
        clone += step;
        cell = board.to_cell(clone);
        steps += 1;
    }

    Prediction {
        cell,
        impact_estimate: clone,
        heading_degrees: heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(11)
    }

    #[test]
    fn test_eastbound_predicts_east_neighbor() {
        let pred = predict_next_cell(
            &board(),
            Vec2::ZERO,
            velocity_from_heading(0.0, 0.1),
            0.0001,
        );
        assert_eq!(pred.cell, CellIndex::new(6, 5));
        // Crossing sits on the shared edge at x = 0.5
        assert!((pred.impact_estimate.x - 0.5).abs() < 0.001);
        assert!(pred.impact_estimate.y.abs() < 0.001);
    }

    #[test]
    fn test_diagonal_predicts_diagonal_neighbor() {
        let pred = predict_next_cell(
            &board(),
            Vec2::ZERO,
            velocity_from_heading(45.0, 0.1),
            0.0001,
        );
        // From dead center both axes cross together
        assert_eq!(pred.cell, CellIndex::new(6, 6));
        assert!((pred.impact_estimate.x - 0.5).abs() < 0.001);
        assert!((pred.impact_estimate.y - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_offset_diagonal_crosses_nearer_axis_first() {
        // Start east of center: the x edge is closer than the z edge
        let pred = predict_next_cell(
            &board(),
            Vec2::new(0.3, 0.0),
            velocity_from_heading(45.0, 0.1),
            0.0001,
        );
        assert_eq!(pred.cell, CellIndex::new(6, 5));
    }

    #[test]
    fn test_heading_held_fixed() {
        let vel = velocity_from_heading(217.0, 0.1);
        let pred = predict_next_cell(&board(), Vec2::new(-2.0, 1.3), vel, 0.0001);
        assert!((pred.heading_degrees - 217.0).abs() < 0.01);
    }

    #[test]
    fn test_prediction_past_board_edge() {
        // Sweeps are total: from the east edge cell the predicted index is
        // off-board, which the collision checker will refuse
        let pred = predict_next_cell(
            &board(),
            Vec2::new(5.2, 0.0),
            velocity_from_heading(0.0, 0.1),
            0.0001,
        );
        assert_eq!(pred.cell, CellIndex::new(11, 5));
        assert!(!pred.cell.in_bounds(11));
    }
}
