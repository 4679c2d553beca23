//! Per-tick sprite controller
//!
//! One call per animation frame. The controller predicts the next cell,
//! checks it, and either cruises, closes in on a pending impact, or reflects.
//! Scheduling belongs to the host; this is just the step function.

use super::collision::is_blocked;
use super::impact::resolve_impact;
use super::predict::predict_next_cell;
use super::reflect::{reflect, sample_jitter};
use super::state::{ImpactRecord, MazeSimulation, SimEvent, SpritePhase};
use glam::Vec2;

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World-space pointer target to toggle a wall at (double-click semantics)
    pub toggle_wall: Option<Vec2>,
    /// Flip the pause flag this tick
    pub toggle_pause: bool,
}

/// Advance the simulation by one tick
///
/// Wall toggles are honored even while paused so the host's maze editor keeps
/// working; everything else freezes until unpaused.
pub fn tick(sim: &mut MazeSimulation, input: &TickInput) {
    if let Some(target) = input.toggle_wall {
        if let Err(err) = sim.toggle_wall_at(target) {
            log::warn!("wall toggle ignored: {err}");
        }
    }
    if input.toggle_pause {
        sim.toggle_paused();
    }
    if sim.paused() {
        return;
    }

    let cur_cell = sim.board.to_cell(sim.sprite.pos);
    if sim.label_cell != Some(cur_cell) {
        sim.label_cell = Some(cur_cell);
        sim.events.push(SimEvent::CellEntered {
            cell: cur_cell,
            label: cur_cell.label(),
        });
    }

    let prediction = predict_next_cell(
        &sim.board,
        sim.sprite.pos,
        sim.sprite.vel,
        sim.config.sweeper_increment,
    );
    let blocked = is_blocked(&sim.maze, prediction.cell, prediction.heading_degrees);
    let fresh_cell = sim.last_cell != Some(cur_cell);

    if fresh_cell && !blocked {
        // Entered a new cell with a clear path ahead: commit the cell and
        // re-square the velocity onto the freshly measured heading. No
        // position change this tick.
        sim.sprite.set_heading(prediction.heading_degrees);
        sim.last_cell = Some(cur_cell);
        sim.phase = SpritePhase::Cruising;
    } else if !blocked {
        sim.sprite.advance(sim.config.velocity_damper);
        sim.phase = SpritePhase::Cruising;
    } else {
        let impact = resolve_impact(
            &sim.board,
            &sim.maze,
            sim.config.boundary_clamp_epsilon,
            sim.sprite.pos,
            sim.sprite.vel,
            prediction.impact_estimate,
        );
        let distance = sim.sprite.pos.distance(impact.position);

        if distance >= sim.config.distance_to_impact_offset {
            // Still closing in on the blocked boundary
            sim.sprite.advance(sim.config.velocity_damper);
            sim.phase = SpritePhase::ApproachingImpact;
        } else {
            let jitter = sample_jitter(&mut sim.rng, sim.config.reflection_jitter_degrees);
            let incidence = prediction.heading_degrees;
            let reflected = reflect(incidence, impact.normal_degrees, jitter);

            sim.sprite.set_heading(reflected);
            sim.sprite.advance(sim.config.velocity_damper);
            // Force a full re-evaluation next tick
            sim.last_cell = None;
            sim.phase = SpritePhase::Reflecting;

            log::debug!(
                "impact at ({:.3},{:.3}) incidence {incidence:.1} normal {:.1} reflected {reflected:.1}",
                impact.position.x,
                impact.position.y,
                impact.normal_degrees,
            );
            sim.events.push(SimEvent::Impact(ImpactRecord {
                position: impact.position,
                normal_degrees: impact.normal_degrees,
                incidence_degrees: incidence,
                reflected_degrees: reflected,
            }));
        }
    }

    sim.bump_ticks();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;
    use crate::sim::grid::CellIndex;

    /// Default config with jitter disabled so reflections are exact
    fn test_config() -> SimConfig {
        SimConfig {
            reflection_jitter_degrees: 0.0,
            ..Default::default()
        }
    }

    fn running_sim(config: SimConfig) -> MazeSimulation {
        let mut sim = MazeSimulation::with_seed(config, 1).unwrap();
        sim.set_paused(false);
        sim
    }

    fn run_until_impact(sim: &mut MazeSimulation, max_ticks: u32) -> ImpactRecord {
        let input = TickInput::default();
        for _ in 0..max_ticks {
            tick(sim, &input);
            for event in sim.drain_events() {
                if let SimEvent::Impact(record) = event {
                    return record;
                }
            }
        }
        panic!("no impact within {max_ticks} ticks");
    }

    #[test]
    fn test_paused_sim_does_not_move() {
        let mut sim = MazeSimulation::new(test_config()).unwrap();
        let input = TickInput::default();
        for _ in 0..10 {
            tick(&mut sim, &input);
        }
        assert_eq!(sim.sprite.pos, Vec2::ZERO);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn test_toggle_pause_input() {
        let mut sim = MazeSimulation::new(test_config()).unwrap();
        let unpause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut sim, &unpause);
        assert!(!sim.paused());
        // The unpausing tick already runs the controller
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_wall_toggle_works_while_paused() {
        let mut sim = MazeSimulation::new(test_config()).unwrap();
        let input = TickInput {
            toggle_wall: Some(Vec2::new(3.0, 3.0)),
            ..Default::default()
        };
        tick(&mut sim, &input);
        assert!(sim.maze.is_occupied(CellIndex::new(8, 8)));
        assert_eq!(
            sim.drain_events(),
            vec![SimEvent::WallPlaced(CellIndex::new(8, 8))]
        );
        assert_eq!(sim.sprite.pos, Vec2::ZERO);
    }

    #[test]
    fn test_off_board_wall_toggle_is_ignored() {
        let mut sim = MazeSimulation::new(test_config()).unwrap();
        let input = TickInput {
            toggle_wall: Some(Vec2::new(40.0, 0.0)),
            ..Default::default()
        };
        tick(&mut sim, &input);
        assert_eq!(sim.maze.wall_count(), 0);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_first_tick_commits_cell_without_moving() {
        let mut sim = running_sim(test_config());
        tick(&mut sim, &TickInput::default());
        assert_eq!(sim.sprite.pos, Vec2::ZERO);
        assert_eq!(sim.phase, SpritePhase::Cruising);
        let events = sim.drain_events();
        assert_eq!(
            events,
            vec![SimEvent::CellEntered {
                cell: CellIndex::new(5, 5),
                label: "(5,5)".to_string(),
            }]
        );
    }

    #[test]
    fn test_cruising_advances_by_velocity() {
        let mut sim = running_sim(test_config());
        let input = TickInput::default();
        tick(&mut sim, &input); // commit tick
        tick(&mut sim, &input);
        assert!((sim.sprite.pos.distance(Vec2::ZERO) - 0.1).abs() < 1e-5);
        assert_eq!(sim.phase, SpritePhase::Cruising);
    }

    #[test]
    fn test_label_events_track_cell_changes() {
        let mut sim = running_sim(test_config());
        let input = TickInput::default();
        let mut labels = Vec::new();
        for _ in 0..20 {
            tick(&mut sim, &input);
            for event in sim.drain_events() {
                if let SimEvent::CellEntered { label, .. } = event {
                    labels.push(label);
                }
            }
        }
        // Heading 45 at speed 0.1: crosses into (6,6) within 20 ticks
        assert_eq!(labels, vec!["(5,5)".to_string(), "(6,6)".to_string()]);
    }

    #[test]
    fn test_board_corner_run_end_to_end() {
        // Empty 11x11 board, sprite from center at exactly 45 degrees: both
        // axis limits are reached on the same sweep, so the boundary corner
        // row applies and the reflection is a straight reversal.
        let mut sim = running_sim(test_config());
        let record = run_until_impact(&mut sim, 200);

        assert_eq!(record.normal_degrees, 225.0);
        assert!((record.incidence_degrees - 45.0).abs() < 0.01);
        assert!((record.reflected_degrees - 225.0).abs() < 0.01);
        assert_eq!(record.position, Vec2::new(5.5, 5.5));
        assert_eq!(sim.phase, SpritePhase::Reflecting);

        // Magnitude survives the reflection
        assert!((sim.sprite.speed() - 0.1).abs() < 1e-5);
        // And the sprite is now heading back toward the center
        assert!((sim.sprite.heading_degrees() - 225.0).abs() < 0.01);
    }

    #[test]
    fn test_approach_precedes_reflection() {
        let mut sim = running_sim(test_config());
        let input = TickInput::default();
        let mut saw_approach = false;
        for _ in 0..200 {
            tick(&mut sim, &input);
            match sim.phase {
                SpritePhase::ApproachingImpact => saw_approach = true,
                SpritePhase::Reflecting => {
                    assert!(saw_approach, "reflected without an approach window");
                    return;
                }
                SpritePhase::Cruising => {}
            }
        }
        panic!("never reflected");
    }

    #[test]
    fn test_interior_wall_reflection() {
        // Wall directly east of the start cell: eastbound sprite bounces back
        let mut sim = running_sim(SimConfig {
            sprite_initial_angle_degrees: 0.0,
            ..test_config()
        });
        sim.toggle_wall_at(Vec2::new(1.0, 0.0)).unwrap();
        sim.drain_events();

        let record = run_until_impact(&mut sim, 100);
        assert_eq!(record.normal_degrees, 0.0);
        assert!((record.reflected_degrees - 180.0).abs() < 0.01);
        assert!((record.position.x - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_velocity_magnitude_conserved_with_unit_damper() {
        let mut sim = running_sim(SimConfig {
            // Jitter on: conservation must hold regardless
            reflection_jitter_degrees: 0.5,
            ..Default::default()
        });
        sim.toggle_wall_at(Vec2::new(2.0, 2.0)).unwrap();
        sim.toggle_wall_at(Vec2::new(-3.0, 1.0)).unwrap();
        sim.drain_events();

        let input = TickInput::default();
        for _ in 0..2000 {
            tick(&mut sim, &input);
            assert!(
                (sim.sprite.speed() - 0.1).abs() < 1e-4,
                "speed drifted to {} at tick {}",
                sim.sprite.speed(),
                sim.ticks()
            );
        }
    }

    #[test]
    fn test_fast_sprite_stops_short_of_wall() {
        // The fastest validated sprite must still resolve an approach window
        // before the wall rather than stepping over the impact point
        let mut sim = running_sim(SimConfig {
            sprite_speed: 0.25,
            sprite_initial_angle_degrees: 0.0,
            ..test_config()
        });
        sim.toggle_wall_at(Vec2::new(1.0, 0.0)).unwrap();
        sim.drain_events();
        sim.sprite.pos = Vec2::new(0.15, 0.0);

        let input = TickInput::default();
        let mut reflected = false;
        for _ in 0..20 {
            tick(&mut sim, &input);
            let cell = sim.board.to_cell(sim.sprite.pos);
            assert!(
                !sim.maze.is_occupied(cell),
                "sprite advanced into occupied cell {:?} at pos {:?}",
                cell,
                sim.sprite.pos
            );
            reflected |= sim.phase == SpritePhase::Reflecting;
        }
        assert!(reflected);
    }

    #[test]
    fn test_damper_scales_speed_per_tick() {
        let mut sim = running_sim(SimConfig {
            velocity_damper: 0.99,
            ..test_config()
        });
        let input = TickInput::default();
        for _ in 0..50 {
            tick(&mut sim, &input);
        }
        assert!(sim.sprite.speed() < 0.1);
    }

    #[test]
    fn test_sprite_never_enters_occupied_cell() {
        let mut sim = running_sim(test_config());
        // Box the center in
        for world in [
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, 1.0),
        ] {
            sim.toggle_wall_at(world).unwrap();
        }
        sim.drain_events();

        let input = TickInput::default();
        for _ in 0..3000 {
            tick(&mut sim, &input);
            let cell = sim.board.to_cell(sim.sprite.pos);
            assert!(
                !sim.maze.is_occupied(cell),
                "sprite inside wall cell {:?} at tick {}",
                cell,
                sim.ticks()
            );
        }
    }
}
