//! Simulation state and core types
//!
//! Everything the host reads or persists lives here. [`MazeSimulation`] is
//! the explicit context object: occupancy, sprite, configuration, RNG, and
//! pause flag all hang off it, nothing is process-global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Board, CellIndex};
use super::maze::{Maze, MazeError, WallChange};
use crate::config::{ConfigError, SimConfig};
use crate::{heading_degrees, velocity_from_heading};

/// Result of the most recent tick's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpritePhase {
    /// Moving freely inside the current cell
    Cruising,
    /// Next cell is blocked but the impact point is still beyond the trigger
    /// distance
    ApproachingImpact,
    /// A reflection was applied this tick
    Reflecting,
}

/// The sprite: precise position plus a constant-magnitude velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteState {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl SpriteState {
    pub fn new(pos: Vec2, heading_degrees: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: velocity_from_heading(heading_degrees, speed),
        }
    }

    #[inline]
    pub fn heading_degrees(&self) -> f32 {
        heading_degrees(self.vel)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Replace the velocity direction, preserving its magnitude
    pub fn set_heading(&mut self, degrees: f32) {
        self.vel = velocity_from_heading(degrees, self.speed());
    }

    /// Advance one tick and apply the damper
    pub fn advance(&mut self, damper: f32) {
        self.pos += self.vel;
        self.vel *= damper;
    }
}

/// One resolved collision, emitted once and discarded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub position: Vec2,
    pub normal_degrees: f32,
    pub incidence_degrees: f32,
    pub reflected_degrees: f32,
}

/// Outbound notifications for the host, drained each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The sprite's cell index changed; `label` is the display string
    CellEntered { cell: CellIndex, label: String },
    /// A reflection happened
    Impact(ImpactRecord),
    WallPlaced(CellIndex),
    WallRemoved(CellIndex),
}

/// The whole simulation: board, maze, sprite, and per-run bookkeeping
#[derive(Debug, Clone)]
pub struct MazeSimulation {
    pub config: SimConfig,
    pub board: Board,
    pub maze: Maze,
    pub sprite: SpriteState,
    pub phase: SpritePhase,
    paused: bool,
    ticks: u64,
    seed: u64,
    pub(super) rng: Pcg32,
    /// Last cell committed as "entered" by the controller; cleared after a
    /// reflection so the next tick re-evaluates from scratch
    pub(super) last_cell: Option<CellIndex>,
    /// Last cell reported through a `CellEntered` event
    pub(super) label_cell: Option<CellIndex>,
    pub(super) events: Vec<SimEvent>,
}

impl MazeSimulation {
    /// Build a paused simulation with the sprite at board center
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, 0)
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.grid_size);
        let sprite = SpriteState::new(
            Vec2::ZERO,
            config.sprite_initial_angle_degrees,
            config.sprite_speed,
        );
        Ok(Self {
            board,
            maze: Maze::new(config.grid_size),
            sprite,
            phase: SpritePhase::Cruising,
            paused: true,
            ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            last_cell: None,
            label_cell: None,
            events: Vec::new(),
            config,
        })
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub(super) fn bump_ticks(&mut self) {
        self.ticks += 1;
    }

    /// Display string for the sprite's current cell
    pub fn cell_label(&self) -> String {
        self.board.to_cell(self.sprite.pos).label()
    }

    /// Toggle the wall under a world-space pointer target
    ///
    /// Works whether or not the simulation is paused; the host mirrors its
    /// wall mesh from the returned change (also emitted as an event).
    pub fn toggle_wall_at(&mut self, world: Vec2) -> Result<WallChange, MazeError> {
        let change = self.maze.toggle_wall(self.board.to_cell(world))?;
        self.events.push(if change.occupied {
            SimEvent::WallPlaced(change.cell)
        } else {
            SimEvent::WallRemoved(change.cell)
        });
        Ok(change)
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
