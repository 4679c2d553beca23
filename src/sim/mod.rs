//! Deterministic simulation module
//!
//! All maze and sprite logic lives here. This module must be pure and
//! deterministic:
//! - One fixed-size step per tick
//! - Seeded RNG only (reflection jitter)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod impact;
pub mod maze;
pub mod predict;
pub mod reflect;
pub mod state;
pub mod tick;

pub use collision::is_blocked;
pub use grid::{Board, CellIndex};
pub use impact::{Impact, resolve_impact};
pub use maze::{Maze, MazeError, WallChange};
pub use predict::{Prediction, predict_next_cell};
pub use reflect::reflect;
pub use state::{ImpactRecord, MazeSimulation, SimEvent, SpritePhase, SpriteState};
pub use tick::{TickInput, tick};
