//! Maze Bounce - a grid-maze billiard simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid mapping, maze occupancy, motion
//!   prediction, collision resolution, reflection, per-tick controller)
//! - `config`: Data-driven simulation constants
//!
//! The crate is rendering-agnostic: a host view calls [`sim::tick`] once per
//! frame, feeds pointer/pause input through [`sim::TickInput`], and drains
//! [`sim::SimEvent`]s to keep its wall meshes and labels in sync.

pub mod config;
pub mod sim;

pub use config::{ConfigError, SimConfig};

use glam::Vec2;

/// Fixed simulation constants that are not host-tunable
pub mod consts {
    /// Cell width in world units (the grid is unit-celled)
    pub const CELL_WIDTH: f32 = 1.0;
    /// Decimal places used when comparing impact coordinates
    pub const IMPACT_PRECISION: i32 = 3;
}

/// Normalize an angle in degrees to `[0, 360)`
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Heading of a velocity vector in degrees `[0, 360)`
///
/// `v.x` is the board x axis, `v.y` the board z axis; 0° points along +x,
/// 90° along +z.
#[inline]
pub fn heading_degrees(v: Vec2) -> f32 {
    normalize_degrees(v.y.atan2(v.x).to_degrees())
}

/// Velocity vector with the given heading (degrees) and magnitude
#[inline]
pub fn velocity_from_heading(degrees: f32, speed: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin()) * speed
}

/// Round a coordinate to the shared impact-comparison precision
#[inline]
pub fn round_coord(v: f32) -> f32 {
    let scale = 10f32.powi(consts::IMPACT_PRECISION);
    (v * scale).round() / scale
}
