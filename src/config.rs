//! Simulation configuration
//!
//! All host-tunable constants live here. Defaults reproduce the reference
//! 11x11 board with a half-unit sprite at speed 0.1.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::CELL_WIDTH;

/// Configuration rejected by [`SimConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be an odd integer >= 3, got {0}")]
    BadGridSize(usize),
    #[error("sprite speed must be positive and below half a cell, got {0}")]
    BadSpeed(f32),
    #[error("sweeper increment must be positive and at most 1% of cell width, got {0}")]
    BadSweeperIncrement(f32),
    #[error("distance-to-impact offset must be positive, got {0}")]
    BadImpactOffset(f32),
    #[error("sprite speed {speed} must stay below the distance-to-impact offset {offset}")]
    SpeedOutrunsImpactOffset { speed: f32, offset: f32 },
    #[error("velocity damper must be in (0, 1], got {0}")]
    BadDamper(f32),
}

/// Simulation constants, fixed at initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Board is `grid_size x grid_size` cells; must be odd so a cell sits at
    /// the world origin
    pub grid_size: usize,

    // === Sprite ===
    /// Initial heading in degrees
    pub sprite_initial_angle_degrees: f32,
    /// Velocity magnitude per tick, in world units
    pub sprite_speed: f32,
    /// World-space diameter of the sprite mesh
    pub sprite_diameter: f32,
    /// Multiplicative factor applied to velocity after each advance (1 = none)
    pub velocity_damper: f32,

    // === Collision resolution ===
    /// Step size of the boundary-crossing sweep. Must stay at or below 1% of
    /// cell width: a coarser sweep can hop a cell boundary on diagonal paths
    /// without ever seeing the index change.
    pub sweeper_increment: f32,
    /// Distance from the clamped impact point at which reflection triggers
    pub distance_to_impact_offset: f32,
    /// Half-width of the uniform jitter added to the incidence angle on each
    /// reflection, in degrees; 0 disables jitter
    pub reflection_jitter_degrees: f32,
    /// How far inside the nominal half-extent the boundary edge test sits
    pub boundary_clamp_epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        let sprite_diameter = 0.5;
        Self {
            grid_size: 11,

            // Sprite
            sprite_initial_angle_degrees: 45.0,
            sprite_speed: 0.1,
            sprite_diameter,
            velocity_damper: 1.0,

            // Collision resolution
            sweeper_increment: 0.0001,
            distance_to_impact_offset: 0.05 + sprite_diameter * 0.5,
            reflection_jitter_degrees: 0.5,
            boundary_clamp_epsilon: 0.05,
        }
    }
}

impl SimConfig {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 || self.grid_size.is_multiple_of(2) {
            return Err(ConfigError::BadGridSize(self.grid_size));
        }
        if !(self.sprite_speed > 0.0 && self.sprite_speed < CELL_WIDTH * 0.5)
            || !self.sprite_speed.is_finite()
        {
            return Err(ConfigError::BadSpeed(self.sprite_speed));
        }
        if !(self.sweeper_increment > 0.0 && self.sweeper_increment <= CELL_WIDTH * 0.01) {
            return Err(ConfigError::BadSweeperIncrement(self.sweeper_increment));
        }
        if !(self.distance_to_impact_offset > 0.0) {
            return Err(ConfigError::BadImpactOffset(self.distance_to_impact_offset));
        }
        // An approach tick advances a full velocity step while the impact is
        // still at least the offset away; the step must not be able to carry
        // the sprite past the impact point into the blocked cell
        if self.sprite_speed >= self.distance_to_impact_offset {
            return Err(ConfigError::SpeedOutrunsImpactOffset {
                speed: self.sprite_speed,
                offset: self.distance_to_impact_offset,
            });
        }
        if !(self.velocity_damper > 0.0 && self.velocity_damper <= 1.0) {
            return Err(ConfigError::BadDamper(self.velocity_damper));
        }
        Ok(())
    }

    /// Load from a JSON string (host settings storage)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for host settings storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
