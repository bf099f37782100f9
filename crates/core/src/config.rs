//! Tunable parameters for nest generation.

use serde::{Deserialize, Serialize};

use crate::error::NestError;

/// Clearance between unrelated rectangles, in tiles.
pub const OVERLAP_PADDING_TILES: f64 = 2.0;
/// Spawn points keep this many tiles away from room walls.
pub const SPAWN_INSET_TILES: f64 = 2.0;
/// Empty margin around all placed geometry, in tiles.
pub const WORLD_PADDING_TILES: f64 = 10.0;
/// Deepest branching a config may request. Expansion recurses once per level.
pub const MAX_DEPTH_LIMIT: u32 = 32;
/// Upper bound on tiles in the rasterized grid for any nest the config can produce.
pub const MAX_GRID_CELLS: f64 = 16_777_216.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestConfig {
    pub room_min_size: f64,
    pub room_max_size: f64,
    pub corridor_width: f64,
    pub corridor_min_length: f64,
    pub corridor_max_length: f64,
    pub branch_probability: f64,
    pub depth_decay: f64,
    pub max_depth: u32,
    pub tile_size: f64,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            room_min_size: 200.0,
            room_max_size: 400.0,
            corridor_width: 64.0,
            corridor_min_length: 100.0,
            corridor_max_length: 200.0,
            branch_probability: 0.6,
            depth_decay: 0.1,
            max_depth: 5,
            tile_size: 16.0,
        }
    }
}

impl NestConfig {
    pub fn overlap_padding(&self) -> f64 {
        self.tile_size * OVERLAP_PADDING_TILES
    }

    pub fn spawn_inset(&self) -> f64 {
        self.tile_size * SPAWN_INSET_TILES
    }

    pub fn world_padding(&self) -> f64 {
        self.tile_size * WORLD_PADDING_TILES
    }

    /// Chance that a room at `depth` attempts a branch in any one direction.
    pub fn branch_probability_at(&self, depth: u32) -> f64 {
        self.branch_probability * (1.0 - f64::from(depth) * self.depth_decay)
    }

    /// Worst-case grid cell count: a square spanning the queen plus a full
    /// corridor and maximum room per level in both directions, with world padding.
    pub fn max_grid_cells(&self) -> f64 {
        let reach = f64::from(self.max_depth) * (self.corridor_max_length + self.room_max_size);
        let side = self.room_max_size + reach * 2.0 + self.world_padding() * 2.0;
        (side / self.tile_size).ceil().powi(2)
    }

    pub fn validate(&self) -> Result<(), NestError> {
        positive("tile_size", self.tile_size)?;
        positive("room_min_size", self.room_min_size)?;
        positive("room_max_size", self.room_max_size)?;
        positive("corridor_width", self.corridor_width)?;
        positive("corridor_min_length", self.corridor_min_length)?;
        positive("corridor_max_length", self.corridor_max_length)?;
        ordered("room_max_size", self.room_min_size, self.room_max_size)?;
        ordered("corridor_max_length", self.corridor_min_length, self.corridor_max_length)?;

        if !(0.0..=1.0).contains(&self.branch_probability) {
            return Err(invalid("branch_probability", "must lie in [0, 1]"));
        }
        if !self.depth_decay.is_finite() || self.depth_decay < 0.0 {
            return Err(invalid("depth_decay", "must be a non-negative finite number"));
        }
        if self.room_min_size <= self.spawn_inset() * 2.0 {
            return Err(invalid(
                "room_min_size",
                format!("must exceed twice the spawn inset ({})", self.spawn_inset() * 2.0),
            ));
        }
        if self.corridor_width > self.room_min_size {
            return Err(invalid("corridor_width", "must not exceed room_min_size"));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(invalid("max_depth", format!("must not exceed {MAX_DEPTH_LIMIT}")));
        }
        let cells = self.max_grid_cells();
        if cells > MAX_GRID_CELLS {
            return Err(invalid(
                "tile_size",
                format!("grid could reach {cells} cells, more than {MAX_GRID_CELLS}"),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), NestError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive finite number"))
    }
}

fn ordered(field: &'static str, min_value: f64, max_value: f64) -> Result<(), NestError> {
    if min_value <= max_value {
        Ok(())
    } else {
        Err(invalid(field, format!("must be at least the minimum ({min_value})")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> NestError {
    NestError::InvalidConfig { field, reason: reason.into() }
}
