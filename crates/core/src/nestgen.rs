//! Procedural nest generation split into coherent submodules.

pub mod model;
pub mod random;

mod bounds;
mod generator;
mod grid;
mod invariants;
mod layout;
mod overlap;
mod seed;
mod spawns;

pub use bounds::compute_bounds;
pub use generator::NestGenerator;
pub use grid::rasterize;
pub use invariants::verify;
pub use model::{
    EnemySpawn, GeneratedNest, GenerationStats, NestGraph, Room, SpawnPoint, TileGrid, WorldBounds,
};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use seed::derive_level_seed;

use crate::config::NestConfig;
use crate::error::NestError;

/// Generates the nest for one level of a run.
pub fn generate_nest(
    run_seed: u64,
    level_index: u32,
    config: &NestConfig,
) -> Result<GeneratedNest, NestError> {
    let generator = NestGenerator::new(config.clone())?;
    let mut random = SeededRandom::new(derive_level_seed(run_seed, level_index));
    Ok(generator.generate(&mut random))
}
