//! High-level nest generation orchestration that composes layout, bounds, and rasterization.

use log::debug;

use crate::config::NestConfig;
use crate::error::NestError;

use super::bounds::enclosing_bounds;
use super::grid::rasterize;
use super::layout::RoomGraphBuilder;
use super::model::GeneratedNest;
use super::random::RandomSource;

pub struct NestGenerator {
    config: NestConfig,
}

impl NestGenerator {
    pub fn new(config: NestConfig) -> Result<Self, NestError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Builds a fresh nest. The same config and random stream always yield the same nest.
    pub fn generate<R: RandomSource>(&self, random: &mut R) -> GeneratedNest {
        let layout = RoomGraphBuilder::new(&self.config).build(random);

        let queen = layout.graph.queen().rect;
        let rest = layout.graph.rooms()[1..].iter().map(|room| room.rect);
        let bounds = enclosing_bounds(queen, rest, self.config.world_padding());
        let grid = rasterize(layout.graph.rooms(), &bounds, self.config.tile_size);

        debug!(
            "generated nest: {} rooms ({} normal), {} spawn points, {}x{} tiles, \
             {} corridor / {} room rejections",
            layout.graph.len(),
            layout.graph.normal_rooms().count(),
            layout.spawn_points.len(),
            grid.width,
            grid.height,
            layout.stats.rejected_corridors,
            layout.stats.rejected_rooms,
        );

        GeneratedNest {
            graph: layout.graph,
            spawn_points: layout.spawn_points,
            bounds,
            grid,
            stats: layout.stats,
        }
    }
}
