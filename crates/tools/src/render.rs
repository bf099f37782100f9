//! Text renderings of a generated nest for the command line.

use clap::ValueEnum;
use nest_core::{GeneratedNest, Point, TileKind};

use crate::format_fingerprint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Short human-readable report.
    Summary,
    /// Tile map with the queen, spawn points, and enemy placements marked.
    Ascii,
    /// The whole nest as pretty-printed JSON.
    Json,
}

pub fn render(nest: &GeneratedNest, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Summary => Ok(render_summary(nest)),
        OutputFormat::Ascii => Ok(render_ascii(nest)),
        OutputFormat::Json => serde_json::to_string_pretty(nest),
    }
}

pub fn render_summary(nest: &GeneratedNest) -> String {
    let graph = &nest.graph;
    let deepest = graph.rooms().iter().map(|room| room.depth).max().unwrap_or(0);
    let queen = nest.queen_position();
    let bounds = &nest.bounds;
    let stats = &nest.stats;

    [
        format!("Fingerprint: {}", format_fingerprint(nest.fingerprint())),
        format!(
            "Rooms: {} ({} normal, {} corridors), deepest level {deepest}",
            graph.len(),
            graph.normal_rooms().count(),
            graph.corridors().count(),
        ),
        format!("Queen: ({:.1}, {:.1})", queen.x, queen.y),
        format!(
            "Spawn points: {}, enemy placements: {}",
            nest.spawn_points.len(),
            nest.enemy_spawns().len(),
        ),
        format!(
            "Bounds: origin ({:.1}, {:.1}), {:.1} x {:.1}",
            bounds.min_x, bounds.min_y, bounds.width, bounds.height,
        ),
        format!(
            "Grid: {} x {} tiles, {} floor",
            nest.grid.width,
            nest.grid.height,
            nest.grid.floor_count(),
        ),
        format!(
            "Branches: {} attempted, {} corridor and {} room rejections",
            stats.branch_attempts, stats.rejected_corridors, stats.rejected_rooms,
        ),
    ]
    .iter()
    .fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}

/// One character per tile: `#` wall, `.` floor, `Q` queen, `S` spawn point, `E` enemy.
pub fn render_ascii(nest: &GeneratedNest) -> String {
    let grid = &nest.grid;
    let mut cells: Vec<char> = grid
        .tiles
        .iter()
        .map(|tile| match tile {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
        })
        .collect();

    let mut mark = |point: Point, glyph: char| {
        if let Some((col, row)) = grid.cell_at(point) {
            cells[row * grid.width + col] = glyph;
        }
    };
    for spawn in &nest.spawn_points {
        mark(spawn.pos, 'S');
    }
    for enemy in nest.enemy_spawns() {
        mark(enemy.pos, 'E');
    }
    mark(nest.queen_position(), 'Q');

    let mut out = String::with_capacity(cells.len() + grid.height);
    for row in cells.chunks(grid.width.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}
