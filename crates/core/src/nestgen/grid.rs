//! Rasterization of placed rectangles into the wall/floor tile grid.

use crate::types::{Rect, TileKind};

use super::model::{Room, TileGrid, WorldBounds};

/// Every cell starts as wall; each rectangle floors the cells it overlaps.
/// Floor assignment is a union, so room order does not matter.
pub fn rasterize(rooms: &[Room], bounds: &WorldBounds, tile_size: f64) -> TileGrid {
    let width = (bounds.width / tile_size).ceil().max(0.0) as usize;
    let height = (bounds.height / tile_size).ceil().max(0.0) as usize;
    let mut tiles = vec![TileKind::Wall; width * height];

    for room in rooms {
        carve_rect(&mut tiles, width, height, bounds, tile_size, room.rect);
    }

    TileGrid { width, height, origin: bounds.origin(), tile_size, tiles }
}

fn carve_rect(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    bounds: &WorldBounds,
    tile_size: f64,
    rect: Rect,
) {
    let (start_col, end_col) = cell_span(rect.x, rect.right(), bounds.min_x, tile_size, width);
    let (start_row, end_row) = cell_span(rect.y, rect.bottom(), bounds.min_y, tile_size, height);
    for row in start_row..end_row {
        for col in start_col..end_col {
            tiles[row * width + col] = TileKind::Floor;
        }
    }
}

/// Half-open cell range covering `[low, high)` world units, clamped to the grid.
fn cell_span(low: f64, high: f64, origin: f64, tile_size: f64, limit: usize) -> (usize, usize) {
    let start = ((low - origin) / tile_size).floor().max(0.0) as usize;
    let end = ((high - origin) / tile_size).ceil().max(0.0) as usize;
    (start.min(limit), end.min(limit))
}
