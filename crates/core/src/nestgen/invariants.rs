//! Structural checks over a generated nest, derived from the geometry alone.

use std::collections::VecDeque;

use crate::config::NestConfig;
use crate::error::InvariantViolation;
use crate::types::{RoomId, RoomKind, TileKind};

use super::model::{GeneratedNest, Room};

pub fn verify(nest: &GeneratedNest, config: &NestConfig) -> Result<(), InvariantViolation> {
    let rooms = nest.graph.rooms();
    check_queen(rooms)?;
    check_ids(rooms)?;
    check_connections(rooms)?;
    check_tree(rooms)?;
    check_clearance(rooms, config.overlap_padding())?;
    check_spawn_points(nest, config.spawn_inset())?;
    check_grid(nest)
}

fn check_queen(rooms: &[Room]) -> Result<(), InvariantViolation> {
    let found =
        rooms.iter().filter(|room| room.kind == RoomKind::Queen && room.depth == 0).count();
    let queen_first = rooms.first().is_some_and(|room| room.kind == RoomKind::Queen);
    let stray_queens = rooms.iter().filter(|room| room.kind == RoomKind::Queen).count();
    if found != 1 || stray_queens != 1 || !queen_first {
        return Err(InvariantViolation::QueenCount { found: stray_queens.max(found) });
    }
    Ok(())
}

fn check_ids(rooms: &[Room]) -> Result<(), InvariantViolation> {
    for (index, room) in rooms.iter().enumerate() {
        let expected = RoomId(index as u32);
        if room.id != expected {
            return Err(InvariantViolation::IdOrder { room: expected, found: room.id });
        }
    }
    Ok(())
}

fn check_connections(rooms: &[Room]) -> Result<(), InvariantViolation> {
    for room in rooms {
        for &other in &room.connections {
            let Some(peer) = rooms.get(other.index()) else {
                return Err(InvariantViolation::DanglingConnection { from: room.id, to: other });
            };
            // Rooms only ever link through corridors.
            let alternating =
                (peer.kind == RoomKind::Corridor) != (room.kind == RoomKind::Corridor);
            if !peer.is_connected_to(room.id) || !alternating {
                return Err(InvariantViolation::DanglingConnection { from: room.id, to: other });
            }
        }

        if room.kind != RoomKind::Corridor {
            continue;
        }
        let &[parent, child] = room.connections.as_slice() else {
            return Err(InvariantViolation::CorridorConnections {
                corridor: room.id,
                found: room.connections.len(),
            });
        };
        let parent = &rooms[parent.index()];
        let child = &rooms[child.index()];
        if room.depth != parent.depth {
            return Err(InvariantViolation::Depth {
                room: room.id,
                expected: parent.depth,
                found: room.depth,
            });
        }
        if child.kind != RoomKind::Normal || child.depth != parent.depth + 1 {
            return Err(InvariantViolation::Depth {
                room: child.id,
                expected: parent.depth + 1,
                found: child.depth,
            });
        }
    }
    Ok(())
}

/// Breadth-first walk from the queen: every room is reached exactly once and
/// the only already-seen neighbor is the one we arrived from.
fn check_tree(rooms: &[Room]) -> Result<(), InvariantViolation> {
    let mut parent_of: Vec<Option<RoomId>> = vec![None; rooms.len()];
    let mut seen = vec![false; rooms.len()];
    let mut open = VecDeque::from([RoomId(0)]);
    seen[0] = true;

    while let Some(current) = open.pop_front() {
        for &next in &rooms[current.index()].connections {
            if parent_of[current.index()] == Some(next) {
                continue;
            }
            if seen[next.index()] {
                return Err(InvariantViolation::NotATree { room: next });
            }
            seen[next.index()] = true;
            parent_of[next.index()] = Some(current);
            open.push_back(next);
        }
    }

    match seen.iter().position(|&reached| !reached) {
        Some(index) => Err(InvariantViolation::NotATree { room: RoomId(index as u32) }),
        None => Ok(()),
    }
}

fn check_clearance(rooms: &[Room], padding: f64) -> Result<(), InvariantViolation> {
    for (later_index, later) in rooms.iter().enumerate() {
        let padded = later.rect.expanded(padding);
        for earlier in &rooms[..later_index] {
            if designed_adjacency(earlier, later) {
                continue;
            }
            if padded.intersects(&earlier.rect) {
                return Err(InvariantViolation::Overlap { first: earlier.id, second: later.id });
            }
        }
    }
    Ok(())
}

fn designed_adjacency(a: &Room, b: &Room) -> bool {
    (a.kind == RoomKind::Corridor && a.is_connected_to(b.id))
        || (b.kind == RoomKind::Corridor && b.is_connected_to(a.id))
}

fn check_spawn_points(nest: &GeneratedNest, inset: f64) -> Result<(), InvariantViolation> {
    for (index, spawn) in nest.spawn_points.iter().enumerate() {
        let Some(room) = nest.graph.room(spawn.room).filter(|room| room.kind == RoomKind::Normal)
        else {
            return Err(InvariantViolation::SpawnInWrongRoom { index, room: spawn.room });
        };
        if spawn.depth != room.depth || !room.rect.expanded(-inset).strictly_contains(spawn.pos) {
            return Err(InvariantViolation::SpawnOutsideInterior { index, room: spawn.room });
        }
    }
    Ok(())
}

/// Cells whose center lies in a rectangle must be floor; floor cells must
/// touch some rectangle.
fn check_grid(nest: &GeneratedNest) -> Result<(), InvariantViolation> {
    let grid = &nest.grid;
    let tile_size = grid.tile_size;
    let expected_width = (nest.bounds.width / tile_size).ceil() as usize;
    let expected_height = (nest.bounds.height / tile_size).ceil() as usize;
    if grid.width != expected_width
        || grid.height != expected_height
        || grid.tiles.len() != grid.width * grid.height
    {
        return Err(InvariantViolation::GridSize {
            expected_width,
            expected_height,
            found_width: grid.width,
            found_height: grid.height,
        });
    }

    let mut centered = vec![false; grid.tiles.len()];
    let mut touched = vec![false; grid.tiles.len()];
    for room in nest.graph.rooms() {
        let rect = room.rect;
        let (origin_x, origin_y) = (grid.origin.x, grid.origin.y);
        let cols = (rect.x - origin_x) / tile_size..(rect.right() - origin_x) / tile_size;
        let rows = (rect.y - origin_y) / tile_size..(rect.bottom() - origin_y) / tile_size;

        for (col, row) in cells_between(cols.start - 1.0, cols.end, rows.start - 1.0, rows.end) {
            if col < grid.width && row < grid.height {
                touched[row * grid.width + col] = true;
            }
        }
        let (col_low, col_high) = (cols.start - 0.5, cols.end - 0.5);
        for (col, row) in cells_between(col_low, col_high, rows.start - 0.5, rows.end - 0.5) {
            if col < grid.width && row < grid.height {
                centered[row * grid.width + col] = true;
            }
        }
    }

    for row in 0..grid.height {
        for col in 0..grid.width {
            let index = row * grid.width + col;
            let found = grid.tiles[index];
            let consistent = match found {
                TileKind::Floor => touched[index],
                TileKind::Wall => !centered[index],
            };
            if !consistent {
                return Err(InvariantViolation::GridMismatch { col, row, found });
            }
        }
    }
    Ok(())
}

/// Integer cells `c` with `low <= c <= high` on both axes, clamped at zero.
fn cells_between(
    col_low: f64,
    col_high: f64,
    row_low: f64,
    row_high: f64,
) -> impl Iterator<Item = (usize, usize)> {
    let cols = col_low.ceil().max(0.0) as usize..=col_high.floor().max(0.0) as usize;
    let rows = row_low.ceil().max(0.0) as usize..=row_high.floor().max(0.0) as usize;
    let empty = col_high < 0.0 || row_high < 0.0;
    rows.filter(move |_| !empty).flat_map(move |row| cols.clone().map(move |col| (col, row)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nestgen::generator::NestGenerator;
    use crate::nestgen::model::{NestGraph, SpawnPoint};
    use crate::nestgen::random::SeededRandom;
    use crate::types::{Point, Rect};

    fn nest() -> GeneratedNest {
        NestGenerator::new(NestConfig::default())
            .expect("default config is valid")
            .generate(&mut SeededRandom::new(31_337))
    }

    fn mutate_rooms(nest: &GeneratedNest, edit: impl FnOnce(&mut Vec<Room>)) -> GeneratedNest {
        let mut rooms = nest.graph.rooms().to_vec();
        edit(&mut rooms);
        GeneratedNest { graph: NestGraph::from_rooms(rooms), ..nest.clone() }
    }

    #[test]
    fn untouched_nest_passes() {
        assert_eq!(verify(&nest(), &NestConfig::default()), Ok(()));
    }

    #[test]
    fn detects_a_floor_tile_far_from_geometry() {
        let mut broken = nest();
        broken.grid.tiles[0] = TileKind::Floor;
        assert_eq!(
            verify(&broken, &NestConfig::default()),
            Err(InvariantViolation::GridMismatch { col: 0, row: 0, found: TileKind::Floor })
        );
    }

    #[test]
    fn detects_a_walled_cell_inside_the_queen() {
        let mut broken = nest();
        let (col, row) =
            broken.grid.cell_at(broken.queen_position()).expect("queen is on the grid");
        broken.grid.tiles[row * broken.grid.width + col] = TileKind::Wall;
        assert_eq!(
            verify(&broken, &NestConfig::default()),
            Err(InvariantViolation::GridMismatch { col, row, found: TileKind::Wall })
        );
    }

    #[test]
    fn detects_a_spawn_point_in_the_queen_room() {
        let mut broken = nest();
        broken.spawn_points.push(SpawnPoint {
            pos: Point { x: 200.0, y: 200.0 },
            room: RoomId(0),
            depth: 0,
        });
        let index = broken.spawn_points.len() - 1;
        assert_eq!(
            verify(&broken, &NestConfig::default()),
            Err(InvariantViolation::SpawnInWrongRoom { index, room: RoomId(0) })
        );
    }

    #[test]
    fn detects_a_spawn_point_on_the_inset_edge() {
        let config = NestConfig::default();
        let mut broken = nest();
        let room = broken.graph.normal_rooms().next().expect("seed places a normal room").clone();
        let interior = room.rect.expanded(-config.spawn_inset());
        broken.spawn_points.push(SpawnPoint {
            pos: Point { x: interior.x, y: interior.y + interior.height / 2.0 },
            room: room.id,
            depth: room.depth,
        });
        let index = broken.spawn_points.len() - 1;
        assert_eq!(
            verify(&broken, &config),
            Err(InvariantViolation::SpawnOutsideInterior { index, room: room.id })
        );
    }

    #[test]
    fn detects_an_extra_edge_closing_a_cycle() {
        let base = nest();
        if base.graph.len() < 3 {
            return;
        }
        let last = RoomId(base.graph.len() as u32 - 1);
        let broken = mutate_rooms(&base, |rooms| {
            rooms[0].connections.push(last);
            rooms[last.index()].connections.push(RoomId(0));
        });
        assert!(verify(&broken, &NestConfig::default()).is_err());
    }

    #[test]
    fn detects_overlapping_rooms() {
        let base = nest();
        let broken = mutate_rooms(&base, |rooms| {
            let id = RoomId(rooms.len() as u32);
            rooms.push(Room {
                id,
                rect: Rect::new(10.0, 10.0, 50.0, 50.0),
                kind: RoomKind::Normal,
                depth: 1,
                connections: Vec::new(),
            });
        });
        let result = verify(&broken, &NestConfig::default());
        assert!(result.is_err(), "a stray room inside the queen chamber must be flagged");
    }
}
