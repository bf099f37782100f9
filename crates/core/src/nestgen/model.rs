//! Public data models for generated nests: rooms, spawn points, bounds, and the tile grid.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::InvariantViolation;
use crate::types::{Point, Rect, RoomId, RoomKind, TileKind};

use super::random::RandomSource;

/// Enemies placed per normal room never exceed this count.
pub const MAX_ENEMIES_PER_ROOM: u32 = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub rect: Rect,
    pub kind: RoomKind,
    pub depth: u32,
    pub connections: Vec<RoomId>,
}

impl Room {
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connections.contains(&other)
    }
}

/// Placed rooms and corridors in id order. The first entry is always the queen room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NestGraphParts")]
pub struct NestGraph {
    rooms: Vec<Room>,
}

#[derive(Deserialize)]
struct NestGraphParts {
    rooms: Vec<Room>,
}

impl TryFrom<NestGraphParts> for NestGraph {
    type Error = InvariantViolation;

    fn try_from(parts: NestGraphParts) -> Result<Self, Self::Error> {
        if !parts.rooms.first().is_some_and(|room| room.kind == RoomKind::Queen) {
            let found = parts.rooms.iter().filter(|room| room.kind == RoomKind::Queen).count();
            return Err(InvariantViolation::QueenCount { found });
        }
        Ok(Self { rooms: parts.rooms })
    }
}

impl NestGraph {
    pub(super) fn from_rooms(rooms: Vec<Room>) -> Self {
        debug_assert!(rooms.first().is_some_and(|room| room.kind == RoomKind::Queen));
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn queen(&self) -> &Room {
        &self.rooms[0]
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn normal_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.kind == RoomKind::Normal)
    }

    pub fn corridors(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.kind == RoomKind::Corridor)
    }

    /// Uniformly picks a normal room, e.g. for reinforcements arriving mid-level.
    pub fn pick_normal_room<R: RandomSource>(&self, random: &mut R) -> Option<&Room> {
        let candidates: Vec<&Room> = self.normal_rooms().collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[random.range_usize(0, candidates.len())])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub pos: Point,
    pub room: RoomId,
    pub depth: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Point,
    pub room: RoomId,
    pub depth: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn origin(&self) -> Point {
        Point { x: self.min_x, y: self.min_y }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.width, self.height)
    }
}

/// Row-major wall/floor grid anchored at the world bounds origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TileGridParts")]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub origin: Point,
    pub tile_size: f64,
    pub tiles: Vec<TileKind>,
}

#[derive(Deserialize)]
struct TileGridParts {
    width: usize,
    height: usize,
    origin: Point,
    tile_size: f64,
    tiles: Vec<TileKind>,
}

impl TryFrom<TileGridParts> for TileGrid {
    type Error = InvariantViolation;

    fn try_from(parts: TileGridParts) -> Result<Self, Self::Error> {
        let expected = parts.width.saturating_mul(parts.height);
        if parts.tiles.len() != expected {
            return Err(InvariantViolation::TileCount { expected, found: parts.tiles.len() });
        }
        let TileGridParts { width, height, origin, tile_size, tiles } = parts;
        Ok(Self { width, height, origin, tile_size, tiles })
    }
}

impl TileGrid {
    /// Out-of-grid cells read as wall.
    pub fn tile(&self, col: usize, row: usize) -> TileKind {
        if col >= self.width || row >= self.height {
            return TileKind::Wall;
        }
        self.tiles.get(row * self.width + col).copied().unwrap_or(TileKind::Wall)
    }

    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        let col = ((point.x - self.origin.x) / self.tile_size).floor();
        let row = ((point.y - self.origin.y) / self.tile_size).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    pub fn cell_center(&self, col: usize, row: usize) -> Point {
        Point {
            x: self.origin.x + (col as f64 + 0.5) * self.tile_size,
            y: self.origin.y + (row as f64 + 0.5) * self.tile_size,
        }
    }

    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            self.origin.x + col as f64 * self.tile_size,
            self.origin.y + row as f64 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }
}

/// Placement bookkeeping for one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub branch_attempts: u32,
    pub rejected_corridors: u32,
    pub rejected_rooms: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNest {
    pub graph: NestGraph,
    pub spawn_points: Vec<SpawnPoint>,
    pub bounds: WorldBounds,
    pub grid: TileGrid,
    pub stats: GenerationStats,
}

impl GeneratedNest {
    pub fn queen_position(&self) -> Point {
        self.graph.queen().center()
    }

    /// One entry per enemy: normal rooms hold `min(depth, 2)` enemies at their center.
    pub fn enemy_spawns(&self) -> Vec<EnemySpawn> {
        self.graph
            .normal_rooms()
            .flat_map(|room| {
                let count = room.depth.min(MAX_ENEMIES_PER_ROOM);
                (0..count).map(move |_| EnemySpawn {
                    pos: room.center(),
                    room: room.id,
                    depth: room.depth,
                })
            })
            .collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.graph.len() as u32).to_le_bytes());
        for room in self.graph.rooms() {
            bytes.extend(room.id.0.to_le_bytes());
            push_rect(&mut bytes, room.rect);
            bytes.push(match room.kind {
                RoomKind::Queen => 0,
                RoomKind::Normal => 1,
                RoomKind::Corridor => 2,
            });
            bytes.extend(room.depth.to_le_bytes());
            bytes.extend((room.connections.len() as u32).to_le_bytes());
            for connection in &room.connections {
                bytes.extend(connection.0.to_le_bytes());
            }
        }

        bytes.extend((self.spawn_points.len() as u32).to_le_bytes());
        for spawn in &self.spawn_points {
            bytes.extend(spawn.pos.x.to_bits().to_le_bytes());
            bytes.extend(spawn.pos.y.to_bits().to_le_bytes());
            bytes.extend(spawn.room.0.to_le_bytes());
            bytes.extend(spawn.depth.to_le_bytes());
        }

        push_rect(&mut bytes, self.bounds.as_rect());
        bytes.extend((self.grid.width as u32).to_le_bytes());
        bytes.extend((self.grid.height as u32).to_le_bytes());
        for tile in &self.grid.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_rect(bytes: &mut Vec<u8>, rect: Rect) {
    for value in [rect.x, rect.y, rect.width, rect.height] {
        bytes.extend(value.to_bits().to_le_bytes());
    }
}
