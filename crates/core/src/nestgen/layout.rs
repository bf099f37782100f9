//! Recursive room/corridor branching that grows the nest outward from the queen chamber.

use std::fmt;

use log::trace;

use crate::config::NestConfig;
use crate::types::{Direction, Rect, RoomId, RoomKind};

use super::model::{GenerationStats, NestGraph, Room, SpawnPoint};
use super::overlap::OverlapIndex;
use super::random::RandomSource;
use super::spawns::allocate_spawn_points;

/// Why a branch attempt was abandoned. Recovered locally and never surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlacementRejected {
    Corridor,
    Room,
}

impl fmt::Display for PlacementRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corridor => f.write_str("corridor overlaps existing geometry"),
            Self::Room => f.write_str("room overlaps existing geometry"),
        }
    }
}

pub(super) struct RoomLayout {
    pub(super) graph: NestGraph,
    pub(super) spawn_points: Vec<SpawnPoint>,
    pub(super) stats: GenerationStats,
}

/// Owns the room arena while the nest grows. Overlap queries and spawn
/// allocation borrow the arena read-only between mutations.
pub(super) struct RoomGraphBuilder<'a> {
    config: &'a NestConfig,
    rooms: Vec<Room>,
    spawn_points: Vec<SpawnPoint>,
    stats: GenerationStats,
}

impl<'a> RoomGraphBuilder<'a> {
    pub(super) fn new(config: &'a NestConfig) -> Self {
        Self {
            config,
            rooms: Vec::new(),
            spawn_points: Vec::new(),
            stats: GenerationStats::default(),
        }
    }

    pub(super) fn build<R: RandomSource>(mut self, random: &mut R) -> RoomLayout {
        let size = self.config.room_max_size;
        let queen = self.push_room(Rect::new(0.0, 0.0, size, size), RoomKind::Queen, 0);
        self.expand(queen, random);

        RoomLayout {
            graph: NestGraph::from_rooms(self.rooms),
            spawn_points: self.spawn_points,
            stats: self.stats,
        }
    }

    fn expand<R: RandomSource>(&mut self, room_id: RoomId, random: &mut R) {
        let depth = self.rooms[room_id.index()].depth;
        if depth >= self.config.max_depth {
            return;
        }

        let mut directions = Direction::ALL;
        random.shuffle(&mut directions);
        let probability = self.config.branch_probability_at(depth);

        for direction in directions {
            if random.unit() >= probability {
                continue;
            }
            self.stats.branch_attempts += 1;
            match self.try_branch(room_id, direction, random) {
                Ok(child) => self.expand(child, random),
                Err(rejection) => {
                    match rejection {
                        PlacementRejected::Corridor => self.stats.rejected_corridors += 1,
                        PlacementRejected::Room => self.stats.rejected_rooms += 1,
                    }
                    trace!("branch {direction:?} from room {} abandoned: {rejection}", room_id.0);
                }
            }
        }
    }

    /// Places a corridor and the room at its far end, or neither.
    fn try_branch<R: RandomSource>(
        &mut self,
        parent_id: RoomId,
        direction: Direction,
        random: &mut R,
    ) -> Result<RoomId, PlacementRejected> {
        let parent = self.rooms[parent_id.index()].rect;
        let parent_depth = self.rooms[parent_id.index()].depth;
        let padding = self.config.overlap_padding();

        let length =
            random.range_f64(self.config.corridor_min_length, self.config.corridor_max_length);
        let corridor = corridor_rect(parent, direction, length, self.config.corridor_width);
        if OverlapIndex::new(&self.rooms, padding).overlaps(&corridor, &[parent_id]) {
            return Err(PlacementRejected::Corridor);
        }

        let width = random.range_f64(self.config.room_min_size, self.config.room_max_size);
        let height = random.range_f64(self.config.room_min_size, self.config.room_max_size);
        let room = room_rect(corridor, direction, width, height);
        // The corridor is not in the arena yet, so it is implicitly excluded here.
        if OverlapIndex::new(&self.rooms, padding).overlaps(&room, &[]) {
            return Err(PlacementRejected::Room);
        }

        let corridor_id = self.push_room(corridor, RoomKind::Corridor, parent_depth);
        let child_id = self.push_room(room, RoomKind::Normal, parent_depth + 1);
        self.connect(parent_id, corridor_id);
        self.connect(corridor_id, child_id);

        let inset = self.config.spawn_inset();
        let points = allocate_spawn_points(&self.rooms[child_id.index()], inset, random);
        self.spawn_points.extend(points);
        Ok(child_id)
    }

    fn push_room(&mut self, rect: Rect, kind: RoomKind, depth: u32) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room { id, rect, kind, depth, connections: Vec::new() });
        id
    }

    fn connect(&mut self, a: RoomId, b: RoomId) {
        self.rooms[a.index()].connections.push(b);
        self.rooms[b.index()].connections.push(a);
    }
}

/// Corridor leaving `parent` through the middle of the side facing `direction`.
fn corridor_rect(parent: Rect, direction: Direction, length: f64, corridor_width: f64) -> Rect {
    let center = parent.center();
    let top = center.y - corridor_width / 2.0;
    let left = center.x - corridor_width / 2.0;
    match direction {
        Direction::Right => Rect::new(parent.right(), top, length, corridor_width),
        Direction::Left => Rect::new(parent.x - length, top, length, corridor_width),
        Direction::Down => Rect::new(left, parent.bottom(), corridor_width, length),
        Direction::Up => Rect::new(left, parent.y - length, corridor_width, length),
    }
}

/// Room centered on the corridor's axis, flush against its far end.
fn room_rect(corridor: Rect, direction: Direction, width: f64, height: f64) -> Rect {
    let center = corridor.center();
    match direction {
        Direction::Right => Rect::new(corridor.right(), center.y - height / 2.0, width, height),
        Direction::Left => Rect::new(corridor.x - width, center.y - height / 2.0, width, height),
        Direction::Down => Rect::new(center.x - width / 2.0, corridor.bottom(), width, height),
        Direction::Up => Rect::new(center.x - width / 2.0, corridor.y - height, width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nestgen::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn corridors_attach_to_the_middle_of_each_side() {
        let parent = Rect::new(0.0, 0.0, 400.0, 400.0);
        let corridor = |direction, length| corridor_rect(parent, direction, length, 64.0);
        assert_eq!(corridor(Direction::Right, 150.0), Rect::new(400.0, 168.0, 150.0, 64.0));
        assert_eq!(corridor(Direction::Left, 150.0), Rect::new(-150.0, 168.0, 150.0, 64.0));
        assert_eq!(corridor(Direction::Down, 100.0), Rect::new(168.0, 400.0, 64.0, 100.0));
        assert_eq!(corridor(Direction::Up, 100.0), Rect::new(168.0, -100.0, 64.0, 100.0));
    }

    #[test]
    fn rooms_center_on_the_corridor_axis() {
        let cases = [
            (Rect::new(400.0, 168.0, 150.0, 64.0), Direction::Right, 300.0, 200.0),
            (Rect::new(-150.0, 168.0, 150.0, 64.0), Direction::Left, 300.0, 200.0),
            (Rect::new(168.0, 400.0, 64.0, 100.0), Direction::Down, 300.0, 250.0),
            (Rect::new(168.0, -100.0, 64.0, 100.0), Direction::Up, 200.0, 250.0),
        ];
        let expected = [
            Rect::new(550.0, 100.0, 300.0, 200.0),
            Rect::new(-450.0, 100.0, 300.0, 200.0),
            Rect::new(50.0, 500.0, 300.0, 250.0),
            Rect::new(100.0, -350.0, 200.0, 250.0),
        ];
        for ((corridor, direction, width, height), expected) in cases.into_iter().zip(expected) {
            assert_eq!(room_rect(corridor, direction, width, height), expected, "{direction:?}");
        }
    }

    #[test]
    fn zero_depth_limit_stops_at_the_queen() {
        let config = NestConfig { max_depth: 0, ..NestConfig::default() };
        let mut random = ScriptedRandom::new(Vec::<f64>::new());
        let layout = RoomGraphBuilder::new(&config).build(&mut random);

        assert_eq!(layout.graph.len(), 1);
        assert_eq!(layout.graph.queen().rect, Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(layout.stats, GenerationStats::default());
    }

    #[test]
    fn failed_room_discards_its_corridor_without_consuming_ids() {
        let config = NestConfig { max_depth: 2, ..NestConfig::default() };
        let mut random = ScriptedRandom::new([
            // queen: identity shuffle, then a rightward branch with minimum sizes
            0.99, 0.99, 0.99, 0.0, 0.0, 0.0, 0.0, 0.0,
            // child: identity shuffle, skip right, left corridor hits the queen,
            // skip down, up corridor fits but its room would touch the queen
            0.99, 0.99, 0.99, 0.9, 0.0, 0.0, 0.9, 0.0, 0.0, 0.75, 0.0,
            // queen: skip left, down, up
            0.9, 0.9, 0.9,
        ]);
        let layout = RoomGraphBuilder::new(&config).build(&mut random);

        assert_eq!(random.remaining(), 0);
        let ids: Vec<RoomId> = layout.graph.rooms().iter().map(|room| room.id).collect();
        assert_eq!(ids, vec![RoomId(0), RoomId(1), RoomId(2)]);
        assert_eq!(layout.graph.rooms()[1].rect, Rect::new(400.0, 168.0, 100.0, 64.0));
        assert_eq!(layout.graph.rooms()[2].rect, Rect::new(500.0, 100.0, 200.0, 200.0));
        assert_eq!(
            layout.stats,
            GenerationStats { branch_attempts: 3, rejected_corridors: 1, rejected_rooms: 1 }
        );
        assert!(layout.spawn_points.is_empty());
    }

    #[test]
    fn branches_never_exceed_the_depth_limit() {
        let config = NestConfig {
            max_depth: 3,
            branch_probability: 1.0,
            depth_decay: 0.0,
            ..NestConfig::default()
        };
        for seed in 0..20 {
            let layout = RoomGraphBuilder::new(&config).build(&mut SeededRandom::new(seed));
            assert!(layout.graph.rooms().iter().all(|room| room.depth <= 3));
        }
    }
}
