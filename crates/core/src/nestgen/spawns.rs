//! Collectible spawn-point allocation for placed rooms.

use crate::types::{Point, RoomKind};

use super::model::{Room, SpawnPoint};
use super::random::RandomSource;

/// Every normal room rolls up to this many extra points on top of its depth share.
const EXTRA_SPAWN_ROLL: usize = 3;

/// Scatters spawn points inside normal rooms. Queen and corridor rooms get none.
pub(super) fn allocate_spawn_points<R: RandomSource>(
    room: &Room,
    inset: f64,
    random: &mut R,
) -> Vec<SpawnPoint> {
    if room.kind != RoomKind::Normal {
        return Vec::new();
    }

    let count = room.depth as usize / 2 + random.range_usize(0, EXTRA_SPAWN_ROLL);
    let interior = room.rect.expanded(-inset);
    (0..count)
        .map(|_| {
            let x = random.range_f64(interior.x, interior.right());
            let y = random.range_f64(interior.y, interior.bottom());
            let pos = Point {
                x: strictly_between(x, interior.x, interior.right()),
                y: strictly_between(y, interior.y, interior.bottom()),
            };
            SpawnPoint { pos, room: room.id, depth: room.depth }
        })
        .collect()
}

/// Pulls a sample off the interval edges: a draw of exactly `low` (or a sum
/// that rounds up to `high`) moves one ulp inward.
fn strictly_between(value: f64, low: f64, high: f64) -> f64 {
    value.max(low.next_up()).min(high.next_down())
}
