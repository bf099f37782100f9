//! Padding-aware overlap queries against already-placed geometry.

use crate::types::{Rect, RoomId};

use super::model::Room;

/// Read-only view over the room arena. A linear scan is enough: a nest holds
/// at most a few dozen rectangles.
pub(super) struct OverlapIndex<'a> {
    rooms: &'a [Room],
    padding: f64,
}

impl<'a> OverlapIndex<'a> {
    pub(super) fn new(rooms: &'a [Room], padding: f64) -> Self {
        Self { rooms, padding }
    }

    /// True when `candidate`, grown by the padding on every side, touches any
    /// placed rectangle other than those in `exclude`.
    pub(super) fn overlaps(&self, candidate: &Rect, exclude: &[RoomId]) -> bool {
        let padded = candidate.expanded(self.padding);
        self.rooms
            .iter()
            .filter(|room| !exclude.contains(&room.id))
            .any(|room| padded.intersects(&room.rect))
    }
}
