//! Error types surfaced by nest generation.

use thiserror::Error;

use crate::types::{RoomId, TileKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    #[error("cannot compute world bounds of an empty nest")]
    EmptyGraph,

    #[error("invalid nest config: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// A structural property of a generated nest that does not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("expected exactly one queen room at depth 0, found {found}")]
    QueenCount { found: usize },

    #[error("room {room:?} has id {found:?} at that position in the arena")]
    IdOrder { room: RoomId, found: RoomId },

    #[error("corridor {corridor:?} has {found} connections instead of 2")]
    CorridorConnections { corridor: RoomId, found: usize },

    #[error("connection {from:?} -> {to:?} is not mirrored or points outside the nest")]
    DanglingConnection { from: RoomId, to: RoomId },

    #[error("room {room:?} has depth {found}, expected {expected}")]
    Depth { room: RoomId, expected: u32, found: u32 },

    #[error("room {room:?} is unreachable from the queen or closes a cycle")]
    NotATree { room: RoomId },

    #[error("rooms {first:?} and {second:?} overlap within the padding")]
    Overlap { first: RoomId, second: RoomId },

    #[error("spawn point {index} belongs to {room:?}, which is not a normal room")]
    SpawnInWrongRoom { index: usize, room: RoomId },

    #[error("spawn point {index} lies outside the inset interior of {room:?}")]
    SpawnOutsideInterior { index: usize, room: RoomId },

    #[error("grid is {found_width}x{found_height}, expected {expected_width}x{expected_height}")]
    GridSize {
        expected_width: usize,
        expected_height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("grid holds {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },

    #[error("tile ({col}, {row}) is {found:?} but the geometry says otherwise")]
    GridMismatch { col: usize, row: usize, found: TileKind },
}
