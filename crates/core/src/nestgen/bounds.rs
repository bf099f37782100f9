//! World bounds: the padded rectangle enclosing all placed geometry.

use crate::error::NestError;
use crate::types::Rect;

use super::model::{Room, WorldBounds};

pub fn compute_bounds(rooms: &[Room], padding: f64) -> Result<WorldBounds, NestError> {
    let Some((first, rest)) = rooms.split_first() else {
        return Err(NestError::EmptyGraph);
    };
    Ok(enclosing_bounds(first.rect, rest.iter().map(|room| room.rect), padding))
}

pub(super) fn enclosing_bounds(
    first: Rect,
    rest: impl Iterator<Item = Rect>,
    padding: f64,
) -> WorldBounds {
    let (min_x, min_y, max_x, max_y) = rest.fold(
        (first.x, first.y, first.right(), first.bottom()),
        |(min_x, min_y, max_x, max_y), rect| {
            (
                min_x.min(rect.x),
                min_y.min(rect.y),
                max_x.max(rect.right()),
                max_y.max(rect.bottom()),
            )
        },
    );
    WorldBounds {
        min_x: min_x - padding,
        min_y: min_y - padding,
        width: max_x - min_x + padding * 2.0,
        height: max_y - min_y + padding * 2.0,
    }
}
