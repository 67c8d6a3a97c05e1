//! Collision resolver - the one predicate between a piece and the field.

use crate::core::board::Board;
use crate::core::piece::Piece;

/// Would `piece` collide if placed with its anchor at (`x`, `y`) in the
/// given orientation?
///
/// True as soon as one occupied cell leaves the field or lands on a
/// settled block. The test short-circuits, and bounds are checked before
/// occupancy, so the board is never probed outside its own grid.
pub fn would_collide(board: &Board, piece: &Piece, x: i32, y: i32, orientation: u8) -> bool {
    piece
        .cells_at(x, y, orientation)
        .any(|(cx, cy)| !board.in_bounds(cx, cy) || board.is_occupied(cx, cy))
}
