// Movement rules, one namespace per piece type

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use crate::board::{Board, Color, Square};

/// Whether `player` may finish a move on `target`: empty, or holding a rival piece
pub(crate) fn can_land_on(board: &Board, player: Color, target: Square) -> bool {
    match board.piece_at(target) {
        None => true,
        Some(p) => p.owner() != player,
    }
}

/// Whether nothing stands strictly between `from` and `to`
pub(crate) fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    matches!(board.find_first_piece_along_line(from, to), Ok(None))
}
