/// Bishop movement: any distance along a diagonal, never through a piece
use crate::board::{Board, Color, Piece, Square};
use crate::pieces::{can_land_on, path_is_clear};

pub struct BishopMoves;

impl BishopMoves {
    pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
        let dc = target.0 - piece.column();
        let dr = target.1 - piece.row();

        if dr == 0 || dr.abs() != dc.abs() {
            return false;
        }

        path_is_clear(board, piece.square(), target) && can_land_on(board, player, target)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
