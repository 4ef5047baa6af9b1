/// Rook movement
/// Slides horizontally and vertically (orthogonally)
use crate::board::{Board, Color, Piece, Square};
use crate::pieces::{can_land_on, path_is_clear};

pub struct RookMoves;

impl RookMoves {
    /// Rook slides along its row or column until the first piece
    pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
        let dc = target.0 - piece.column();
        let dr = target.1 - piece.row();

        // Same row or column, and actually moving
        if (dc != 0 && dr != 0) || (dc == 0 && dr == 0) {
            return false;
        }

        path_is_clear(board, piece.square(), target) && can_land_on(board, player, target)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
