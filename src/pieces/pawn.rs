/// Pawn movement: one step forward onto an empty square, two from the
/// starting row, or one diagonal step forward to capture.
use crate::board::{Board, Color, Piece, Square};
use crate::pieces::path_is_clear;

pub struct PawnMoves;

impl PawnMoves {
    /// Whether the pawn may move to `target` for `player`
    pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
        let direction = player.forward();
        let dc = target.0 - piece.column();
        let dr = target.1 - piece.row();

        if dc == 0 {
            if dr == direction {
                return board.piece_at(target).is_none();
            }
            // Double step, only from the starting row
            if piece.row() == player.pawn_row() && dr == 2 * direction {
                return board.piece_at(target).is_none()
                    && path_is_clear(board, piece.square(), target);
            }
            return false;
        }

        // Diagonal steps are captures only
        if dc.abs() == 1 && dr == direction {
            return matches!(board.piece_at(target), Some(p) if p.owner() != player);
        }

        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
