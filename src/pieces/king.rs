/// Here we define the movement of the almighty King !!
/// One step in any direction, never onto an attacked square and never
/// onto the rival King.
use crate::board::{Board, Color, Piece, PieceType, Square};
use crate::rules::{is_under_attack, Probe};

/// KingMoves is an Unit Struct, namespace to group related functions together.
pub struct KingMoves;

impl KingMoves {
    /// Whether the King may step to `target`.
    ///
    /// Under `Probe::Attack` the King only has to reach the square: a King
    /// controls its neighbours whether or not it could safely stand there.
    /// This keeps the attack query from bouncing between two Kings forever.
    pub fn is_legal(
        board: &Board,
        piece: &Piece,
        player: Color,
        target: Square,
        probe: Probe,
    ) -> bool {
        let dc = (target.0 - piece.column()).abs();
        let dr = (target.1 - piece.row()).abs();
        if dc > 1 || dr > 1 {
            return false;
        }

        // Kings never capture Kings
        let landing = match board.piece_at(target) {
            None => true,
            Some(p) => p.owner() != player && p.kind() != PieceType::King,
        };
        if !landing {
            return false;
        }

        match probe {
            Probe::Move => !is_under_attack(board, player, target),
            Probe::Attack => true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
