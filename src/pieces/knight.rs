/// Knight movement: the (2,1) leap, the only piece that jumps over others
use crate::board::{Board, Color, Piece, Square};
use crate::pieces::can_land_on;

pub struct KnightMoves;

impl KnightMoves {
    pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
        let dc = (target.0 - piece.column()).abs();
        let dr = (target.1 - piece.row()).abs();

        matches!((dc, dr), (2, 1) | (1, 2)) && can_land_on(board, player, target)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceType;

    #[test]
    fn test_knight_leaps() {
        let mut board = Board::new();
        let knight = Piece::new(0, Color::White, PieceType::Knight, (1, 0));
        board.add_piece(knight, (1, 0)).unwrap();

        for target in [(0, 2), (2, 2), (3, 1)] {
            assert!(
                KnightMoves::is_legal(&board, &knight, Color::White, target),
                "Knight should reach {:?}",
                target
            );
        }
        assert!(!KnightMoves::is_legal(&board, &knight, Color::White, (1, 2)));
        assert!(!KnightMoves::is_legal(&board, &knight, Color::White, (2, 1)));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut board = Board::setup_standard().unwrap();
        let knight = *board.piece_at((1, 0)).unwrap();

        assert!(KnightMoves::is_legal(&board, &knight, Color::White, (2, 2)));
        assert!(!KnightMoves::is_legal(&board, &knight, Color::White, (3, 1)), "Own pawn on d2");

        // Rival piece on the landing square
        let pawn = board.piece_at((3, 1)).unwrap().id();
        board
            .apply_move(&crate::board::Displacement::new(pawn, Color::White, (3, 3)))
            .unwrap();
        let rook = Piece::new(5, Color::Black, PieceType::Rook, (3, 1));
        board.add_piece(rook, (3, 1)).unwrap();
        assert!(KnightMoves::is_legal(&board, &knight, Color::White, (3, 1)));
    }
}
