/// Queen movement: a bishop or a rook move
use crate::board::{Board, Color, Piece, Square};
use crate::pieces::bishop::BishopMoves;
use crate::pieces::rook::RookMoves;

pub struct QueenMoves;

impl QueenMoves {
    pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
        BishopMoves::is_legal(board, piece, player, target)
            || RookMoves::is_legal(board, piece, player, target)
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
    fn test_queen_combines_rook_and_bishop() {
        let mut board = Board::new();
        let queen = Piece::new(0, Color::Black, PieceType::Queen, (3, 3));
        board.add_piece(queen, (3, 3)).unwrap();
        board
            .add_piece(Piece::new(0, Color::White, PieceType::Pawn, (5, 5)), (5, 5))
            .unwrap();

        assert!(QueenMoves::is_legal(&board, &queen, Color::Black, (3, 7)), "Straight");
        assert!(QueenMoves::is_legal(&board, &queen, Color::Black, (0, 0)), "Diagonal");
        assert!(QueenMoves::is_legal(&board, &queen, Color::Black, (5, 5)), "Capture");
        assert!(!QueenMoves::is_legal(&board, &queen, Color::Black, (6, 6)), "Blocked");
        assert!(!QueenMoves::is_legal(&board, &queen, Color::Black, (4, 5)), "Knight jump");
    }
}
