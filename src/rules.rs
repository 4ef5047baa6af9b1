// Legality engine
// Decides whether a displacement is legal, whether a square is attacked,
// and whether a King still has somewhere to go.

use log::trace;

use crate::board::{on_board, Board, Color, Piece, PieceType, Square, BOARD_SIZE};
use crate::pieces::bishop::BishopMoves;
use crate::pieces::king::KingMoves;
use crate::pieces::knight::KnightMoves;
use crate::pieces::pawn::PawnMoves;
use crate::pieces::queen::QueenMoves;
use crate::pieces::rook::RookMoves;

/// Why a legality question is being asked.
///
/// `Move` is a real move request. `Attack` is asked on behalf of
/// `is_under_attack`, where a King is not required to be safe on the square
/// it reaches.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Probe {
    Move,
    Attack,
}

/// Whether `piece` may move to `target` on behalf of `player`
pub fn is_legal(board: &Board, piece: &Piece, player: Color, target: Square) -> bool {
    check(board, piece, player, target, Probe::Move)
}

fn check(board: &Board, piece: &Piece, player: Color, target: Square, probe: Probe) -> bool {
    if !on_board(target) {
        return false;
    }

    // Only knights leave straight lines and diagonals
    let dc = target.0 - piece.column();
    let dr = target.1 - piece.row();
    if piece.kind() != PieceType::Knight && dc != 0 && dr != 0 && dc.abs() != dr.abs() {
        trace!("{} to {:?} rejected: not a line", piece.id(), target);
        return false;
    }

    match piece.kind() {
        PieceType::Pawn => PawnMoves::is_legal(board, piece, player, target),
        PieceType::Knight => KnightMoves::is_legal(board, piece, player, target),
        PieceType::Bishop => BishopMoves::is_legal(board, piece, player, target),
        PieceType::Rook => RookMoves::is_legal(board, piece, player, target),
        PieceType::Queen => QueenMoves::is_legal(board, piece, player, target),
        PieceType::King => KingMoves::is_legal(board, piece, player, target, probe),
    }
}

/// Check if a square is attacked by any piece not owned by `player`
pub fn is_under_attack(board: &Board, player: Color, target: Square) -> bool {
    board
        .pieces()
        .iter()
        .filter(|p| p.owner() != player)
        .any(|p| check(board, p, p.owner(), target, Probe::Attack))
}

/// Whether the King is safe where it stands or has a free, unattacked
/// neighbouring square.
///
/// Neighbours holding a friendly piece or either King count as blocked.
/// Defenders that could capture or block the attacker are not considered.
pub fn has_escape_squares(board: &Board, king: &Piece) -> bool {
    let owner = king.owner();
    if !is_under_attack(board, owner, king.square()) {
        return true;
    }

    let (kc, kr) = king.square();
    let mut neighbours = 0;
    let mut unavailable = 0;

    for column in (kc - 1).max(0)..=(kc + 1).min(BOARD_SIZE - 1) {
        for row in (kr - 1).max(0)..=(kr + 1).min(BOARD_SIZE - 1) {
            let square = (column, row);
            if square == king.square() {
                continue;
            }
            neighbours += 1;

            let blocked = match board.piece_at(square) {
                Some(p) => p.owner() == owner || p.kind() == PieceType::King,
                None => false,
            };
            if blocked || is_under_attack(board, owner, square) {
                unavailable += 1;
            }
        }
    }

    unavailable < neighbours
}

/// All squares `piece` may legally move to for its owner
pub fn legal_targets(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut targets = Vec::new();
    for column in 0..BOARD_SIZE {
        for row in 0..BOARD_SIZE {
            if is_legal(board, piece, piece.owner(), (column, row)) {
                targets.push((column, row));
            }
        }
    }
    targets
}

// =============================================================================
// Unit Tests
// =============================================================================
