// Board representation and piece identity
// Mailbox (8x8 array) of piece ids plus a flat registry of the live pieces

use log::debug;

use crate::error::BoardError;

// =============================================================================
// Type Definitions
// =============================================================================

/// Square coordinate (column, row) where both are 0-7
/// Column 0 = file a, Column 7 = file h
/// Row 0 = rank 1 (first player's back rank)
/// Row 7 = rank 8 (second player's back rank)
///
/// Signed so that callers can describe off-board targets, which the rules
/// simply reject.
pub type Square = (i8, i8);

/// Number of columns and rows on the board.
pub const BOARD_SIZE: i8 = 8;

/// Whether a square lies on the 8x8 board
pub fn on_board(square: Square) -> bool {
    (0..BOARD_SIZE).contains(&square.0) && (0..BOARD_SIZE).contains(&square.1)
}

/// Color of a piece, which also identifies its owner.
/// The first player (id 0) always plays White.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Numeric player id: 0 for the first player, 1 for the second
    pub fn index(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn from_index(id: u8) -> Option<Color> {
        match id {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }

    /// Row direction in which this side's pawns advance
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row holding this side's pawns at the start of a match
    pub fn pawn_row(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row holding this side's king at the start of a match
    pub fn back_row(&self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// Type of a chess piece
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Knight,
    Bishop,
    Pawn,
}

impl PieceType {
    /// Upper-case letter used for this type on the board display
    pub fn symbol(&self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Pawn => 'P',
        }
    }

    /// Type of the piece that starts on `column` of a back row
    pub fn for_back_row_column(column: i8) -> Option<PieceType> {
        match column {
            0 | 7 => Some(PieceType::Rook),
            1 | 6 => Some(PieceType::Knight),
            2 | 5 => Some(PieceType::Bishop),
            3 => Some(PieceType::Queen),
            4 => Some(PieceType::King),
            _ => None,
        }
    }
}

/// Stable identity of a piece for the whole match.
///
/// Built from the owner, the type and a disambiguating index. A side has
/// exactly one king, so the king's index is always 0 and is left out of the
/// printed form.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PieceId {
    pub owner: Color,
    pub kind: PieceType,
    pub index: u8,
}

impl PieceId {
    pub fn new(owner: Color, kind: PieceType, index: u8) -> Self {
        let index = if kind == PieceType::King { 0 } else { index };
        PieceId { owner, kind, index }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PieceType::King => write!(f, "{:?}-{:?}", self.owner, self.kind),
            _ => write!(f, "{:?}-{:?}-{}", self.owner, self.kind, self.index),
        }
    }
}

/// A chess piece: immutable identity plus its current square.
/// Only the board moves a piece once it has been placed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    id: PieceId,
    column: i8,
    row: i8,
}

impl Piece {
    /// Create a new piece standing on `square`
    pub fn new(index: u8, owner: Color, kind: PieceType, square: Square) -> Self {
        Piece {
            id: PieceId::new(owner, kind, index),
            column: square.0,
            row: square.1,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn owner(&self) -> Color {
        self.id.owner
    }

    pub fn kind(&self) -> PieceType {
        self.id.kind
    }

    pub fn column(&self) -> i8 {
        self.column
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn square(&self) -> Square {
        (self.column, self.row)
    }
}

/// One of the two competitors; the color identifies the player
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Player {
    color: Color,
    name: String,
}

impl Player {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Player {
            color,
            name: name.into(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A candidate move: which piece, who asks for it, and where it should go
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Displacement {
    pub piece: PieceId,
    pub player: Color,
    pub target: Square,
}

impl Displacement {
    pub fn new(piece: PieceId, player: Color, target: Square) -> Self {
        Displacement {
            piece,
            player,
            target,
        }
    }
}

// =============================================================================
// Board Structure
// =============================================================================

/// Chess board using Mailbox representation (8x8 array)
///
/// - cells[column][row] holds the id of the piece standing there
/// - pieces is the registry of live pieces, in placement order
///
/// A piece is either in the registry and in the cell matching its own
/// coordinates, or in neither.
pub struct Board {
    cells: [[Option<PieceId>; 8]; 8],
    pieces: Vec<Piece>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; 8]; 8],
            pieces: Vec::with_capacity(32),
        }
    }

    /// Setup the standard starting position for both players
    pub fn setup_standard() -> Result<Self, BoardError> {
        let mut board = Board::new();

        for color in [Color::White, Color::Black] {
            let pawn_row = color.pawn_row();
            let back_row = color.back_row();

            for column in 0..BOARD_SIZE {
                // Pawns are numbered by their starting column
                let pawn = Piece::new(column as u8, color, PieceType::Pawn, (column, pawn_row));
                board.add_piece(pawn, (column, pawn_row))?;

                // Back row pieces: 0 on the queen side, 1 on the king side
                let kind = PieceType::for_back_row_column(column)
                    .ok_or(BoardError::OutOfRange { column, row: back_row })?;
                let piece = Piece::new((column / 4) as u8, color, kind, (column, back_row));
                board.add_piece(piece, (column, back_row))?;
            }
        }

        Ok(board)
    }

    /// Get the piece id stored in a cell
    ///
    /// Off-board coordinates are a caller bug, reported as an error.
    pub fn cell(&self, square: Square) -> Result<Option<PieceId>, BoardError> {
        if !on_board(square) {
            return Err(BoardError::OutOfRange {
                column: square.0,
                row: square.1,
            });
        }
        Ok(self.cells[square.0 as usize][square.1 as usize])
    }

    /// Get the piece at a given square, None if empty or off the board
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        match self.cell(square) {
            Ok(Some(id)) => self.piece(id),
            _ => None,
        }
    }

    /// Look up a live piece by id
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// All live pieces, in placement order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Place a piece on an empty cell
    pub fn add_piece(&mut self, piece: Piece, square: Square) -> Result<(), BoardError> {
        if self.cell(square)?.is_some() {
            return Err(BoardError::CellOccupied {
                column: square.0,
                row: square.1,
            });
        }

        let piece = Piece {
            column: square.0,
            row: square.1,
            ..piece
        };
        self.cells[square.0 as usize][square.1 as usize] = Some(piece.id);
        self.pieces.push(piece);
        Ok(())
    }

    /// Execute a displacement, returns the captured piece if any
    ///
    /// The displacement must already have been judged legal, so an unknown
    /// piece or a capture of a friendly piece is an error.
    pub fn apply_move(&mut self, mv: &Displacement) -> Result<Option<Piece>, BoardError> {
        let (column, row) = mv.target;
        let target = self.cell(mv.target)?;

        let mover = *self.piece(mv.piece).ok_or(BoardError::UnknownPiece(mv.piece))?;

        let captured = match target {
            Some(target_id) => {
                if target_id.owner == mover.owner() {
                    return Err(BoardError::FriendlyCapture { column, row });
                }
                let idx = self
                    .pieces
                    .iter()
                    .position(|p| p.id == target_id)
                    .ok_or(BoardError::UnknownPiece(target_id))?;
                let captured = self.pieces.remove(idx);
                debug!("{} captures {} on ({}, {})", mover.id, captured.id, column, row);
                Some(captured)
            }
            None => None,
        };

        self.cells[mover.column as usize][mover.row as usize] = None;
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.id == mv.piece) {
            piece.column = column;
            piece.row = row;
        }
        self.cells[column as usize][row as usize] = Some(mv.piece);

        Ok(captured)
    }

    /// Find the first piece strictly between `from` and `to`
    ///
    /// The line must be straight (same column or row) or diagonal. Neither
    /// end square is inspected.
    pub fn find_first_piece_along_line(
        &self,
        from: Square,
        to: Square,
    ) -> Result<Option<&Piece>, BoardError> {
        // Validate both ends
        self.cell(from)?;
        self.cell(to)?;

        let dc = to.0 - from.0;
        let dr = to.1 - from.1;
        if dc != 0 && dr != 0 && dc.abs() != dr.abs() {
            return Err(BoardError::NotALine { from, to });
        }

        let step = (dc.signum(), dr.signum());
        let mut current = (from.0 + step.0, from.1 + step.1);
        while current != to && step != (0, 0) {
            if let Some(piece) = self.piece_at(current) {
                return Ok(Some(piece));
            }
            current = (current.0 + step.0, current.1 + step.1);
        }

        Ok(None)
    }

    /// Find the live King of the given color
    pub fn find_king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind() == PieceType::King && p.owner() == color)
    }
}

// =============================================================================
// Default Implementation
// =============================================================================

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "  +-+-+-+-+-+-+-+")?;

        for row in (0..BOARD_SIZE).rev() {
            let rank = row + 1;
            write!(f, "{} ", rank)?;

            for column in 0..BOARD_SIZE {
                let piece_char = match self.piece_at((column, row)) {
                    None => '.',
                    Some(piece) => {
                        let c = piece.kind().symbol();
                        // Lowercase for black pieces
                        if piece.owner() == Color::Black {
                            c.to_ascii_lowercase()
                        } else {
                            c
                        }
                    }
                };
                write!(f, "{} ", piece_char)?;
            }
            writeln!(f, "| {}", rank)?;
        }

        writeln!(f, "  +-+-+-+-+-+-+-+")?;
        writeln!(f, "  a b c d e f g h")?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every registered piece sits in the cell matching its own coordinates,
    /// and every occupied cell refers to a registered piece.
    pub(crate) fn assert_consistent(board: &Board) {
        for piece in board.pieces() {
            assert_eq!(
                board.cell(piece.square()).unwrap(),
                Some(piece.id()),
                "{} is not in its own cell",
                piece.id()
            );
        }
        let occupied = (0..8)
            .flat_map(|c| (0..8).map(move |r| (c, r)))
            .filter(|&sq| board.cell(sq).unwrap().is_some())
            .count();
        assert_eq!(occupied, board.pieces().len());
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::from_index(Color::Black.index()), Some(Color::Black));
        assert_eq!(Color::from_index(2), None);
    }

    #[test]
    fn test_piece_id_display() {
        let king = PieceId::new(Color::White, PieceType::King, 3);
        assert_eq!(king.index, 0, "King index is always 0");
        assert_eq!(king.to_string(), "White-King");

        let rook = PieceId::new(Color::Black, PieceType::Rook, 1);
        assert_eq!(rook.to_string(), "Black-Rook-1");
    }

    #[test]
    fn test_board_empty() {
        let board = Board::new();

        for column in 0..8 {
            for row in 0..8 {
                assert_eq!(board.piece_at((column, row)), None);
            }
        }
        assert!(board.pieces().is_empty());
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::new();
        assert_eq!(
            board.cell((8, 0)),
            Err(BoardError::OutOfRange { column: 8, row: 0 })
        );
        assert!(board.cell((0, -1)).is_err());
        assert_eq!(board.piece_at((-1, 3)), None, "Off-board lookup is simply empty");
    }

    #[test]
    fn test_add_piece() {
        let mut board = Board::new();
        let rook = Piece::new(0, Color::White, PieceType::Rook, (0, 0));

        board.add_piece(rook, (3, 4)).unwrap();

        let placed = board.piece_at((3, 4)).expect("Rook should be on (3, 4)");
        assert_eq!(placed.square(), (3, 4), "Position follows the cell it was added to");
        assert_eq!(board.pieces().len(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_add_piece_rejects_occupied_and_off_board() {
        let mut board = Board::new();
        board
            .add_piece(Piece::new(0, Color::White, PieceType::Rook, (0, 0)), (0, 0))
            .unwrap();

        let err = board.add_piece(Piece::new(1, Color::White, PieceType::Rook, (0, 0)), (0, 0));
        assert_eq!(err, Err(BoardError::CellOccupied { column: 0, row: 0 }));

        let err = board.add_piece(Piece::new(1, Color::White, PieceType::Rook, (9, 0)), (9, 0));
        assert_eq!(err, Err(BoardError::OutOfRange { column: 9, row: 0 }));

        assert_eq!(board.pieces().len(), 1, "Failed additions leave no trace");
        assert_consistent(&board);
    }

    #[test]
    fn test_standard_setup() {
        let board = Board::setup_standard().unwrap();

        assert_eq!(board.pieces().len(), 32);
        assert_consistent(&board);

        let white_king = board.find_king(Color::White).expect("White king");
        assert_eq!(white_king.square(), (4, 0));
        let black_king = board.find_king(Color::Black).expect("Black king");
        assert_eq!(black_king.square(), (4, 7));

        let queen = board.piece_at((3, 7)).unwrap();
        assert_eq!(queen.kind(), PieceType::Queen);
        assert_eq!(queen.owner(), Color::Black);

        for column in 0..8 {
            assert_eq!(board.piece_at((column, 1)).unwrap().kind(), PieceType::Pawn);
            assert_eq!(board.piece_at((column, 6)).unwrap().owner(), Color::Black);
            assert!(board.piece_at((column, 3)).is_none());
        }

        // Rooks are told apart by index
        assert_eq!(board.piece_at((0, 0)).unwrap().id().index, 0);
        assert_eq!(board.piece_at((7, 0)).unwrap().id().index, 1);
    }

    #[test]
    fn test_apply_move_basic() {
        let mut board = Board::new();
        let knight = Piece::new(0, Color::White, PieceType::Knight, (1, 0));
        board.add_piece(knight, (1, 0)).unwrap();

        let captured = board
            .apply_move(&Displacement::new(knight.id(), Color::White, (2, 2)))
            .unwrap();

        assert_eq!(captured, None);
        assert_eq!(board.piece_at((1, 0)), None, "Original square should be empty");
        assert_eq!(board.piece_at((2, 2)).unwrap().id(), knight.id());
        assert_eq!(board.piece(knight.id()).unwrap().square(), (2, 2));
        assert_consistent(&board);
    }

    #[test]
    fn test_apply_move_capture() {
        let mut board = Board::new();
        let rook = Piece::new(0, Color::White, PieceType::Rook, (0, 0));
        let pawn = Piece::new(0, Color::Black, PieceType::Pawn, (0, 5));
        board.add_piece(rook, (0, 0)).unwrap();
        board.add_piece(pawn, (0, 5)).unwrap();

        let captured = board
            .apply_move(&Displacement::new(rook.id(), Color::White, (0, 5)))
            .unwrap();

        assert_eq!(captured.map(|p| p.id()), Some(pawn.id()));
        assert!(board.piece(pawn.id()).is_none(), "Captured piece leaves the registry");
        assert_eq!(board.pieces().len(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_apply_move_invariant_violations() {
        let mut board = Board::new();
        let rook = Piece::new(0, Color::White, PieceType::Rook, (0, 0));
        let pawn = Piece::new(0, Color::White, PieceType::Pawn, (0, 1));
        board.add_piece(rook, (0, 0)).unwrap();
        board.add_piece(pawn, (0, 1)).unwrap();

        let err = board.apply_move(&Displacement::new(rook.id(), Color::White, (0, 1)));
        assert_eq!(err, Err(BoardError::FriendlyCapture { column: 0, row: 1 }));

        let ghost = PieceId::new(Color::Black, PieceType::Queen, 0);
        let err = board.apply_move(&Displacement::new(ghost, Color::Black, (4, 4)));
        assert_eq!(err, Err(BoardError::UnknownPiece(ghost)));

        assert_consistent(&board);
    }

    #[test]
    fn test_find_first_piece_along_line() {
        let mut board = Board::new();
        board
            .add_piece(Piece::new(0, Color::Black, PieceType::Pawn, (0, 0)), (0, 3))
            .unwrap();
        board
            .add_piece(Piece::new(1, Color::Black, PieceType::Pawn, (0, 0)), (3, 3))
            .unwrap();

        // Column, both directions
        let hit = board.find_first_piece_along_line((0, 0), (0, 6)).unwrap();
        assert_eq!(hit.map(|p| p.square()), Some((0, 3)));
        let hit = board.find_first_piece_along_line((0, 7), (0, 0)).unwrap();
        assert_eq!(hit.map(|p| p.square()), Some((0, 3)));

        // End square is not part of the path
        assert!(board.find_first_piece_along_line((0, 0), (0, 3)).unwrap().is_none());

        // Row and diagonal
        let hit = board.find_first_piece_along_line((7, 3), (0, 3)).unwrap();
        assert_eq!(hit.map(|p| p.square()), Some((3, 3)));
        let hit = board.find_first_piece_along_line((1, 1), (5, 5)).unwrap();
        assert_eq!(hit.map(|p| p.square()), Some((3, 3)));
        assert!(board.find_first_piece_along_line((1, 7), (7, 1)).unwrap().is_none());
    }

    #[test]
    fn test_find_first_piece_rejects_non_lines() {
        let board = Board::new();
        assert_eq!(
            board.find_first_piece_along_line((1, 0), (2, 2)).err(),
            Some(BoardError::NotALine {
                from: (1, 0),
                to: (2, 2)
            })
        );
    }

    #[test]
    fn test_find_king() {
        let mut board = Board::new();
        assert!(board.find_king(Color::White).is_none());

        board
            .add_piece(Piece::new(0, Color::White, PieceType::King, (4, 4)), (4, 4))
            .unwrap();
        assert_eq!(board.find_king(Color::White).map(|k| k.square()), Some((4, 4)));
        assert!(board.find_king(Color::Black).is_none());
    }

    #[test]
    fn test_board_display() {
        let board = Board::setup_standard().unwrap();
        let display = format!("{}", board);

        assert!(display.contains("a b c d e f g h"));
        assert!(display.contains("8 r n b q k b n r | 8"));
        assert!(display.contains("1 R N B Q K B N R | 1"));
        assert!(display.contains("4 . . . . . . . . | 4"));
    }
}
