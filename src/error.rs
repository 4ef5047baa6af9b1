// Error types
// Every variant here is an invariant violation: the engine reports illegal
// moves through the controller, never through these.

use crate::board::{Color, PieceId, Square};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("square ({column}, {row}) is outside the board")]
    OutOfRange { column: i8, row: i8 },

    #[error("square ({column}, {row}) is occupied already")]
    CellOccupied { column: i8, row: i8 },

    #[error("no live piece with id {0}")]
    UnknownPiece(PieceId),

    #[error("tried to capture a friendly piece on ({column}, {row})")]
    FriendlyCapture { column: i8, row: i8 },

    #[error("line from {from:?} to {to:?} is neither straight nor diagonal")]
    NotALine { from: Square, to: Square },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("no king found for {0:?}")]
    MissingKing(Color),

    #[error("match has not been started")]
    NotStarted,

    #[error("match has been started already")]
    AlreadyStarted,

    #[error("tried to apply a non-completed interaction")]
    IncompleteInteraction,

    #[error("selected source {0:?} holds no piece")]
    EmptySource(Square),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid result type code: {0}")]
    InvalidResultType(i64),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("match result has not been finalized")]
    Unfinished,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
