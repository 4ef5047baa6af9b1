// Two-click selection of a move
// The first click picks one of the active player's pieces, the second one
// picks any destination. Legality is judged later by the rules.

use crate::board::{Board, Color, Square};

/// How far the active player got with the current selection
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Selection {
    None,
    SourceOnly(Square),
    Full { source: Square, destination: Square },
}

/// Clicks of the player holding the turn
#[derive(Clone, Debug)]
pub struct Interaction {
    player: Color,
    selection: Selection,
}

impl Interaction {
    pub fn new(player: Color) -> Self {
        Interaction {
            player,
            selection: Selection::None,
        }
    }

    pub fn player(&self) -> Color {
        self.player
    }

    /// Hand the interaction to a player, dropping any pending clicks
    pub fn set_player(&mut self, player: Color) {
        self.player = player;
        self.clear();
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }

    pub fn is_full(&self) -> bool {
        matches!(self.selection, Selection::Full { .. })
    }

    /// Register a click on `square`
    ///
    /// A click after a full selection starts a new one from scratch.
    pub fn select(&mut self, board: &Board, square: Square) {
        match self.selection {
            Selection::None => {
                let owns_piece = matches!(board.piece_at(square), Some(p) if p.owner() == self.player);
                if owns_piece {
                    self.selection = Selection::SourceOnly(square);
                }
            }
            Selection::SourceOnly(source) => {
                self.selection = Selection::Full {
                    source,
                    destination: square,
                };
            }
            Selection::Full { .. } => {
                self.clear();
                self.select(board, square);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
