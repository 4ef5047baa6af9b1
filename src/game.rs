// Match state machine
// Sets up the board, alternates turns, applies moves and detects the end
// of the match. The presentation layer is reached only through
// `GameController`.

use chrono::Utc;
use log::{debug, info, warn};

use crate::board::{Board, Color, Displacement, PieceType, Player, Square};
use crate::error::MatchError;
use crate::interaction::{Interaction, Selection};
use crate::result::{MatchResult, ResultType};
use crate::rules::{has_escape_squares, is_legal};

/// Callbacks from a match to whatever presents it.
///
/// Called synchronously from inside the match; implementations get read-only
/// access to the board and must not fail.
pub trait GameController {
    fn on_match_start(&mut self, board: &Board, players: &[Player; 2]);

    fn on_player_turn(&mut self, board: &Board, player: &Player);

    fn on_player_wins(&mut self, board: &Board, winner: &Player);

    fn on_invalid_interaction(&mut self);
}

/// Where a match stands
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MatchState {
    NotStarted,
    /// Waiting for a move of the announced player
    AwaitingTurn(Color),
    Finished(ResultType),
}

pub struct Match<C: GameController> {
    controller: C,
    players: [Player; 2],
    board: Board,
    state: MatchState,
    /// Player the next `run_turn` announces
    turn_of: Color,
    interaction: Interaction,
    result: Option<MatchResult>,
}

impl<C: GameController> Match<C> {
    pub fn new(controller: C, player1_name: &str, player2_name: &str) -> Self {
        Match {
            controller,
            players: [
                Player::new(Color::White, player1_name),
                Player::new(Color::Black, player2_name),
            ],
            board: Board::new(),
            state: MatchState::NotStarted,
            turn_of: Color::White,
            interaction: Interaction::new(Color::White),
            result: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index() as usize]
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn turn_of(&self) -> Color {
        self.turn_of
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, MatchState::Finished(_))
    }

    pub fn has_next_turn(&self) -> bool {
        !self.is_finished()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start from the standard position with the first player to move
    pub fn start(&mut self) -> Result<(), MatchError> {
        if self.state != MatchState::NotStarted {
            return Err(MatchError::AlreadyStarted);
        }
        let board = Board::setup_standard()?;
        self.start_with_board(board, Color::White)
    }

    /// Start from an arbitrary position
    pub fn start_with_board(&mut self, board: Board, first: Color) -> Result<(), MatchError> {
        if self.state != MatchState::NotStarted {
            return Err(MatchError::AlreadyStarted);
        }

        self.result = Some(MatchResult::start(
            self.players[0].name(),
            self.players[1].name(),
            Utc::now(),
        ));
        self.board = board;
        self.turn_of = first;
        self.state = MatchState::AwaitingTurn(first);

        info!(
            "match started: {} vs {}",
            self.players[0].name(),
            self.players[1].name()
        );
        self.controller.on_match_start(&self.board, &self.players);
        self.run_turn();
        Ok(())
    }

    /// Announce the next player, then hand the turn pointer over right away
    pub fn run_turn(&mut self) {
        if self.is_finished() {
            return;
        }

        let announced = self.turn_of;
        self.interaction.set_player(announced);
        self.state = MatchState::AwaitingTurn(announced);
        debug!("{:?} to move", announced);

        let player = &self.players[announced.index() as usize];
        self.controller.on_player_turn(&self.board, player);

        self.turn_of = announced.opposite();
    }

    /// Apply a displacement the rules already accepted
    pub fn handle_movement(&mut self, displacement: Displacement) -> Result<(), MatchError> {
        match self.state {
            MatchState::NotStarted => return Err(MatchError::NotStarted),
            MatchState::Finished(_) => return Ok(()),
            MatchState::AwaitingTurn(_) => {}
        }

        let captured = self.board.apply_move(&displacement)?;
        debug!(
            "{} moved to {:?} by {:?}",
            displacement.piece, displacement.target, displacement.player
        );

        // A check left unanswered lets the king be taken outright
        let king_taken = captured.is_some_and(|piece| piece.kind() == PieceType::King);
        if king_taken {
            info!("{:?} king captured", displacement.player.opposite());
        }

        if king_taken || self.is_checkmate(displacement.player)? {
            self.finish(Some(displacement.player));
        } else {
            self.run_turn();
        }
        Ok(())
    }

    /// Whether the rival of `mover` has been checkmated
    pub fn is_checkmate(&self, mover: Color) -> Result<bool, MatchError> {
        let rival = mover.opposite();
        let king = self
            .board
            .find_king(rival)
            .ok_or(MatchError::MissingKing(rival))?;
        Ok(!has_escape_squares(&self.board, king))
    }

    fn finish(&mut self, winner: Option<Color>) {
        let result_type = ResultType::from_winner(winner);
        if let Some(result) = self.result.as_mut() {
            result.finish(result_type, Utc::now());
        }
        self.state = MatchState::Finished(result_type);
        info!("match finished: {:?}", result_type);

        if let Some(color) = winner {
            let player = &self.players[color.index() as usize];
            self.controller.on_player_wins(&self.board, player);
        }
    }

    // =========================================================================
    // Clicks
    // =========================================================================

    /// Register a click of the player holding the turn
    ///
    /// Once a source and a destination are chosen the move is tried.
    /// Clicks outside a running match are ignored.
    pub fn select(&mut self, square: Square) -> Result<(), MatchError> {
        if !matches!(self.state, MatchState::AwaitingTurn(_)) {
            return Ok(());
        }

        self.interaction.select(&self.board, square);
        if self.interaction.is_full() {
            self.apply_interaction()?;
        }
        Ok(())
    }

    /// Turn the full selection into a move, or report it as invalid
    pub fn apply_interaction(&mut self) -> Result<(), MatchError> {
        let (source, destination) = match self.interaction.selection() {
            Selection::Full {
                source,
                destination,
            } => (source, destination),
            _ => return Err(MatchError::IncompleteInteraction),
        };
        let player = self.interaction.player();

        let piece = *self
            .board
            .piece_at(source)
            .ok_or(MatchError::EmptySource(source))?;

        if is_legal(&self.board, &piece, player, destination) {
            self.handle_movement(Displacement::new(piece.id(), player, destination))
        } else {
            warn!("illegal move of {} to {:?}", piece.id(), destination);
            self.controller.on_invalid_interaction();
            Ok(())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
