// Console front end
// Each input line is one click on a square (e.g. "e2"), or a command.

use std::io::{BufRead, Write};

use log::warn;

use crate::app::App;
use crate::board::{on_board, Board, Player, Square};
use crate::error::AppError;
use crate::game::GameController;
use crate::rules::legal_targets;
use crate::storage::ResultStore;

/// Convert a square to algebraic notation (e.g., (4, 1) -> "e2")
pub fn square_to_notation(square: Square) -> String {
    let file = (b'a' + square.0 as u8) as char;
    let rank = (b'1' + square.1 as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse algebraic notation to a square (e.g., "e2" -> (4, 1))
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let column = bytes[0].to_ascii_lowercase().checked_sub(b'a')? as i8;
    let row = bytes[1].checked_sub(b'1')? as i8;
    let square = (column, row);
    on_board(square).then_some(square)
}

/// A `GameController` that prints everything to a writer
pub struct ConsoleController<W: Write> {
    out: W,
}

impl<W: Write> ConsoleController<W> {
    pub fn new(out: W) -> Self {
        ConsoleController { out }
    }

    /// Print a line; a broken terminal is logged, not fatal
    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("console output failed: {}", e);
        }
    }
}

impl<W: Write> GameController for ConsoleController<W> {
    fn on_match_start(&mut self, board: &Board, players: &[Player; 2]) {
        self.say(&format!(
            "New match: {} (White) vs {} (Black)",
            players[0].name(),
            players[1].name()
        ));
        self.say(&board.to_string());
    }

    fn on_player_turn(&mut self, board: &Board, player: &Player) {
        self.say(&board.to_string());
        self.say(&format!("{} to move ({:?})", player.name(), player.color()));
    }

    fn on_player_wins(&mut self, board: &Board, winner: &Player) {
        self.say(&board.to_string());
        self.say(&format!("Checkmate! {} wins!", winner.name()));
    }

    fn on_invalid_interaction(&mut self) {
        self.say("Illegal move.");
    }
}

/// Play one match reading clicks from `input` until it ends or "quit"
pub fn run<R: BufRead, W: Write, S: ResultStore>(
    app: &mut App<S>,
    input: R,
    out: W,
    white: &str,
    black: &str,
) -> Result<(), AppError> {
    let mut game = app.start_match(ConsoleController::new(out), white, black)?;

    for line in input.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "quit" => break,

            "board" => {
                let board = game.board().to_string();
                game.controller_mut().say(&board);
            }

            "history" => {
                if app.results().is_empty() {
                    game.controller_mut().say("No finished matches yet.");
                }
                for result in app.results() {
                    game.controller_mut().say(&result.to_string());
                }
            }

            "moves" => {
                let piece = parts
                    .get(1)
                    .and_then(|s| parse_square(s))
                    .and_then(|sq| game.board().piece_at(sq));
                let text = match piece {
                    Some(piece) => {
                        let targets: Vec<String> = legal_targets(game.board(), piece)
                            .into_iter()
                            .map(square_to_notation)
                            .collect();
                        if targets.is_empty() {
                            "No legal moves.".to_string()
                        } else {
                            targets.join(" ")
                        }
                    }
                    None => "Usage: moves <square of a piece>".to_string(),
                };
                game.controller_mut().say(&text);
            }

            other => match parse_square(other) {
                Some(square) => {
                    game.select(square)?;
                    if let Some(stored) = app.record_if_finished(&game)? {
                        let text = format!("Result stored: {}", stored);
                        game.controller_mut().say(&text);
                    }
                    if game.is_finished() {
                        break;
                    }
                }
                None => game
                    .controller_mut()
                    .say("Unknown input. Type a square like e2, or board, moves <sq>, history, quit."),
            },
        }
    }

    Ok(())
}
