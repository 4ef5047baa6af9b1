// Application context
// Owns the result store and the history of finished matches, and records
// each match once it ends. Constructed explicitly and passed around.

use log::info;

use crate::error::{AppError, StorageError};
use crate::game::{GameController, Match};
use crate::result::MatchResult;
use crate::storage::ResultStore;

pub struct App<S: ResultStore> {
    store: S,
    results: Vec<MatchResult>,
}

impl<S: ResultStore> App<S> {
    /// Load the stored history from `store`
    pub fn new(mut store: S) -> Result<Self, StorageError> {
        let results = store.load_all()?;
        info!("loaded {} previous match results", results.len());
        Ok(App { store, results })
    }

    /// Results of finished matches, oldest first
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Create and start a match between two players
    pub fn start_match<C: GameController>(
        &self,
        controller: C,
        player1_name: &str,
        player2_name: &str,
    ) -> Result<Match<C>, AppError> {
        let mut game = Match::new(controller, player1_name, player2_name);
        game.start()?;
        Ok(game)
    }

    /// Store the result of `game` if it has finished and is not stored yet
    ///
    /// Returns the stored record the first time it is called for a finished
    /// match, None otherwise.
    pub fn record_if_finished<C: GameController>(
        &mut self,
        game: &Match<C>,
    ) -> Result<Option<&MatchResult>, AppError> {
        if !game.is_finished() {
            return Ok(None);
        }
        let result = match game.result() {
            Some(result) => result,
            None => return Ok(None),
        };

        let already_stored = self.results.iter().any(|stored| {
            stored.player1_name == result.player1_name
                && stored.player2_name == result.player2_name
                && stored.started_at == result.started_at
        });
        if already_stored {
            return Ok(None);
        }

        let stored = self.store.insert(result)?;
        self.results.push(stored);
        Ok(self.results.last())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
