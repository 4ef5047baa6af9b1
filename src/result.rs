// Match result records handed to the persistence layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::Color;

/// How a match ended
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum ResultType {
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
}

impl ResultType {
    /// Small integer code used in stored records
    pub fn code(&self) -> i64 {
        match self {
            ResultType::FirstPlayerWin => 0,
            ResultType::SecondPlayerWin => 1,
            ResultType::Draw => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<ResultType> {
        match code {
            0 => Some(ResultType::FirstPlayerWin),
            1 => Some(ResultType::SecondPlayerWin),
            2 => Some(ResultType::Draw),
            _ => None,
        }
    }

    /// Result for a match won by `winner`, a draw when nobody won
    pub fn from_winner(winner: Option<Color>) -> ResultType {
        match winner {
            Some(Color::White) => ResultType::FirstPlayerWin,
            Some(Color::Black) => ResultType::SecondPlayerWin,
            None => ResultType::Draw,
        }
    }
}

/// Outcome of one match.
///
/// Created unfinished when the match starts; `id` is assigned by the store.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct MatchResult {
    pub id: Option<u32>,
    pub player1_name: String,
    pub player2_name: String,
    pub result_type: Option<ResultType>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl MatchResult {
    pub fn start(player1_name: &str, player2_name: &str, started_at: DateTime<Utc>) -> Self {
        MatchResult {
            id: None,
            player1_name: player1_name.to_string(),
            player2_name: player2_name.to_string(),
            result_type: None,
            started_at,
            ended_at: None,
        }
    }

    pub fn finish(&mut self, result_type: ResultType, ended_at: DateTime<Utc>) {
        self.result_type = Some(result_type);
        self.ended_at = Some(ended_at);
    }

    pub fn is_finished(&self) -> bool {
        self.result_type.is_some() && self.ended_at.is_some()
    }

    /// Name of the winner, None for draws and unfinished matches
    pub fn winner_name(&self) -> Option<&str> {
        match self.result_type? {
            ResultType::FirstPlayerWin => Some(self.player1_name.as_str()),
            ResultType::SecondPlayerWin => Some(self.player2_name.as_str()),
            ResultType::Draw => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.id {
            write!(f, "#{} ", id)?;
        }
        write!(f, "{} vs {}: ", self.player1_name, self.player2_name)?;
        match (self.result_type, self.winner_name()) {
            (None, _) => write!(f, "in progress")?,
            (Some(ResultType::Draw), _) => write!(f, "draw")?,
            (Some(_), Some(name)) => write!(f, "{} won", name)?,
            (Some(_), None) => {}
        }
        write!(f, " ({})", self.started_at.format("%Y-%m-%d %H:%M"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
