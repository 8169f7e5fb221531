// Per-team state: day-indexed game history and cumulative rank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("team already played on day {day}")]
    AlreadyPlayedThisDay { day: u32 },

    #[error("invalid day {day}, days start at 1")]
    InvalidDay { day: u32 },

    #[error("day {day} does not follow last day played ({last_day_played})")]
    NonSequentialDay { day: u32, last_day_played: u32 },

    #[error("unknown result: {0}")]
    UnknownOutcome(String),
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The result of a single game from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
    Tied,
}

impl Outcome {
    /// Points added to the cumulative rank for this outcome.
    pub fn points(self) -> u32 {
        match self {
            Outcome::Won => 3,
            Outcome::Tied => 1,
            Outcome::Lost => 0,
        }
    }

    /// Outcomes for (first, second) given the two posted scores.
    pub fn from_scores(first: i64, second: i64) -> (Outcome, Outcome) {
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => (Outcome::Won, Outcome::Lost),
            std::cmp::Ordering::Less => (Outcome::Lost, Outcome::Won),
            std::cmp::Ordering::Equal => (Outcome::Tied, Outcome::Tied),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::Tied => "tied",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "won" => Ok(Outcome::Won),
            "lost" => Ok(Outcome::Lost),
            "tied" => Ok(Outcome::Tied),
            other => Err(RecordError::UnknownOutcome(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One recorded game in a team's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub opponent: String,
    pub score: i64,
    /// Cumulative rank after this game.
    pub rank: u32,
}

/// A competing team and everything it has played so far.
///
/// `history[i]` holds the game for day `i + 1`, so the history is always
/// gap-free over `1..=last_day_played`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    history: Vec<GameRecord>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last day this team played, or 0 before its first game.
    pub fn last_day_played(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    /// The game played on `day`, if any.
    pub fn game(&self, day: u32) -> Option<&GameRecord> {
        let idx = day.checked_sub(1)?;
        self.history.get(idx as usize)
    }

    /// Cumulative rank after the most recent game, 0 if none were played.
    pub fn current_rank(&self) -> u32 {
        self.history.last().map(|g| g.rank).unwrap_or(0)
    }

    /// Cumulative rank as of `day`. Days past the last game played report
    /// the current rank.
    pub fn rank_on(&self, day: u32) -> u32 {
        match day.min(self.last_day_played()) {
            0 => 0,
            d => self.history[d as usize - 1].rank,
        }
    }

    /// Check whether a game on `day` could be recorded, without recording it.
    pub fn check_day(&self, day: u32) -> Result<(), RecordError> {
        let last_day_played = self.last_day_played();
        if day < 1 {
            return Err(RecordError::InvalidDay { day });
        }
        if day == last_day_played {
            return Err(RecordError::AlreadyPlayedThisDay { day });
        }
        if day != last_day_played + 1 {
            return Err(RecordError::NonSequentialDay {
                day,
                last_day_played,
            });
        }
        Ok(())
    }

    /// Record a game on `day` and return the new cumulative rank.
    ///
    /// Days must advance by exactly one per call. Nothing is changed when
    /// an error is returned.
    pub fn record_game(
        &mut self,
        day: u32,
        opponent: &str,
        score: i64,
        outcome: Outcome,
    ) -> Result<u32, RecordError> {
        self.check_day(day)?;

        let rank = self.current_rank() + outcome.points();
        self.history.push(GameRecord {
            opponent: opponent.to_string(),
            score,
            rank,
        });
        Ok(rank)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
