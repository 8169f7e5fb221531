// A single match day: who played whom, and the standings after each match.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::registry::{TeamId, TeamRegistry};
use crate::standings::{self, Standing};
use crate::team::{Outcome, RecordError};

/// Number of standings shown per day unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 3;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchDayError {
    /// The team already has a match on this day. The engine treats this as
    /// the start of the next match day.
    #[error("team '{0}' already played today")]
    TeamAlreadyPlayed(String),

    #[error("team '{0}' cannot play against itself")]
    SelfMatch(String),

    #[error("error recording game for team '{team}' on day {day}, reason: {source}")]
    RecordGame {
        day: u32,
        team: String,
        source: RecordError,
    },
}

// ---------------------------------------------------------------------------
// MatchDay
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MatchDay {
    day: u32,
    /// Each team that played today and the score it posted.
    scores: HashMap<String, i64>,
    /// Who played whom; every team appears both as a key and as a value.
    matchups: HashMap<String, String>,
    /// Cumulative ranks in the order matches were applied.
    standings: Vec<Standing>,
}

impl MatchDay {
    /// Create an empty match day. Day numbers below 1 are raised to 1.
    pub fn new(day: u32) -> Self {
        MatchDay {
            day: day.max(1),
            scores: HashMap::new(),
            matchups: HashMap::new(),
            standings: Vec::new(),
        }
    }

    pub fn day_number(&self) -> u32 {
        self.day
    }

    pub fn has_played(&self, team: &str) -> bool {
        self.scores.contains_key(team)
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        self.matchups.get(team).map(String::as_str)
    }

    pub fn score_of(&self, team: &str) -> Option<i64> {
        self.scores.get(team).copied()
    }

    pub fn match_count(&self) -> usize {
        self.standings.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    /// Standings in the order they were recorded.
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// A sorted copy of today's standings.
    pub fn sorted_standings(&self) -> Vec<Standing> {
        let mut sorted = self.standings.clone();
        standings::sort_standings(&mut sorted);
        sorted
    }

    /// Apply one match to this day and to both teams.
    ///
    /// `TeamAlreadyPlayed` names the first offender, home side checked
    /// first. Both teams are validated before anything is touched, so a
    /// failed call leaves the day and the teams unchanged.
    pub fn process_match_result(
        &mut self,
        teams: &mut TeamRegistry,
        home: TeamId,
        home_score: i64,
        away: TeamId,
        away_score: i64,
    ) -> Result<(), MatchDayError> {
        let home_name = teams.get(home).name().to_string();
        let away_name = teams.get(away).name().to_string();

        if home == away {
            return Err(MatchDayError::SelfMatch(home_name));
        }
        if self.has_played(&home_name) {
            return Err(MatchDayError::TeamAlreadyPlayed(home_name));
        }
        if self.has_played(&away_name) {
            return Err(MatchDayError::TeamAlreadyPlayed(away_name));
        }

        let day = self.day;
        let record_error = |team: &str, source: RecordError| MatchDayError::RecordGame {
            day,
            team: team.to_string(),
            source,
        };

        teams
            .get(home)
            .check_day(day)
            .map_err(|e| record_error(&home_name, e))?;
        teams
            .get(away)
            .check_day(day)
            .map_err(|e| record_error(&away_name, e))?;

        let (home_outcome, away_outcome) = Outcome::from_scores(home_score, away_score);

        self.scores.insert(home_name.clone(), home_score);
        self.scores.insert(away_name.clone(), away_score);
        self.matchups.insert(home_name.clone(), away_name.clone());
        self.matchups.insert(away_name.clone(), home_name.clone());

        let home_rank = teams
            .get_mut(home)
            .record_game(day, &away_name, home_score, home_outcome)
            .map_err(|e| record_error(&home_name, e))?;
        let away_rank = teams
            .get_mut(away)
            .record_game(day, &home_name, away_score, away_outcome)
            .map_err(|e| record_error(&away_name, e))?;

        debug!(
            "Matchday {}: {} {} ({}, {} pts) vs {} {} ({}, {} pts)",
            day,
            home_name,
            home_score,
            home_outcome,
            home_rank,
            away_name,
            away_score,
            away_outcome,
            away_rank
        );

        self.standings.push(Standing::new(home_name, home_rank));
        self.standings.push(Standing::new(away_name, away_rank));
        Ok(())
    }

    /// Render the day header and its best `top_n` standings.
    pub fn render_top(&self, top_n: usize) -> String {
        standings::render_day(self.day, &self.sorted_standings(), top_n)
    }

    pub fn render_top3(&self) -> String {
        self.render_top(DEFAULT_TOP_N)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
