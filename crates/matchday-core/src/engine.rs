// Ranking engine: infers match days from the line stream and keeps the
// per-day standings for the final report.
//
// The input has no day markers. A team showing up a second time within the
// open day is the only sign that the next day has started, so rollover is
// reactive: try the current day, and on `TeamAlreadyPlayed` open the next
// day and retry the same match there.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::match_day::{MatchDay, MatchDayError, DEFAULT_TOP_N};
use crate::parser::{parse_line, ParseError};
use crate::registry::TeamRegistry;
use crate::report::{DayReport, RankingReport};
use crate::team::Team;

/// Default bound on consecutive rollovers.
pub const DEFAULT_MAX_CONSECUTIVE_ROLLOVERS: u32 = 3;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    MatchDay(#[from] MatchDayError),

    #[error("too many consecutive match day rollovers (limit {limit}) at '{line}'")]
    ExcessiveRollover { line: String, limit: u32 },
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Engine tunables, usually taken from the `[engine]` and `[report]`
/// config sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// How many lines in a row may each open a new match day. The streak
    /// resets whenever a line lands in the day that is already open.
    pub max_consecutive_rollovers: u32,
    /// Standings shown per day in the report.
    pub top_n: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            max_consecutive_rollovers: DEFAULT_MAX_CONSECUTIVE_ROLLOVERS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        EngineSettings {
            max_consecutive_rollovers: config.engine.max_consecutive_rollovers,
            top_n: config.report.top_n,
        }
    }
}

// ---------------------------------------------------------------------------
// RankingEngine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RankingEngine {
    teams: TeamRegistry,
    /// Closed days, in order, starting at day 1.
    closed: Vec<MatchDay>,
    /// The day currently accepting matches.
    current: MatchDay,
    rollover_streak: u32,
    settings: EngineSettings,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingEngine {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        RankingEngine {
            teams: TeamRegistry::new(),
            closed: Vec::new(),
            current: MatchDay::new(1),
            rollover_streak: 0,
            settings,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_settings(EngineSettings::from(config))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Parse `line` and apply it to the open match day, opening the next
    /// day when one of the teams has already played.
    ///
    /// On error nothing is applied: no team, day or standing changes,
    /// although team names from a well-formed line stay registered.
    pub fn add_match(&mut self, line: &str) -> Result<(), EngineError> {
        let parsed = parse_line(line)?;
        let home = self.teams.find_or_create(&parsed.home.name);
        let away = self.teams.find_or_create(&parsed.away.name);

        // Days opened by this line; committed only once the match applies.
        let mut opened: Vec<MatchDay> = Vec::new();
        loop {
            let day = opened.last_mut().unwrap_or(&mut self.current);
            let result = day.process_match_result(
                &mut self.teams,
                home,
                parsed.home.score,
                away,
                parsed.away.score,
            );
            let day_number = day.day_number();

            match result {
                Ok(()) => break,
                Err(MatchDayError::TeamAlreadyPlayed(team)) => {
                    let limit = self.settings.max_consecutive_rollovers;
                    if self.rollover_streak + opened.len() as u32 >= limit {
                        warn!(
                            "Refusing to open matchday {} for '{}': {} consecutive rollovers",
                            day_number + 1,
                            line,
                            limit
                        );
                        return Err(EngineError::ExcessiveRollover {
                            line: line.to_string(),
                            limit,
                        });
                    }
                    info!(
                        "Team '{}' already played on matchday {}, starting matchday {}",
                        team,
                        day_number,
                        day_number + 1
                    );
                    opened.push(MatchDay::new(day_number + 1));
                }
                Err(e) => return Err(e.into()),
            }
        }

        if opened.is_empty() {
            self.rollover_streak = 0;
        } else {
            self.rollover_streak += opened.len() as u32;
            for day in opened {
                let finished = std::mem::replace(&mut self.current, day);
                self.closed.push(finished);
            }
        }
        debug!("Applied '{}' to matchday {}", parsed, self.current.day_number());
        Ok(())
    }

    /// The concatenated top-N report for every day, oldest first.
    pub fn render_report(&self) -> String {
        self.days()
            .map(|day| day.render_top(self.settings.top_n))
            .collect()
    }

    /// A serializable copy of every day's top-N standings.
    pub fn snapshot(&self) -> RankingReport {
        RankingReport {
            days: self
                .days()
                .map(|day| DayReport {
                    day: day.day_number(),
                    standings: day
                        .sorted_standings()
                        .into_iter()
                        .take(self.settings.top_n)
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn current_day_number(&self) -> u32 {
        self.current.day_number()
    }

    pub fn current_day(&self) -> &MatchDay {
        &self.current
    }

    /// Look up a match day by number (1-based).
    pub fn day(&self, number: u32) -> Option<&MatchDay> {
        if number == self.current.day_number() {
            return Some(&self.current);
        }
        let idx = number.checked_sub(1)? as usize;
        self.closed.get(idx)
    }

    /// Every match day from 1 through the current one.
    pub fn days(&self) -> impl Iterator<Item = &MatchDay> {
        self.closed.iter().chain(std::iter::once(&self.current))
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.by_name(name)
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(lines: &[&str]) -> RankingEngine {
        let mut engine = RankingEngine::new();
        for line in lines {
            engine.add_match(line).unwrap();
        }
        engine
    }

    #[test]
    fn fresh_engine_has_day_one() {
        let engine = RankingEngine::new();
        assert_eq!(engine.current_day_number(), 1);
        assert_eq!(engine.days().count(), 1);
        assert_eq!(engine.render_report(), "Matchday 1\n\n");
    }

    #[test]
    fn repeat_team_rolls_over_to_next_day() {
        let engine = engine_with(&["A 2, B 2", "C 0, D 1", "A 1, D 2"]);

        assert_eq!(engine.days().count(), 2);
        let day1 = engine.day(1).unwrap();
        assert_eq!(day1.opponent_of("A"), Some("B"));
        assert_eq!(day1.opponent_of("C"), Some("D"));
        assert_eq!(day1.match_count(), 2);
        let day2 = engine.day(2).unwrap();
        assert_eq!(day2.opponent_of("A"), Some("D"));
        assert_eq!(day2.match_count(), 1);
        assert!(!day2.has_played("B"));
        assert!(engine.day(3).is_none());
        assert!(engine.day(0).is_none());
    }

    #[test]
    fn ranks_accumulate_across_days() {
        let engine = engine_with(&["A 2, B 2", "C 0, D 1", "A 1, D 2", "B 3, C 3"]);
        assert_eq!(engine.team("A").unwrap().current_rank(), 1);
        assert_eq!(engine.team("D").unwrap().current_rank(), 6);
        assert_eq!(engine.team("B").unwrap().current_rank(), 2);
        assert_eq!(engine.team("C").unwrap().current_rank(), 1);
        assert_eq!(
            engine.render_report(),
            "Matchday 1\nD, 3 pts\nA, 1 pt\nB, 1 pt\n\n\
             Matchday 2\nD, 6 pts\nB, 2 pts\nA, 1 pt\n\n"
        );
    }

    #[test]
    fn parse_errors_are_returned_unchanged() {
        let mut engine = RankingEngine::new();
        assert_eq!(
            engine.add_match("A 2 B 3"),
            Err(EngineError::Parse(ParseError::WrongPartCount("A 2 B 3".into())))
        );
        assert!(engine.teams().is_empty());
    }

    #[test]
    fn record_errors_are_not_retried() {
        let mut engine = engine_with(&["A 1, B 0", "C 1, D 0", "A 2, C 0"]);
        let before = engine.render_report();
        // Day 2 is open with A and C; "Late" never played day 1 or 2.
        let err = engine.add_match("B 1, Late 0").unwrap_err();
        assert!(matches!(
            err,
            EngineError::MatchDay(MatchDayError::RecordGame { .. })
        ));
        assert_eq!(engine.current_day_number(), 2);
        assert_eq!(engine.render_report(), before);
    }

    #[test]
    fn failed_retry_does_not_open_a_day() {
        let mut engine = engine_with(&["A 1, B 0"]);
        // A rolls over to day 2, where the brand-new team cannot start.
        assert!(engine.add_match("A 1, New 0").is_err());
        assert_eq!(engine.current_day_number(), 1);
        assert_eq!(engine.days().count(), 1);
    }

    #[test]
    fn self_match_is_an_error() {
        let mut engine = RankingEngine::new();
        assert_eq!(
            engine.add_match("A 1, A 2"),
            Err(EngineError::MatchDay(MatchDayError::SelfMatch("A".into())))
        );
    }

    #[test]
    fn consecutive_rollovers_are_bounded() {
        let mut engine = RankingEngine::new();
        for _ in 0..=DEFAULT_MAX_CONSECUTIVE_ROLLOVERS {
            engine.add_match("A 1, B 0").unwrap();
        }
        assert_eq!(engine.current_day_number(), 4);

        let err = engine.add_match("A 1, B 0").unwrap_err();
        assert_eq!(
            err,
            EngineError::ExcessiveRollover {
                line: "A 1, B 0".into(),
                limit: DEFAULT_MAX_CONSECUTIVE_ROLLOVERS
            }
        );
        assert_eq!(engine.current_day_number(), 4);
        assert_eq!(engine.team("A").unwrap().last_day_played(), 4);
    }

    #[test]
    fn streak_resets_when_a_day_fills_up() {
        let settings = EngineSettings {
            max_consecutive_rollovers: 1,
            ..EngineSettings::default()
        };
        let mut engine = RankingEngine::with_settings(settings);
        for line in [
            "A 1, B 0", "C 1, D 0", // day 1
            "A 0, C 0", "B 2, D 1", // day 2
            "A 3, D 3", "B 0, C 1", // day 3
        ] {
            engine.add_match(line).unwrap();
        }
        assert_eq!(engine.current_day_number(), 3);

        // Two single-match days in a row trip a limit of one.
        let mut tight = RankingEngine::with_settings(settings);
        tight.add_match("A 1, B 0").unwrap();
        tight.add_match("A 1, B 0").unwrap();
        assert!(matches!(
            tight.add_match("A 1, B 0"),
            Err(EngineError::ExcessiveRollover { limit: 1, .. })
        ));
    }

    #[test]
    fn top_n_controls_report_length() {
        let settings = EngineSettings {
            top_n: 1,
            ..EngineSettings::default()
        };
        let mut engine = RankingEngine::with_settings(settings);
        engine.add_match("A 1, B 0").unwrap();
        engine.add_match("C 0, D 0").unwrap();
        assert_eq!(engine.render_report(), "Matchday 1\nA, 3 pts\n\n");
    }
}
