// Match line parsing: "<team name> <score>, <team name> <score>".

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("wrong number of parts in match string '{0}'")]
    WrongPartCount(String),

    #[error("given empty team result string to parse")]
    EmptyTeamSegment,

    #[error("unable to parse '{token}' for score: {source}")]
    InvalidScore {
        token: String,
        source: ParseIntError,
    },

    #[error("no team name before the score in '{0}'")]
    MissingTeamName(String),
}

// ---------------------------------------------------------------------------
// Parsed types
// ---------------------------------------------------------------------------

/// One side of a match line: the team and the score it posted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamScore {
    pub name: String,
    pub score: i64,
}

impl fmt::Display for TeamScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.score)
    }
}

/// A single parsed match line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub home: TeamScore,
    pub away: TeamScore,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.home, self.away)
    }
}

impl FromStr for Match {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a raw match line into its two sides.
///
/// The line must contain exactly one comma. Within each side the last
/// whitespace-separated token is the score and everything before it,
/// rejoined with single spaces, is the team name. Names may therefore
/// contain spaces ("San Jose Earthquakes 3").
pub fn parse_line(raw: &str) -> Result<Match, ParseError> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [first, second] = parts.as_slice() else {
        return Err(ParseError::WrongPartCount(raw.to_string()));
    };

    Ok(Match {
        home: parse_team_score(first)?,
        away: parse_team_score(second)?,
    })
}

fn parse_team_score(segment: &str) -> Result<TeamScore, ParseError> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let Some((score_token, name_tokens)) = tokens.split_last() else {
        return Err(ParseError::EmptyTeamSegment);
    };

    let score = score_token
        .parse::<i64>()
        .map_err(|source| ParseError::InvalidScore {
            token: score_token.to_string(),
            source,
        })?;

    if name_tokens.is_empty() {
        return Err(ParseError::MissingTeamName(segment.trim().to_string()));
    }

    Ok(TeamScore {
        name: name_tokens.join(" "),
        score,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
