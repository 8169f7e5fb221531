// Standings ordering and top-N rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A team and its cumulative rank as of a particular match day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team: String,
    pub rank: u32,
}

impl Standing {
    pub fn new(team: impl Into<String>, rank: u32) -> Self {
        Standing {
            team: team.into(),
            rank,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.team, self.rank, points_unit(self.rank))
    }
}

/// "pt" for exactly one point, "pts" for everything else.
pub fn points_unit(rank: u32) -> &'static str {
    if rank == 1 {
        "pt"
    } else {
        "pts"
    }
}

/// Highest rank first; equal ranks in ascending name order.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| a.team.cmp(&b.team)));
}

/// Render a day block: the header, up to `top_n` entries, then a blank line.
pub fn render_day(day: u32, sorted: &[Standing], top_n: usize) -> String {
    let mut out = format!("Matchday {day}\n");
    for standing in sorted.iter().take(top_n) {
        out.push_str(&standing.to_string());
        out.push('\n');
    }
    out.push('\n');
    out
}
