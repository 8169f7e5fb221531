// Library root: re-exports all modules so the CLI and integration tests can
// reach the ranking engine's public API.

pub mod config;
pub mod engine;
pub mod ingest;
pub mod match_day;
pub mod parser;
pub mod registry;
pub mod report;
pub mod standings;
pub mod team;

pub use engine::{EngineError, EngineSettings, RankingEngine};
pub use parser::{parse_line, Match, ParseError, TeamScore};
