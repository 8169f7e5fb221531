// Feeding a stream of raw lines into the engine.

use std::io;

use thiserror::Error;
use tracing::debug;

use crate::engine::{EngineError, RankingEngine};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("error parsing line {line} of match data: {source}")]
    Line { line: usize, source: EngineError },

    #[error("error reading line {line} of match data: {source}")]
    Read { line: usize, source: io::Error },
}

impl IngestError {
    /// 0-based number of the line that failed.
    pub fn line(&self) -> usize {
        match self {
            IngestError::Line { line, .. } | IngestError::Read { line, .. } => *line,
        }
    }
}

/// Apply every line from `lines` to `engine`, in order, stopping at the
/// first failure. Whitespace-only lines are skipped but still counted for
/// line numbering. Returns the number of matches applied.
pub fn ingest<I>(engine: &mut RankingEngine, lines: I) -> Result<usize, IngestError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut applied = 0;
    for (line, raw) in lines.into_iter().enumerate() {
        let raw = raw.map_err(|source| IngestError::Read { line, source })?;
        if raw.trim().is_empty() {
            debug!("Skipping blank line {}", line);
            continue;
        }
        engine
            .add_match(&raw)
            .map_err(|source| IngestError::Line { line, source })?;
        applied += 1;
    }
    Ok(applied)
}
