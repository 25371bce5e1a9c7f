//! Engine normalization over a fetched games file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::records::{Game, NormalizedGame};
use crate::synonyms::canonical_engine;
use crate::tabular;

/// Row order of the normalized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the order of the input file
    Source,
    /// Sort by engine family, then by title
    #[default]
    EngineTitle,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::EngineTitle => "engine-title",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`SortOrder`].
#[derive(Debug, Clone)]
pub struct SortOrderParseError(pub String);

impl std::fmt::Display for SortOrderParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort order: '{}' (expected 'source' or 'engine-title')",
            self.0
        )
    }
}

impl std::error::Error for SortOrderParseError {}

impl std::str::FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "engine-title" | "engine" => Ok(Self::EngineTitle),
            _ => Err(SortOrderParseError(s.to_string())),
        }
    }
}

/// Normalize every game. The output has exactly one row per input row;
/// games whose engines collapse into the same family are all kept.
pub fn normalize_games(games: &[Game], order: SortOrder) -> Vec<NormalizedGame> {
    let mut out: Vec<NormalizedGame> = games.iter().map(Game::normalized).collect();
    if order == SortOrder::EngineTitle {
        // stable, so equal (engine, title) pairs keep source order
        out.sort_by(|a, b| (&a.engine, &a.title).cmp(&(&b.engine, &b.title)));
    }
    out
}

/// Read a games file, normalize it and write the result. Returns the number
/// of rows written.
pub fn normalize_file(input: &Path, output: &Path, order: SortOrder) -> Result<usize, CoreError> {
    let games: Vec<Game> = tabular::read_rows(input)?;
    let normalized = normalize_games(&games, order);

    let renamed = games
        .iter()
        .filter(|g| canonical_engine(&g.engine) != g.engine)
        .count();
    log::debug!(
        "{} of {} engine names collapsed into a family",
        renamed,
        games.len()
    );

    tabular::write_rows(output, &normalized)
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
