pub(crate) mod config;
pub(crate) mod engines;
pub(crate) mod games;
pub(crate) mod normalize;
pub(crate) mod synonyms;

use std::path::{Path, PathBuf};

pub(crate) const ENGINES_FILE: &str = "engines_list.csv";
pub(crate) const GAMES_FILE: &str = "games.csv";
pub(crate) const GENERALIZED_FILE: &str = "games_generalized.csv";

/// Locations of the three catalog files, one per pipeline stage.
#[derive(Debug, Clone)]
pub(crate) struct CatalogPaths {
    pub(crate) engines: PathBuf,
    pub(crate) games: PathBuf,
    pub(crate) generalized: PathBuf,
}

impl CatalogPaths {
    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self {
            engines: dir.join(ENGINES_FILE),
            games: dir.join(GAMES_FILE),
            generalized: dir.join(GENERALIZED_FILE),
        }
    }
}
