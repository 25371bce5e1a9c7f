use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pcgw_engines_core::{SortOrder, normalize_file};

use crate::error::CliError;

use super::CatalogPaths;

/// Rewrite the games file's engines to their families.
pub(crate) fn run_normalize(paths: &CatalogPaths, order: SortOrder) -> Result<usize, CliError> {
    let count = normalize_file(&paths.games, &paths.generalized, order)?;

    log::info!(
        "> Checked {} games (order: {})",
        count.if_supports_color(Stdout, |t| t.bold()),
        order,
    );
    log::info!(
        "> Written data to '{}'",
        paths.generalized.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(count)
}
