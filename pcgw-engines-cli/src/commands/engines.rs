use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pcgw_engines_core::tabular::write_rows;
use pcgw_engines_wiki::{Settings, WikiClient, fetch_engines};

use crate::error::CliError;
use crate::spinner::spinner;

use super::CatalogPaths;

/// Fetch the engine listing and write the engines file.
pub(crate) fn run_engines(
    settings: &Settings,
    paths: &CatalogPaths,
    quiet: bool,
) -> Result<usize, CliError> {
    let client = WikiClient::new(&settings.wiki)?;

    let pb = spinner("Fetching engine listing...", quiet);
    let engines = fetch_engines(&client, settings.wiki.page_size);
    pb.finish_and_clear();
    let engines = engines?;

    let count = write_rows(&paths.engines, &engines)?;

    log::info!(
        "> Read {} engines",
        count.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "> Written data to '{}'",
        paths.engines.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(count)
}
