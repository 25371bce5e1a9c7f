use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pcgw_engines_core::tabular::{read_rows, write_rows};
use pcgw_engines_core::{Engine, Game};
use pcgw_engines_wiki::{
    GameQuery, Settings, WikiClient, fetch_games_joined, fetch_games_per_engine,
};

use crate::error::CliError;
use crate::spinner::{engine_bar, spinner};

use super::CatalogPaths;

/// Fetch the game listing with the chosen query and write the games file.
pub(crate) fn run_games(
    settings: &Settings,
    paths: &CatalogPaths,
    strategy: GameQuery,
    quiet: bool,
) -> Result<usize, CliError> {
    let client = WikiClient::new(&settings.wiki)?;
    let page_size = settings.wiki.page_size;

    let games: Vec<Game> = match strategy {
        GameQuery::Joined => {
            let pb = spinner("Fetching game listing...", quiet);
            let games = fetch_games_joined(&client, page_size);
            pb.finish_and_clear();
            games?
        }
        GameQuery::PerEngine => {
            let engines: Vec<Engine> = read_rows(&paths.engines)?;
            let pb = engine_bar(engines.len(), quiet);
            let games = fetch_games_per_engine(&client, &engines, page_size, |engine, count| {
                pb.inc(1);
                pb.set_message(engine.title.clone());
                log::debug!("> Read {count} games with engine '{}'", engine.title);
            });
            pb.finish_and_clear();
            games?
        }
    };

    let count = write_rows(&paths.games, &games)?;

    log::info!(
        "> Read {} games ({} query)",
        count.if_supports_color(Stdout, |t| t.bold()),
        strategy,
    );
    log::info!(
        "> Written data to '{}'",
        paths.games.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(count)
}
