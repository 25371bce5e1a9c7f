//! The wiki queries behind the engine and game listings.
//!
//! Each query is a [`PageSource`], so all of them share the pager's
//! termination rule. Games can be fetched two ways: one Cargo query joining
//! games to their engines ([`JoinedGames`], the default), or one Semantic
//! MediaWiki ask per engine ([`GamesByEngine`]).

use pcgw_engines_core::release::{year_from_release_dates, year_from_timestamp_str};
use pcgw_engines_core::{Engine, Game};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{Endpoint, Transport};
use crate::error::WikiError;
use crate::pager::{PageSource, fetch_all};
use crate::types::{
    ApiErrorBody, AskResponse, AskResult, AskResults, CargoResponse, CategoryPage,
    CategoryResponse,
};

/// Namespace prefix on engine page titles.
pub const ENGINE_PREFIX: &str = "Engine:";

/// Engine page ids that are never listed. `129401` is a malformed page that
/// the category query keeps returning.
pub const ENGINE_DENYLIST: &[&str] = &["129401"];

const ENGINES_CATEGORY: &str = "Category:Engines";

/// Remove a single leading `Engine:` from a page title.
pub fn strip_engine_prefix(title: &str) -> &str {
    title.strip_prefix(ENGINE_PREFIX).unwrap_or(title)
}

pub fn is_denied(engine_id: &str) -> bool {
    ENGINE_DENYLIST.contains(&engine_id)
}

/// Parse a response body. An empty body is `Ok(None)`; anything else must
/// parse as `T`, and an `api.php` error payload becomes [`WikiError::Api`].
fn parse_body<T: DeserializeOwned>(query: &'static str, body: &str) -> Result<Option<T>, WikiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| WikiError::malformed(query, e, body))?;

    if let Some(error) = value.get("error") {
        let error: ApiErrorBody = serde_json::from_value(error.clone())
            .map_err(|e| WikiError::malformed(query, e, body))?;
        return Err(WikiError::Api {
            code: error.code,
            info: error.info,
        });
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| WikiError::malformed(query, e, body))
}

/// Members of `Category:Engines`.
///
/// The category generator pages with a continuation token rather than a
/// numeric offset, so the token from the previous page is carried over to
/// the next call. Asking for a later page with no token outstanding returns
/// an empty page.
pub struct EngineListing<'a, T: ?Sized> {
    transport: &'a T,
    continuation: Option<Vec<(String, String)>>,
}

impl<'a, T: Transport + ?Sized> EngineListing<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            continuation: None,
        }
    }
}

impl<T: Transport + ?Sized> PageSource for EngineListing<'_, T> {
    type Record = Engine;

    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Engine>, WikiError> {
        let continuation = if offset == 0 {
            self.continuation = None;
            Vec::new()
        } else {
            match self.continuation.take() {
                Some(c) => c,
                None => return Ok(Vec::new()),
            }
        };

        let mut params: Vec<(&str, String)> = vec![
            ("action", "query".to_string()),
            ("generator", "categorymembers".to_string()),
            ("gcmtitle", ENGINES_CATEGORY.to_string()),
            ("gcmlimit", limit.to_string()),
            ("format", "json".to_string()),
        ];
        for (key, value) in &continuation {
            params.push((key.as_str(), value.clone()));
        }

        let body = self.transport.get_text(Endpoint::Api, &params)?;
        let Some(resp) = parse_body::<CategoryResponse>("engine listing", &body)? else {
            return Ok(Vec::new());
        };

        let mut engines = Vec::new();
        if let Some(query) = resp.query {
            for (_, page) in query.pages {
                let page: CategoryPage = serde_json::from_value(page)
                    .map_err(|e| WikiError::malformed("engine listing", e, &body))?;
                engines.push(Engine {
                    id: page.pageid.to_string(),
                    title: strip_engine_prefix(&page.title).to_string(),
                });
            }
        }

        self.continuation = resp.continuation.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| match v {
                    Value::String(s) => Some((k, s)),
                    Value::Number(n) => Some((k, n.to_string())),
                    _ => None,
                })
                .collect()
        });
        if engines.len() < limit && self.continuation.is_some() {
            log::warn!(
                "Engine listing returned a short page ({} of {limit}) with more results pending",
                engines.len()
            );
        }

        Ok(engines)
    }
}

/// Every game with an engine, from one Cargo join of the game and engine
/// infobox tables.
pub struct JoinedGames<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> JoinedGames<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }
}

impl<T: Transport + ?Sized> PageSource for JoinedGames<'_, T> {
    type Record = Game;

    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Game>, WikiError> {
        let params: Vec<(&str, String)> = vec![
            ("action", "cargoquery".to_string()),
            ("tables", "Infobox_game,Infobox_game_engine".to_string()),
            (
                "join_on",
                "Infobox_game._pageID=Infobox_game_engine._pageID".to_string(),
            ),
            (
                "fields",
                "Infobox_game._pageName=Page,Infobox_game_engine.Engine=Engine,\
                 Infobox_game_engine.Build=Build,Infobox_game.Released=Released"
                    .to_string(),
            ),
            (
                "order_by",
                "Infobox_game._pageName,Infobox_game_engine.Engine".to_string(),
            ),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("format", "json".to_string()),
        ];

        let body = self.transport.get_text(Endpoint::Api, &params)?;
        let Some(resp) = parse_body::<CargoResponse>("joined game listing", &body)? else {
            return Ok(Vec::new());
        };

        Ok(resp
            .cargoquery
            .into_iter()
            .map(|row| {
                let game = row.title;
                let engine = game.engine.unwrap_or_default();
                Game {
                    title: game.page,
                    engine: strip_engine_prefix(&engine).to_string(),
                    engine_build: game.build.filter(|b| !b.is_empty()),
                    release_year: year_from_release_dates(game.released.as_deref().unwrap_or("")),
                }
            })
            .collect())
    }
}

/// Games using one engine, from a Semantic MediaWiki ask query.
///
/// The wiki does not report a build here, and the engine column is the
/// queried engine title.
pub struct GamesByEngine<'a, T: ?Sized> {
    transport: &'a T,
    engine: &'a str,
}

impl<'a, T: Transport + ?Sized> GamesByEngine<'a, T> {
    pub fn new(transport: &'a T, engine: &'a str) -> Self {
        Self { transport, engine }
    }
}

impl<T: Transport + ?Sized> PageSource for GamesByEngine<'_, T> {
    type Record = Game;

    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Game>, WikiError> {
        let params: Vec<(&str, String)> = vec![
            ("title", "Special:Ask".to_string()),
            (
                "q",
                format!(
                    "[[Category:Games]] [[Uses engine::{ENGINE_PREFIX}{}]]",
                    self.engine
                ),
            ),
            ("po", "?Release date#ISO|+order=asc|+limit=1\n".to_string()),
            ("p", "format=json".to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];

        let body = self.transport.get_text(Endpoint::Index, &params)?;
        let Some(resp) = parse_body::<AskResponse>("per-engine game listing", &body)? else {
            return Ok(Vec::new());
        };

        let results = match resp.results {
            AskResults::Found(map) => map,
            AskResults::Empty(items) if items.is_empty() => return Ok(Vec::new()),
            AskResults::Empty(_) => {
                return Err(WikiError::malformed(
                    "per-engine game listing",
                    "results is a non-empty array",
                    &body,
                ));
            }
        };

        let mut games = Vec::with_capacity(results.len());
        for (_, value) in results {
            let result: AskResult = serde_json::from_value(value)
                .map_err(|e| WikiError::malformed("per-engine game listing", e, &body))?;
            let release_year = result
                .first_release_timestamp()
                .and_then(|ts| year_from_timestamp_str(&ts))
                .unwrap_or_default();
            games.push(Game {
                title: result.fulltext,
                engine: self.engine.to_string(),
                engine_build: None,
                release_year,
            });
        }

        Ok(games)
    }
}

/// How the game listing is fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameQuery {
    /// One Cargo query over all games
    #[default]
    Joined,
    /// One ask query per engine from the engine listing
    PerEngine,
}

impl std::fmt::Display for GameQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joined => f.write_str("joined"),
            Self::PerEngine => f.write_str("per-engine"),
        }
    }
}

/// Error returned when a string is not a known [`GameQuery`].
#[derive(Debug, Clone)]
pub struct GameQueryParseError(pub String);

impl std::fmt::Display for GameQueryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown game query: '{}' (expected 'joined' or 'per-engine')",
            self.0
        )
    }
}

impl std::error::Error for GameQueryParseError {}

impl std::str::FromStr for GameQuery {
    type Err = GameQueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "joined" | "cargo" => Ok(Self::Joined),
            "per-engine" | "ask" => Ok(Self::PerEngine),
            _ => Err(GameQueryParseError(s.to_string())),
        }
    }
}

/// Fetch the engine listing, minus denylisted pages.
///
/// The denylist is applied after paging so a dropped record can never make a
/// full page look short.
pub fn fetch_engines<T: Transport + ?Sized>(
    transport: &T,
    page_size: usize,
) -> Result<Vec<Engine>, WikiError> {
    let mut source = EngineListing::new(transport);
    let engines = fetch_all(&mut source, page_size)?;
    let fetched = engines.len();
    let engines: Vec<Engine> = engines.into_iter().filter(|e| !is_denied(&e.id)).collect();
    if engines.len() != fetched {
        log::debug!("Dropped {} denylisted engines", fetched - engines.len());
    }
    Ok(engines)
}

/// Fetch all games through the joined Cargo query.
pub fn fetch_games_joined<T: Transport + ?Sized>(
    transport: &T,
    page_size: usize,
) -> Result<Vec<Game>, WikiError> {
    fetch_all(&mut JoinedGames::new(transport), page_size)
}

/// Fetch the games of one engine.
pub fn fetch_games_for_engine<T: Transport + ?Sized>(
    transport: &T,
    engine_title: &str,
    page_size: usize,
) -> Result<Vec<Game>, WikiError> {
    fetch_all(&mut GamesByEngine::new(transport, engine_title), page_size)
}

/// Fetch the games of every engine in turn, calling `on_engine` with each
/// engine and its game count. Engines without games contribute nothing.
pub fn fetch_games_per_engine<T: Transport + ?Sized>(
    transport: &T,
    engines: &[Engine],
    page_size: usize,
    mut on_engine: impl FnMut(&Engine, usize),
) -> Result<Vec<Game>, WikiError> {
    let mut games = Vec::new();
    for engine in engines {
        let engine_games = fetch_games_for_engine(transport, &engine.title, page_size)?;
        on_engine(engine, engine_games.len());
        games.extend(engine_games);
    }
    Ok(games)
}

#[cfg(test)]
#[path = "tests/queries_tests.rs"]
mod tests;
