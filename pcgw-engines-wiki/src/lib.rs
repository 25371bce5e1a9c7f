//! PCGamingWiki query client.
//!
//! Fetches the engine listing and the game listing page by page and turns
//! the JSON results into [`pcgw_engines_core`] records.

pub mod client;
pub mod config;
pub mod error;
pub mod pager;
pub mod queries;
pub mod types;

pub use client::{Endpoint, Transport, WikiClient};
pub use config::{Settings, WikiSettings, config_path};
pub use error::WikiError;
pub use pager::{PageSource, fetch_all};
pub use queries::{
    ENGINE_DENYLIST, EngineListing, GameQuery, GamesByEngine, JoinedGames, fetch_engines,
    fetch_games_for_engine, fetch_games_joined, fetch_games_per_engine, strip_engine_prefix,
};
