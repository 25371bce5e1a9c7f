//! Settings for the wiki client and the normalize stage.
//!
//! Priority: env vars > config file > built-in defaults.

use std::path::PathBuf;

use pcgw_engines_core::SortOrder;
use serde::{Deserialize, Serialize};

use crate::error::WikiError;

pub const DEFAULT_BASE_URL: &str = "https://www.pcgamingwiki.com/w/";
pub const DEFAULT_USER_AGENT: &str =
    "PCGW-Game-Engines/0.2 (https://github.com/kartones/pcgw-game-engines)";
pub const DEFAULT_PAGE_SIZE: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Row cap the wiki applies to one `cargoquery` or `categorymembers` request
pub const MAX_PAGE_SIZE: usize = 500;

const ENV_BASE_URL: &str = "PCGW_ENGINES_BASE_URL";
const ENV_USER_AGENT: &str = "PCGW_ENGINES_USER_AGENT";
const ENV_PAGE_SIZE: &str = "PCGW_ENGINES_PAGE_SIZE";
const ENV_TIMEOUT_SECS: &str = "PCGW_ENGINES_TIMEOUT_SECS";

/// Effective settings after all sources are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    pub wiki: WikiSettings,
    pub normalize: NormalizeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikiSettings {
    /// Directory URL holding `api.php` and `index.php`
    pub base_url: String,
    /// Sent on every request; the wiki asks clients to identify themselves
    pub user_agent: String,
    /// Records requested per page
    pub page_size: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeSettings {
    pub order: SortOrder,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// TOML config file format. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    wiki: Option<WikiSection>,
    normalize: Option<NormalizeSection>,
}

#[derive(Debug, Default, Deserialize)]
struct WikiSection {
    base_url: Option<String>,
    user_agent: Option<String>,
    page_size: Option<usize>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct NormalizeSection {
    order: Option<SortOrder>,
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pcgw-engines").join("config.toml"))
}

impl Settings {
    /// Load settings from the environment and the config file, if present.
    pub fn load() -> Result<Self, WikiError> {
        let file = match config_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                Some(parse_config(&std::fs::read_to_string(&path)?)?)
            }
            _ => None,
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Build settings from TOML text alone, without consulting the environment.
    pub fn from_toml_str(text: &str) -> Result<Self, WikiError> {
        Self::resolve(Some(parse_config(text)?), |_| None)
    }

    fn resolve(
        file: Option<ConfigFile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, WikiError> {
        let file = file.unwrap_or_default();
        let wiki_file = file.wiki.unwrap_or_default();
        let defaults = WikiSettings::default();

        let base_url = env(ENV_BASE_URL)
            .or(wiki_file.base_url)
            .unwrap_or(defaults.base_url);

        let user_agent = env(ENV_USER_AGENT)
            .or(wiki_file.user_agent)
            .unwrap_or(defaults.user_agent);
        if user_agent.trim().is_empty() {
            return Err(WikiError::config("user_agent must not be empty"));
        }

        let page_size = match env(ENV_PAGE_SIZE) {
            Some(raw) => parse_env(ENV_PAGE_SIZE, &raw)?,
            None => wiki_file.page_size.unwrap_or(defaults.page_size),
        };
        if page_size == 0 {
            return Err(WikiError::config("page_size must be at least 1"));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(WikiError::config(format!(
                "page_size must be at most {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let timeout_secs = match env(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_env(ENV_TIMEOUT_SECS, &raw)?,
            None => wiki_file.timeout_secs.unwrap_or(defaults.timeout_secs),
        };
        if timeout_secs == 0 {
            return Err(WikiError::config("timeout_secs must be at least 1"));
        }

        let order = file
            .normalize
            .and_then(|n| n.order)
            .unwrap_or_default();

        Ok(Self {
            wiki: WikiSettings {
                base_url,
                user_agent,
                page_size,
                timeout_secs,
            },
            normalize: NormalizeSettings { order },
        })
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, WikiError> {
        toml::to_string_pretty(self)
            .map_err(|e| WikiError::config(format!("Failed to render settings: {e}")))
    }
}

fn parse_config(text: &str) -> Result<ConfigFile, WikiError> {
    toml::from_str(text).map_err(|e| WikiError::config(format!("Invalid config file: {e}")))
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, WikiError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| WikiError::config(format!("Invalid value for ${key} ('{raw}'): {e}")))
}
