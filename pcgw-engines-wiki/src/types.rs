//! Response bodies of the three wiki queries.
//!
//! Only the fields the catalog uses are modelled. Maps keyed by page id or
//! page name are kept as `serde_json::Map` so records come out in the order
//! the wiki sent them.

use serde::Deserialize;
use serde_json::{Map, Value};

/// `{"error": {"code": ..., "info": ...}}` returned by `api.php` on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// MediaWiki `action=query` with `generator=categorymembers`.
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    /// Absent when the category has no members
    #[serde(default)]
    pub query: Option<CategoryQuery>,
    /// Parameters to send back verbatim to get the next batch
    #[serde(rename = "continue", default)]
    pub continuation: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Page id (as a string key) to page
    #[serde(default)]
    pub pages: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPage {
    pub pageid: u64,
    pub title: String,
}

/// Cargo `action=cargoquery` over the game and engine infobox tables.
#[derive(Debug, Deserialize)]
pub struct CargoResponse {
    pub cargoquery: Vec<CargoRow>,
}

#[derive(Debug, Deserialize)]
pub struct CargoRow {
    pub title: CargoGame,
}

#[derive(Debug, Deserialize)]
pub struct CargoGame {
    #[serde(rename = "Page")]
    pub page: String,
    #[serde(rename = "Engine", default)]
    pub engine: Option<String>,
    #[serde(rename = "Build", default)]
    pub build: Option<String>,
    /// `;`-separated ISO dates
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
}

/// Semantic MediaWiki `Special:Ask` JSON export.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub results: AskResults,
}

/// PHP encodes an empty associative array as `[]`, so an empty result set
/// arrives as a JSON array rather than an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AskResults {
    Found(Map<String, Value>),
    Empty(Vec<Value>),
}

#[derive(Debug, Deserialize)]
pub struct AskResult {
    pub fulltext: String,
    #[serde(default)]
    pub printouts: Value,
}

impl AskResult {
    /// Timestamp of the first `Release date` printout, if any.
    ///
    /// SMW emits timestamps as strings, but numbers are accepted as well.
    pub fn first_release_timestamp(&self) -> Option<String> {
        let first = self
            .printouts
            .get("Release date")?
            .as_array()?
            .first()?
            .get("timestamp")?;
        match first {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
