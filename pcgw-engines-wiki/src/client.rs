use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::WikiSettings;
use crate::error::WikiError;

/// Script under the wiki's base URL that a query is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `api.php`: MediaWiki action API and Cargo queries
    Api,
    /// `index.php`: special pages such as `Special:Ask`
    Index,
}

impl Endpoint {
    pub fn script(&self) -> &'static str {
        match self {
            Self::Api => "api.php",
            Self::Index => "index.php",
        }
    }
}

/// Issues a GET against the wiki and returns the raw response body.
///
/// An empty body is returned as an empty string, not an error; callers decide
/// what an empty page means for their query.
pub trait Transport {
    fn get_text(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String, WikiError>;
}

/// Blocking HTTP client for the wiki. One request per call, no retries.
pub struct WikiClient {
    http: Client,
    base_url: Url,
}

impl WikiClient {
    pub fn new(settings: &WikiSettings) -> Result<Self, WikiError> {
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            WikiError::config(format!("Invalid base URL '{}': {e}", settings.base_url))
        })?;

        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
        })
    }

    /// Full request URL with query parameters encoded.
    pub fn request_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url, WikiError> {
        let mut url = self
            .base_url
            .join(endpoint.script())
            .map_err(|e| WikiError::config(format!("Invalid endpoint URL: {e}")))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }
}

impl Transport for WikiClient {
    fn get_text(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String, WikiError> {
        let url = self.request_url(endpoint, params)?;
        log::debug!("GET {url}");

        let resp = self.http.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WikiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.text()?)
    }
}
