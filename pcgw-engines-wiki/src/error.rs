/// Errors that can occur while querying the wiki.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Wiki API error [{code}]: {info}")]
    Api { code: String, info: String },

    #[error("Malformed {query} response: {message}. Response: {excerpt}")]
    MalformedResponse {
        query: &'static str,
        message: String,
        excerpt: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WikiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WikiError::MalformedResponse`], keeping only the first 200
    /// bytes of the body.
    pub fn malformed(query: &'static str, message: impl ToString, body: &str) -> Self {
        let mut end = body.len().min(200);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        Self::MalformedResponse {
            query,
            message: message.to_string(),
            excerpt: body[..end].to_string(),
        }
    }
}
