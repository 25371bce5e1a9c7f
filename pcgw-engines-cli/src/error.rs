use pcgw_engines_core::CoreError;
use pcgw_engines_wiki::WikiError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Fetching from the wiki failed
    #[error("{0}")]
    Wiki(#[from] WikiError),

    /// Reading or writing a catalog file failed
    #[error("{0}")]
    Table(#[from] CoreError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
