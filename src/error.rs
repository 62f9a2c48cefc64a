use std::path::PathBuf;

use crate::config::DataSource;

/// Configuration problems. Logged and degraded, never fatal to the embedder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("dataEndpoint is required for \"{data_source}\" data source")]
    MissingEndpoint { data_source: DataSource },

    #[error("invalid dataEndpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("searchButtonSelector is blank and the built-in search button is disabled")]
    BlankSelector,
}

/// Content load failures. Any of these leaves the instance in the sticky failed state.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, #[source] source: reqwest::Error },

    #[error("HTTP error! Status: {status} ({url})")]
    Status { status: u16, url: String },

    #[error("reading {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown data structure: no array found in response")]
    UnknownShape,
}
