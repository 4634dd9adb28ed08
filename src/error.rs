//! Fetch failure type shared by loaders and the state machine.

use thiserror::Error;

/// Why a record fetch failed.
///
/// The state machine treats this type as opaque: any loader failure surfaces
/// uniformly as [`AppState::Failed`](crate::AppState::Failed) and the only
/// recovery path is a `Refresh` input. The variants exist so that loader
/// implementations can propagate their underlying causes with `?`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP transport failure (connection, timeout, non-2xx status).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// An inspection date field did not match the wire format.
    #[error("invalid inspection date: {0}")]
    Date(#[from] chrono::ParseError),

    /// Loader-defined failure with no structured cause.
    #[error("{0}")]
    Loader(String),
}

impl LoadError {
    /// Build a loader-defined failure from a message.
    pub fn loader(message: impl Into<String>) -> Self {
        Self::Loader(message.into())
    }
}
