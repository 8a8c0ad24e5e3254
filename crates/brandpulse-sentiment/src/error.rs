use reqwest::StatusCode;
use thiserror::Error;

/// Why a news source returned no mentions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend needs an API key and none is configured.
    #[error("{backend} API key is not configured")]
    MissingApiKey { backend: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{backend} returned status {status}")]
    Status {
        backend: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The body did not match the expected shape. `body` holds the raw
    /// response (truncated) for the operator log.
    #[error("unexpected {backend} response: {error}")]
    Parse {
        backend: &'static str,
        #[source]
        error: serde_json::Error,
        body: String,
    },
}

/// Why a classifier could not produce a sentiment.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("sentiment API token is not configured")]
    MissingToken,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentiment service returned status {status}")]
    Status { status: StatusCode, body: String },

    /// The model was still loading after the single retry.
    #[error("sentiment model still loading after retry")]
    ModelLoading,

    #[error("unexpected sentiment response: {error}")]
    Parse {
        #[source]
        error: serde_json::Error,
        body: String,
    },

    #[error("sentiment service returned no candidates")]
    EmptyResponse,
}

/// Longest slice of a raw response body kept in an error for logging.
pub(crate) const MAX_LOGGED_BODY: usize = 500;

/// Truncate a response body to [`MAX_LOGGED_BODY`] characters for logging.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(MAX_LOGGED_BODY).collect()
}
