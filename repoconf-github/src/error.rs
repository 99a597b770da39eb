//! Error types for repoconf-github.

use thiserror::Error;

/// All errors that can arise from GitHub API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The GraphQL envelope carried an `errors` array; holds the first message verbatim.
    #[error("request failed with error '{message}'")]
    Api { message: String },

    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Network-level failure (DNS, TLS, connection reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A GraphQL envelope with neither `data` nor `errors`.
    #[error("GraphQL response contained no data")]
    MissingData,
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => ApiError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
        }
    }
}
