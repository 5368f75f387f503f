use thiserror::Error;

/// Errors surfaced by the portal API client.
///
/// `Api` carries the server-supplied `error` message when the response body
/// provides one, so callers can show it to the user verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not configured: {0}")]
    Config(String),

    #[error("Session expired")]
    Unauthorized,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the operation may be retried as-is by the user.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ApiError::Api(_) | ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
