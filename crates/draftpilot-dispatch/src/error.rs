//! Dispatcher error types

use thiserror::Error;

/// Dispatch result type
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors that can occur while relaying a request to the AI endpoint
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// No API key configured; the request should never have been issued
    #[error("API key is not configured")]
    MissingApiKey,

    /// The endpoint answered with a non-success status
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    /// The request never got a usable answer from the network
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered 2xx but the body is not the expected shape
    #[error("API response format is invalid: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DispatchError::Network("request timeout".to_string())
        } else if err.is_decode() {
            DispatchError::MalformedResponse(err.to_string())
        } else {
            DispatchError::Network(err.to_string())
        }
    }
}
