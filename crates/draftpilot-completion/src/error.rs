//! Completion lifecycle error taxonomy
//!
//! All failures are terminal at the orchestrator boundary: nothing retries,
//! and none of them produce user-visible error UI. They exist to keep
//! diagnostics precise. Stale responses are deliberately not in this enum;
//! being overtaken is expected and frequent, not an error.

use thiserror::Error;

use draftpilot_dispatch::DispatchError;

/// Completion result type
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Reasons a completion attempt ends without a suggestion
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompletionError {
    /// No API key or URL match; the request is never issued
    #[error("configuration missing: no API key or active URL match")]
    ConfigurationMissing,

    /// The dispatcher reported a network or API failure
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The response was missing expected fields
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The editable surface could not be observed
    #[error("surface error: {0}")]
    Surface(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_errors_convert() {
        let err: CompletionError = DispatchError::MissingApiKey.into();
        assert!(matches!(err, CompletionError::Dispatch(_)));
        assert!(err.to_string().contains("API key"));
    }
}
