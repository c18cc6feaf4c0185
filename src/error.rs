//! Application error types using thiserror
//!
//! The parsing pipeline itself is infallible: unrecognized or malformed
//! input degrades to an absent stage result instead of an error. The only
//! fallible boundary is the injected lookup capabilities, whose failures
//! are isolated per record and reported through `LookupError`.

use thiserror::Error;

/// Errors reported by an injected alert or compatibility-score lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// The lookup's backing service rejected the request
    #[error("lookup rejected for '{subject}': {message}")]
    Rejected { subject: String, message: String },

    /// The lookup did not complete within the caller's deadline
    #[error("lookup timed out for '{subject}'")]
    TimedOut { subject: String },

    /// The lookup returned a payload the caller could not interpret
    #[error("lookup returned an unusable response for '{subject}': {message}")]
    UnusableResponse { subject: String, message: String },

    /// Any other failure from the caller's lookup implementation
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LookupError {
    /// Convenience constructor for a rejected lookup
    pub fn rejected(subject: impl Into<String>, message: impl Into<String>) -> Self {
        LookupError::Rejected {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
