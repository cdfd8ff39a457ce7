//! Uniform error type for catalog API calls.
//!
//! Every failure that can happen while talking to the catalog (transport
//! errors, non-success statuses, undecodable bodies, panicking requests) is
//! funneled into a single [`ParsedError`] carrying a human-readable message.

use std::any::Any;

use thiserror::Error;

/// Message used when a failure carries nothing we can display.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// The only error kind that reaches view logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParsedError {
    message: String,
}

impl ParsedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Fallback for failures with no usable message
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_MESSAGE)
    }

    /// Error for a non-success HTTP status without a usable error body
    pub fn http_status(status: u16) -> Self {
        Self::new(format!("HTTP error! status: {}", status))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Normalize an arbitrary value into a [`ParsedError`].
///
/// Error values keep their message, string values become the message, and
/// anything else maps to [`UNKNOWN_ERROR_MESSAGE`]. This is what turns panic
/// payloads into something the UI can show.
pub fn parse_error(error: &(dyn Any + Send)) -> ParsedError {
    if let Some(err) = error.downcast_ref::<ParsedError>() {
        err.clone()
    } else if let Some(err) = error.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>() {
        ParsedError::new(err.to_string())
    } else if let Some(message) = error.downcast_ref::<String>() {
        ParsedError::new(message.as_str())
    } else if let Some(message) = error.downcast_ref::<&'static str>() {
        ParsedError::new(*message)
    } else {
        ParsedError::unknown()
    }
}

impl From<reqwest::Error> for ParsedError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for ParsedError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ParsedError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ParsedError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
