//! Error types for the product API client.
//!
//! # Design
//! The screen collapses every failure into one static alert per operation,
//! so callers rarely branch on the variant — but the host logs errors before
//! surfacing them, and the variants keep the log lines useful. Transport
//! failures (`RequestFailed`) are raised by the host, which is the only
//! party that ever touches a socket; the remaining variants come out of the
//! parse methods.

use std::fmt;

/// Errors reported by `ProductClient` parse methods and by hosts executing
/// the requests it builds.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, DNS, or
    /// transfer failure). Raised by the host, not by the core.
    RequestFailed(String),

    /// The server answered outside the 2xx class. Carries the raw status
    /// and body for the log.
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed(msg) => write!(f, "request failed: {msg}"),
            ApiError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
