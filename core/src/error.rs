//! Error types for the todo client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a response exists;
//! `TransportError` covers the cases where no response arrived at all. The
//! status bar shows the two differently, so they stay separate types.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The request never produced a response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("cannot reach {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("i/o error: {0}")]
    Io(String),
}

/// Either side of a round-trip failing.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
