//! Error types for the fetch client.
//!
//! # Design
//! Callers of `Client::execute` never see these directly: every failure is
//! folded into an `Outcome::Failure`. `TransportError` exists so the internal
//! steps (sending, reading the body, decoding JSON) can use `?` and the
//! executor can log the real cause before reporting a Network Error.

use thiserror::Error;

/// Failures below the HTTP layer: the request never produced a usable
/// response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Errors raised by reqwest: DNS, connect, TLS, malformed URL, aborted
    /// body, invalid header names or values.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("failed to decode JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by a caller-supplied stream or custom transport.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(message: impl Into<String>) -> Self {
        TransportError::Other(message.into())
    }
}

/// Returned when parsing a response type tag other than
/// `text`, `json`, `buffer`, `stream` or `none`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown response type `{0}`")]
pub struct UnknownResponseType(pub String);
