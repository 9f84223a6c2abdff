//! Response types for the fetch client.
//!
//! # Design
//! `Outcome` is the single shape every request resolves to. Which of `data`
//! or `error` exists is decided by the variant, so the two can never be
//! present (or absent) together. `code` is `0` only for a Network Error;
//! every HTTP response keeps its status code, successful or not.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body::BodyStream;
use crate::error::UnknownResponseType;

/// Response headers with lower-cased names.
pub type Headers = BTreeMap<String, String>;

pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// How a successful response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Json,
    Buffer,
    Stream,
    /// Discard the body without reading it.
    None,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Text => "text",
            ResponseType::Json => "json",
            ResponseType::Buffer => "buffer",
            ResponseType::Stream => "stream",
            ResponseType::None => "none",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = UnknownResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ResponseType::Text),
            "json" => Ok(ResponseType::Json),
            "buffer" => Ok(ResponseType::Buffer),
            "stream" => Ok(ResponseType::Stream),
            "none" => Ok(ResponseType::None),
            other => Err(UnknownResponseType(other.to_string())),
        }
    }
}

/// A decoded success body, one variant per `ResponseType`.
#[derive(Debug)]
pub enum ResponseData {
    Text(String),
    Json(Value),
    Buffer(Bytes),
    /// The live body. Read it to the end or drop it to free the connection.
    Stream(BodyStream),
    None,
}

impl ResponseData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseData::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn into_stream(self) -> Option<BodyStream> {
        match self {
            ResponseData::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResponseData::None)
    }
}

/// The `error` of a failed request.
///
/// A JSON error payload from the server is kept verbatim; anything else is
/// reported as `{ code, message }` with the raw body text as message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message { code: u16, message: String },
    Json(Value),
}

impl ErrorBody {
    /// `{ code: 0, message: "Network Error" }`.
    pub fn network() -> Self {
        ErrorBody::Message {
            code: 0,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// The message text, if the payload has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Message { message, .. } => Some(message),
            ErrorBody::Json(value) => value.get("message").and_then(Value::as_str),
        }
    }
}

#[derive(Debug)]
pub struct Success {
    pub data: ResponseData,
    pub code: u16,
    pub headers: Headers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub error: ErrorBody,
    pub code: u16,
    pub headers: Headers,
}

impl Failure {
    pub fn network() -> Self {
        Failure {
            error: ErrorBody::network(),
            code: 0,
            headers: Headers::new(),
        }
    }

    /// True when no HTTP response was obtained.
    pub fn is_network(&self) -> bool {
        self.code == 0
    }
}

/// What a request resolved to.
#[derive(Debug)]
pub enum Outcome {
    Success(Success),
    Failure(Failure),
}

impl Outcome {
    pub fn ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn code(&self) -> u16 {
        match self {
            Outcome::Success(success) => success.code,
            Outcome::Failure(failure) => failure.code,
        }
    }

    pub fn headers(&self) -> &Headers {
        match self {
            Outcome::Success(success) => &success.headers,
            Outcome::Failure(failure) => &failure.headers,
        }
    }

    pub fn data(&self) -> Option<&ResponseData> {
        match self {
            Outcome::Success(success) => Some(&success.data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(&failure.error),
        }
    }

    pub fn into_result(self) -> Result<Success, Failure> {
        match self {
            Outcome::Success(success) => Ok(success),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl From<Success> for Outcome {
    fn from(success: Success) -> Self {
        Outcome::Success(success)
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Outcome::Failure(failure)
    }
}
