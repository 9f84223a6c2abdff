//! Request and response bodies.
//!
//! # Design
//! `RequestBody` is the closed set of shapes a caller can send. Its
//! `content_type` and `encode` methods are the only place that decides which
//! content-type a body implies and how it reaches the wire.
//!
//! `BodyStream` wraps a boxed byte stream and is used in both directions:
//! as a streaming upload and as the live response body. Its readers take
//! `self`, so a body can be consumed exactly once.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::HttpBody;

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8;";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8;";

type BoxedByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// A live stream of body chunks.
///
/// Dropping the stream (or calling `cancel`) before it is exhausted releases
/// the underlying connection.
pub struct BodyStream {
    inner: BoxedByteStream,
}

impl BodyStream {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    pub fn empty() -> Self {
        Self::new(stream::empty())
    }

    /// A stream yielding `bytes` as a single chunk.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::new(stream::iter(std::iter::once(Ok(bytes))))
    }

    /// Read the remaining chunks into one buffer.
    pub async fn bytes(mut self) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Read the body as text. Invalid UTF-8 sequences become U+FFFD.
    pub async fn text(self) -> Result<String, TransportError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn json(self) -> Result<Value, TransportError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Stop reading and release the connection. Never fails.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Stream for BodyStream {
    type Item = Result<Bytes, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").finish_non_exhaustive()
    }
}

/// An outgoing request body.
#[derive(Debug)]
pub enum RequestBody {
    /// Sent as UTF-8 with a `text/plain` content-type.
    Text(String),
    /// Serialized to JSON text with an `application/json` content-type.
    Json(Value),
    /// Sent verbatim, no content-type.
    Buffer(Bytes),
    /// Streamed verbatim, no content-type.
    Stream(BodyStream),
}

impl RequestBody {
    /// Serialize any structured value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(RequestBody::Json)
    }

    /// The content-type this body implies, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Text(_) => Some(TEXT_CONTENT_TYPE),
            RequestBody::Json(_) => Some(JSON_CONTENT_TYPE),
            RequestBody::Buffer(_) | RequestBody::Stream(_) => None,
        }
    }

    pub fn encode(self) -> HttpBody {
        match self {
            RequestBody::Text(text) => HttpBody::Bytes(Bytes::from(text)),
            RequestBody::Json(value) => HttpBody::Bytes(Bytes::from(value.to_string())),
            RequestBody::Buffer(bytes) => HttpBody::Bytes(bytes),
            RequestBody::Stream(stream) => HttpBody::Stream(stream),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Buffer(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Buffer(Bytes::from(bytes))
    }
}

impl From<BodyStream> for RequestBody {
    fn from(stream: BodyStream) -> Self {
        RequestBody::Stream(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunks(parts: &[&'static str]) -> BodyStream {
        let items: Vec<Result<Bytes, TransportError>> = parts
            .iter()
            .copied()
            .map(|p| Ok(Bytes::from_static(p.as_bytes())))
            .collect();
        BodyStream::new(stream::iter(items))
    }

    #[test]
    fn text_body_is_plain_text() {
        let body = RequestBody::from("hello");
        assert_eq!(body.content_type(), Some("text/plain; charset=utf-8;"));
        match body.encode() {
            HttpBody::Bytes(bytes) => assert_eq!(&bytes[..], b"hello"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn json_body_is_serialized_compactly() {
        let body = RequestBody::from(json!({"title": "Buy milk", "done": false}));
        assert_eq!(body.content_type(), Some("application/json; charset=utf-8;"));
        match body.encode() {
            HttpBody::Bytes(bytes) => {
                let parsed: Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(parsed, json!({"title": "Buy milk", "done": false}));
                assert!(!bytes.contains(&b'\n'));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn json_helper_accepts_serializable_structs() {
        #[derive(Serialize)]
        struct Todo {
            title: &'static str,
        }
        let body = RequestBody::json(&Todo { title: "x" }).unwrap();
        assert!(matches!(body, RequestBody::Json(ref v) if v["title"] == "x"));
    }

    #[test]
    fn buffer_and_stream_bodies_carry_no_content_type() {
        assert_eq!(RequestBody::from(vec![1u8, 2, 3]).content_type(), None);
        assert_eq!(RequestBody::from(BodyStream::empty()).content_type(), None);
        assert!(matches!(
            RequestBody::from(BodyStream::empty()).encode(),
            HttpBody::Stream(_)
        ));
    }

    #[tokio::test]
    async fn bytes_concatenates_chunks() {
        let bytes = chunks(&["hel", "lo ", "world"]).bytes().await.unwrap();
        assert_eq!(&bytes[..], b"hello world");
    }

    #[tokio::test]
    async fn text_replaces_invalid_utf8() {
        let text = BodyStream::from_bytes(vec![b'o', b'k', 0xff]).text().await.unwrap();
        assert_eq!(text, "ok\u{fffd}");
    }

    #[tokio::test]
    async fn json_reports_decode_errors() {
        let err = BodyStream::from_bytes("not json").json().await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn chunk_errors_abort_reading() {
        let items: Vec<Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(TransportError::other("connection reset")),
        ];
        let err = BodyStream::new(stream::iter(items)).bytes().await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn cancel_does_not_panic() {
        chunks(&["unread"]).cancel();
    }
}
