//! The network side of a request.
//!
//! `Transport` is the seam between the executor and the network. The default
//! implementation drives a `reqwest::Client`; tests and embedders can supply
//! their own.

use async_trait::async_trait;
use futures::TryStreamExt;

use crate::body::BodyStream;
use crate::error::TransportError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};

/// Performs exactly one HTTP exchange per call.
///
/// Non-2xx statuses are responses, not errors: an implementation returns
/// `Err` only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = match body {
                HttpBody::Bytes(bytes) => builder.body(bytes),
                HttpBody::Stream(stream) => builder.body(reqwest::Body::wrap_stream(stream)),
            };
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = BodyStream::new(response.bytes_stream().map_err(TransportError::from));

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}
