//! Request execution.
//!
//! # Design
//! `Client` holds an immutable `ClientConfig` and a `Transport`, both behind
//! `Arc`, so clones are cheap and can be used from many tasks at once.
//!
//! One request is three steps:
//! - `build_request` resolves the URL, merges headers and encodes the body
//!   without touching the network.
//! - the transport performs the exchange.
//! - `parse_response` lower-cases the response headers and decodes the body
//!   into a success or an HTTP error.
//!
//! Any error from the last two steps becomes a Network Error (`code: 0`).
//! The resulting `Outcome` is then handed to the delivery strategy carried by
//! `RequestOptions`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::body::{BodyStream, RequestBody};
use crate::config::ClientConfig;
use crate::delivery::Delivery;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ErrorBody, Failure, Headers, Outcome, ResponseData, ResponseType, Success};

/// HTTP client that resolves every request to an `Outcome`.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Reuse an existing reqwest client (proxies, TLS roots, pool settings).
    pub fn from_reqwest(client: reqwest::Client, config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::from_client(client))
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get<D: Delivery>(&self, url: &str, options: RequestOptions<D>) -> D::Output {
        self.execute(HttpMethod::Get, url, None, options).await
    }

    pub async fn post<D: Delivery>(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions<D>,
    ) -> D::Output {
        self.execute(HttpMethod::Post, url, body, options).await
    }

    pub async fn put<D: Delivery>(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions<D>,
    ) -> D::Output {
        self.execute(HttpMethod::Put, url, body, options).await
    }

    pub async fn patch<D: Delivery>(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions<D>,
    ) -> D::Output {
        self.execute(HttpMethod::Patch, url, body, options).await
    }

    pub async fn delete<D: Delivery>(
        &self,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions<D>,
    ) -> D::Output {
        self.execute(HttpMethod::Delete, url, body, options).await
    }

    /// HEAD request. The response type is always `text`, whatever `options`
    /// asked for.
    pub async fn head<D: Delivery>(&self, url: &str, options: RequestOptions<D>) -> D::Output {
        let options = options.with_response_type(ResponseType::Text);
        self.execute(HttpMethod::Head, url, None, options).await
    }

    /// Send one request and deliver its outcome through `options`.
    pub async fn execute<D: Delivery>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<RequestBody>,
        options: RequestOptions<D>,
    ) -> D::Output {
        let (response_type, headers, delivery) = options.into_parts();
        let request = self.build_request(method, url, body, &headers);
        let outcome = self.exchange(request, response_type).await;
        delivery.deliver(outcome)
    }

    /// Build the request `execute` would send.
    ///
    /// Headers are merged in order: the content-type implied by `body`, the
    /// client defaults, then `headers`. Later entries win; names are compared
    /// case-insensitively and sent lower-cased.
    pub fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<RequestBody>,
        headers: &BTreeMap<String, String>,
    ) -> HttpRequest {
        let mut merged = BTreeMap::new();
        if let Some(content_type) = body.as_ref().and_then(RequestBody::content_type) {
            merged.insert("content-type".to_string(), content_type.to_string());
        }
        for (name, value) in self.config.headers().iter().chain(headers) {
            merged.insert(name.to_ascii_lowercase(), value.clone());
        }

        HttpRequest {
            method,
            url: self.config.resolve(url),
            headers: merged.into_iter().collect(),
            body: body.map(RequestBody::encode),
        }
    }

    async fn exchange(&self, request: HttpRequest, response_type: ResponseType) -> Outcome {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, %response_type, "sending request");

        let result = match self.transport.send(request).await {
            Ok(response) => parse_response(response, response_type).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(outcome) => {
                debug!(%method, %url, code = outcome.code(), ok = outcome.ok(), "request completed");
                outcome
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "request failed, reporting Network Error");
                Outcome::Failure(Failure::network())
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Normalize a transport response into an `Outcome`.
///
/// `Err` means the body could not be read or a `json` success body did not
/// parse; the executor reports both as a Network Error.
pub async fn parse_response(
    response: HttpResponse,
    response_type: ResponseType,
) -> Result<Outcome, TransportError> {
    let code = response.status;
    let headers = collect_headers(&response.headers);

    if response.is_success() {
        let data = decode_body(response.body, response_type).await?;
        return Ok(Outcome::Success(Success {
            data,
            code,
            headers,
        }));
    }

    let error = decode_error(response.body, code, &headers).await?;
    Ok(Outcome::Failure(Failure {
        error,
        code,
        headers,
    }))
}

/// Lower-case every name; a repeated header keeps its last value.
fn collect_headers(raw: &[(String, String)]) -> Headers {
    raw.iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

async fn decode_body(
    body: BodyStream,
    response_type: ResponseType,
) -> Result<ResponseData, TransportError> {
    let data = match response_type {
        ResponseType::Text => ResponseData::Text(body.text().await?),
        ResponseType::Json => ResponseData::Json(body.json().await?),
        ResponseType::Buffer => ResponseData::Buffer(body.bytes().await?),
        ResponseType::Stream => ResponseData::Stream(body),
        ResponseType::None => {
            body.cancel();
            ResponseData::None
        }
    };
    Ok(data)
}

async fn decode_error(
    body: BodyStream,
    code: u16,
    headers: &Headers,
) -> Result<ErrorBody, TransportError> {
    let raw = body.bytes().await?;

    let is_json = headers
        .get("content-type")
        .is_some_and(|content_type| content_type.contains("json"));
    if is_json {
        match serde_json::from_slice(&raw) {
            Ok(payload) => return Ok(ErrorBody::Json(payload)),
            Err(err) => debug!(code, error = %err, "JSON error body did not parse, keeping it as text"),
        }
    }

    Ok(ErrorBody::Message {
        code,
        message: String::from_utf8_lossy(&raw).into_owned(),
    })
}
