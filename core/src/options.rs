//! Per-call request options.

use std::collections::BTreeMap;

use crate::delivery::{Callbacks, Returned};
use crate::types::{Failure, ResponseType, Success};

/// Options for one request: the response type, per-call headers and the
/// delivery strategy.
///
/// Starts out as `RequestOptions<Returned>`; registering `on_success` or
/// `on_error` turns it into `RequestOptions<Callbacks>`.
#[derive(Debug)]
pub struct RequestOptions<D = Returned> {
    response_type: ResponseType,
    headers: BTreeMap<String, String>,
    delivery: D,
}

impl RequestOptions<Returned> {
    pub fn new(response_type: ResponseType) -> Self {
        Self {
            response_type,
            headers: BTreeMap::new(),
            delivery: Returned,
        }
    }

    pub fn text() -> Self {
        Self::new(ResponseType::Text)
    }

    pub fn json() -> Self {
        Self::new(ResponseType::Json)
    }

    pub fn buffer() -> Self {
        Self::new(ResponseType::Buffer)
    }

    pub fn stream() -> Self {
        Self::new(ResponseType::Stream)
    }

    pub fn none() -> Self {
        Self::new(ResponseType::None)
    }

    pub fn on_success<F>(self, handler: F) -> RequestOptions<Callbacks>
    where
        F: FnOnce(Success) + Send + 'static,
    {
        self.with_delivery(Callbacks::new()).on_success(handler)
    }

    pub fn on_error<F>(self, handler: F) -> RequestOptions<Callbacks>
    where
        F: FnOnce(Failure) + Send + 'static,
    {
        self.with_delivery(Callbacks::new()).on_error(handler)
    }
}

impl RequestOptions<Callbacks> {
    pub fn on_success<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(Success) + Send + 'static,
    {
        self.delivery = self.delivery.on_success(handler);
        self
    }

    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(Failure) + Send + 'static,
    {
        self.delivery = self.delivery.on_error(handler);
        self
    }
}

impl<D> RequestOptions<D> {
    /// Per-call header. Overrides a client default header of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn with_delivery<E>(self, delivery: E) -> RequestOptions<E> {
        RequestOptions {
            response_type: self.response_type,
            headers: self.headers,
            delivery,
        }
    }

    pub(crate) fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub(crate) fn into_parts(self) -> (ResponseType, BTreeMap<String, String>, D) {
        (self.response_type, self.headers, self.delivery)
    }
}
