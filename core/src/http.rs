//! HTTP transport types.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. The client builds an
//! `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and the
//! client normalizes that response. Keeping this boundary as data lets the
//! executor be tested with an in-memory transport.
//!
//! The response body stays a `BodyStream` so decoding can pick between
//! reading it fully, handing it to the caller, or dropping it unread.

use std::fmt;

use bytes::Bytes;

use crate::body::BodyStream;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded request body, ready for the wire.
#[derive(Debug)]
pub enum HttpBody {
    Bytes(Bytes),
    Stream(BodyStream),
}

/// An HTTP request described as plain data.
///
/// Built by `Client::build_request`. Header names are lower-case and unique.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response as returned by a `Transport`.
///
/// Headers are kept in the order the transport produced them; the body has
/// not been read yet.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: BodyStream,
}

impl HttpResponse {
    /// True for statuses in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Last value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
