//! Typed HTTP request client.
//!
//! # Overview
//! Every request resolves to an `Outcome`: a `Success` carrying the body
//! decoded as the caller asked (`text`, `json`, `buffer`, `stream` or
//! `none`), or a `Failure` carrying one error shape for transport failures
//! (`code: 0`, "Network Error") and non-2xx responses alike. Nothing is
//! returned as `Err` and nothing panics on a bad response.
//!
//! # Design
//! - `Client` is immutable after construction: a `ClientConfig` (base URL
//!   prefix, default headers) and a `Transport`, shared through `Arc`.
//! - Building the request and parsing the response are separate, pure-ish
//!   steps around a single `Transport::send`, so both can be tested with an
//!   in-memory transport.
//! - Callers pick a delivery style through `RequestOptions`: a returned
//!   `Outcome`, or `on_success` / `on_error` callbacks with a `Dispatched`
//!   return value.
//!
//! ```no_run
//! use fetch_core::{Client, ClientConfig, RequestOptions, ResponseData};
//!
//! # async fn demo() {
//! let client = Client::with_config(ClientConfig::new().with_base("https://example.com"));
//! let outcome = client.get("/hello.json", RequestOptions::json()).await;
//! if let Some(ResponseData::Json(value)) = outcome.data() {
//!     println!("{value}");
//! }
//! # }
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod delivery;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

pub use body::{BodyStream, RequestBody};
pub use client::{parse_response, Client};
pub use config::ClientConfig;
pub use delivery::{Callbacks, Delivery, Dispatched, Returned};
pub use error::{TransportError, UnknownResponseType};
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use options::RequestOptions;
pub use transport::{ReqwestTransport, Transport};
pub use types::{ErrorBody, Failure, Headers, Outcome, ResponseData, ResponseType, Success};
