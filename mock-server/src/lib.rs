use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const HELLO_TEXT: &str = "hello world";

/// Upper bound for `/bytes/{n}`.
pub const MAX_BYTES: usize = 1 << 20;

/// What `/echo` saw of the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub length: usize,
}

pub fn app() -> Router {
    Router::new()
        .route("/hello.json", get(hello_json))
        .route("/hello.txt", get(hello_text))
        .route("/bytes/{n}", get(bytes))
        .route("/echo", any(echo))
        .route("/status/{code}", get(status))
        .route("/error/json", get(json_error))
        .fallback(not_found)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello_json() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}

async fn hello_text() -> &'static str {
    HELLO_TEXT
}

async fn bytes(Path(n): Path<usize>) -> Result<Vec<u8>, StatusCode> {
    if n > MAX_BYTES {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok((0..n).map(|i| (i % 256) as u8).collect())
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    tracing::debug!(%method, length = body.len(), "echo");
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
        length: body.len(),
    })
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let reason = status.canonical_reason().unwrap_or_default();
    Ok((status, reason.to_string()))
}

async fn json_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "code": 422,
            "message": "title must not be empty",
            "field": "title",
        })),
    )
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
