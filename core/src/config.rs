//! Per-client configuration.
//!
//! # Design
//! `ClientConfig` is built once and then owned by the client, which shares
//! it read-only between clones. There is no process-wide default.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Settings applied to every request made by one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    base: Option<String>,
    headers: BTreeMap<String, String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended verbatim to every request URL. No slash handling is
    /// done: `"https://host/api"` + `"/items"` is the caller's job to get right.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Header sent with every request unless the call sets the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The effective URL for `url`.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base {
            Some(base) => format!("{base}{url}"),
            None => url.to_string(),
        }
    }
}
