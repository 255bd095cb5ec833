// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request data handed to view data sources.
//!
//! [`ViewRequest`] is a plain snapshot of the parts of an HTTP request a data
//! source may look at, so sources can be unit tested without a server.

use std::collections::HashMap;

use axum::http::request::Parts;
use serde_json::{Map, Value};

/// A platform-agnostic view request.
///
/// # Example
///
/// ```rust
/// use viewkit::ViewRequest;
///
/// let request = ViewRequest::new("/", "GET").with_query_string("view=todos&page=2");
/// assert_eq!(request.query("view"), Some("todos"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// The request path (e.g. "/app")
    pub path: String,

    /// The HTTP method
    pub method: String,

    /// HTTP headers, names lowercased
    pub headers: HashMap<String, String>,

    /// Query parameters in request order; keys may repeat
    pub query_pairs: Vec<(String, String)>,
}

impl ViewRequest {
    /// Creates a request with the given path and method.
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            headers: HashMap::new(),
            query_pairs: Vec::new(),
        }
    }

    /// Builds a request from axum request parts.
    ///
    /// A repeated header keeps its first value.
    pub fn from_parts(parts: &Parts) -> Self {
        let mut headers = HashMap::new();
        for (name, value) in &parts.headers {
            if let Ok(value) = value.to_str() {
                headers.entry(name.as_str().to_ascii_lowercase()).or_insert_with(|| value.to_string());
            }
        }

        Self::new(parts.uri.path(), parts.method.as_str())
            .with_headers(headers)
            .with_query_string(parts.uri.query().unwrap_or_default())
    }

    /// Adds headers to the request. Names are lowercased.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        self
    }

    /// Adds a single header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Parses a URL-encoded query string (without the leading `?`).
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query_pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        self
    }

    /// Appends a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_pairs.push((key.into(), value.into()));
        self
    }

    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the first value of a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value of a query parameter.
    pub fn query_all(&self, key: &str) -> Vec<&str> {
        self.query_pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns the query parameters as a JSON object of strings.
    ///
    /// Repeated keys keep their first value.
    pub fn query_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        for (k, v) in &self.query_pairs {
            if !object.contains_key(k) {
                object.insert(k.clone(), Value::String(v.clone()));
            }
        }
        object
    }
}
