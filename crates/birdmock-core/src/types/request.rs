//! Requests captured by the interceptor.

use crate::matching::{parse_query_string, split_origin};
use crate::types::method::HttpMethod;
use serde_json::Value;
use std::collections::HashMap;

/// Outbound HTTP call captured during a test.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedRequest {
    /// Request method
    pub method: HttpMethod,
    /// Request URL: a path with optional query, or an absolute URL
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl InterceptedRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Path component without origin, query or fragment.
    pub fn path(&self) -> &str {
        let (_, rest) = split_origin(&self.url);
        let end = rest.find(|c: char| c == '?' || c == '#').unwrap_or(rest.len());
        match &rest[..end] {
            "" => "/",
            path => path,
        }
    }

    /// Decoded query parameters.
    pub fn query(&self) -> HashMap<String, String> {
        let without_fragment = self.url.split('#').next().unwrap_or_default();
        without_fragment
            .split_once('?')
            .map(|(_, query)| parse_query_string(query))
            .unwrap_or_default()
    }
}

/// A request together with what its handler's path pattern extracted from it.
#[derive(Debug, Clone)]
pub struct MatchedRequest<'a> {
    pub request: &'a InterceptedRequest,
    /// Named path parameters (`{id}` / `:id`), percent-decoded
    pub params: HashMap<String, String>,
    /// Query parameters, percent-decoded
    pub query: HashMap<String, String>,
}

impl MatchedRequest<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
