//! Canned responses returned for matched requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

fn default_status() -> u16 {
    200
}

/// Mocked HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockResponse {
    /// HTTP status code (defaults to 200)
    #[serde(default = "default_status")]
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Response body (JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl MockResponse {
    /// Empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// JSON response, with `Content-Type: application/json`.
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status).with_json_body(body)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.ensure_content_type()
    }

    /// Header lookup, case-insensitive on the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Adds a JSON content type when there is a body and no explicit content type.
    pub(crate) fn ensure_content_type(mut self) -> Self {
        if self.body.is_some() && self.content_type().is_none() {
            self.headers
                .insert(CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned());
        }
        self
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::new(default_status())
    }
}
