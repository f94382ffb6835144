//! Handler and option types exposed to Node.js.

use birdmock_core::config::options::{
    ListenOptions as CoreListenOptions, UnhandledRequestPolicy as CoreUnhandledRequestPolicy,
};
use birdmock_core::server::journal::{
    RequestOutcome as CoreRequestOutcome, RequestRecord as CoreRequestRecord,
};
use birdmock_core::types::handler::{Handler as CoreHandler, HandlerDefinition as CoreDefinition};
use birdmock_core::types::method::HttpMethod;
use birdmock_core::types::request::InterceptedRequest as CoreRequest;
use birdmock_core::types::response::MockResponse as CoreResponse;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::collections::HashMap;

/// What to do with a request no handler matches
#[napi(string_enum)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnhandledRequestPolicy {
    #[napi(value = "warn")]
    Warn,
    #[napi(value = "error")]
    Error,
    #[napi(value = "bypass")]
    Bypass,
}

impl From<UnhandledRequestPolicy> for CoreUnhandledRequestPolicy {
    fn from(p: UnhandledRequestPolicy) -> Self {
        match p {
            UnhandledRequestPolicy::Warn => CoreUnhandledRequestPolicy::Warn,
            UnhandledRequestPolicy::Error => CoreUnhandledRequestPolicy::Error,
            UnhandledRequestPolicy::Bypass => CoreUnhandledRequestPolicy::Bypass,
        }
    }
}

/// Options for `MockServer.listen`
#[napi(object)]
pub struct ListenOptions {
    pub on_unhandled_request: Option<UnhandledRequestPolicy>,
}

impl From<ListenOptions> for CoreListenOptions {
    fn from(o: ListenOptions) -> Self {
        o.on_unhandled_request
            .map(|p| CoreListenOptions::with_policy(p.into()))
            .unwrap_or_default()
    }
}

/// Mocked response
#[napi(object)]
#[derive(Clone)]
pub struct MockResponse {
    pub status: Option<u32>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<serde_json::Value>,
}

impl From<CoreResponse> for MockResponse {
    fn from(r: CoreResponse) -> Self {
        Self {
            status: Some(u32::from(r.status)),
            headers: Some(r.headers),
            body: r.body,
        }
    }
}

impl TryFrom<MockResponse> for CoreResponse {
    type Error = Error;

    fn try_from(r: MockResponse) -> Result<Self> {
        let status = match r.status {
            None => 200,
            Some(s @ 100..=599) => s as u16,
            Some(s) => {
                return Err(Error::from_reason(format!(
                    "Status must be between 100 and 599, got {s}"
                )))
            }
        };
        Ok(CoreResponse {
            status,
            headers: r.headers.unwrap_or_default(),
            body: r.body,
        })
    }
}

/// Declarative request handler
#[napi(object)]
#[derive(Clone)]
pub struct HandlerDefinition {
    /// HTTP method, or `ALL` to match every method
    pub method: String,
    /// Path pattern (supports `{param}`, `:param` and `*`)
    pub path: String,
    pub response: Option<MockResponse>,
}

impl From<CoreDefinition> for HandlerDefinition {
    fn from(d: CoreDefinition) -> Self {
        Self {
            method: d.method.to_string(),
            path: d.path,
            response: Some(MockResponse::from(d.response)),
        }
    }
}

impl TryFrom<HandlerDefinition> for CoreDefinition {
    type Error = Error;

    fn try_from(d: HandlerDefinition) -> Result<Self> {
        let method = d
            .method
            .parse::<HttpMethod>()
            .map_err(|e| Error::from_reason(e.to_string()))?;
        let response = d
            .response
            .map(CoreResponse::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(CoreDefinition {
            method,
            path: d.path,
            response,
        })
    }
}

/// Convert JS handler definitions into core handlers.
pub(crate) fn to_core_handlers(definitions: Vec<HandlerDefinition>) -> Result<Vec<CoreHandler>> {
    definitions
        .into_iter()
        .map(|d| {
            let definition = CoreDefinition::try_from(d)?;
            CoreHandler::try_from(definition).map_err(|e| Error::from_reason(e.to_string()))
        })
        .collect()
}

/// Outbound request captured by the test environment
#[napi(object)]
pub struct InterceptedRequest {
    pub method: String,
    pub url: String,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<serde_json::Value>,
}

impl TryFrom<InterceptedRequest> for CoreRequest {
    type Error = Error;

    fn try_from(r: InterceptedRequest) -> Result<Self> {
        let method = r
            .method
            .parse::<HttpMethod>()
            .map_err(|e| Error::from_reason(e.to_string()))?;
        Ok(CoreRequest {
            method,
            url: r.url,
            headers: r.headers.unwrap_or_default(),
            body: r.body,
        })
    }
}

/// Result of `MockServer.handle`; `response` is absent when the request passes through
#[napi(object)]
pub struct DispatchResult {
    pub mocked: bool,
    pub response: Option<MockResponse>,
}

/// A request seen while intercepting
#[napi(object)]
pub struct RequestRecord {
    pub method: String,
    pub url: String,
    /// `mocked`, `bypassed` or `unhandled`
    pub outcome: String,
    /// Label of the handler that answered, for mocked requests
    pub handler: Option<String>,
}

impl From<&CoreRequestRecord> for RequestRecord {
    fn from(r: &CoreRequestRecord) -> Self {
        let (outcome, handler) = match &r.outcome {
            CoreRequestOutcome::Mocked { handler } => ("mocked", Some(handler.clone())),
            CoreRequestOutcome::Bypassed => ("bypassed", None),
            CoreRequestOutcome::Unhandled => ("unhandled", None),
        };
        Self {
            method: r.method.to_string(),
            url: r.url.clone(),
            outcome: outcome.to_string(),
            handler,
        }
    }
}
