//! Request handlers: a method, a path pattern and a way to produce a response.

use crate::config::error::ConfigError;
use crate::types::method::HttpMethod;
use crate::types::request::MatchedRequest;
use crate::types::response::MockResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type ResolverFn = dyn Fn(&MatchedRequest<'_>) -> MockResponse + Send + Sync;

/// Produces the response for a matched request.
#[derive(Clone)]
pub enum Responder {
    /// Same response for every matched request
    Static(MockResponse),
    /// Response computed from the matched request
    Resolver(Arc<ResolverFn>),
}

impl Responder {
    pub fn respond(&self, matched: &MatchedRequest<'_>) -> MockResponse {
        match self {
            Responder::Static(response) => response.clone(),
            Responder::Resolver(resolve) => resolve(matched).ensure_content_type(),
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Static(response) => f.debug_tuple("Static").field(response).finish(),
            Responder::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Registered rule answering intercepted requests.
///
/// Handlers are immutable once built; registries replace them, never edit them.
#[derive(Debug, Clone)]
pub struct Handler {
    method: HttpMethod,
    path: String,
    responder: Responder,
}

impl Handler {
    /// Handler that always answers with `response`.
    ///
    /// A JSON body without a content type is served as `application/json`.
    pub fn new(method: HttpMethod, path: impl Into<String>, response: MockResponse) -> Self {
        Self {
            method,
            path: path.into(),
            responder: Responder::Static(response.ensure_content_type()),
        }
    }

    /// Handler whose response is computed from the matched request.
    pub fn resolver<F>(method: HttpMethod, path: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&MatchedRequest<'_>) -> MockResponse + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            responder: Responder::Resolver(Arc::new(resolve)),
        }
    }

    pub fn get(path: impl Into<String>, response: MockResponse) -> Self {
        Self::new(HttpMethod::Get, path, response)
    }

    pub fn post(path: impl Into<String>, response: MockResponse) -> Self {
        Self::new(HttpMethod::Post, path, response)
    }

    pub fn any(path: impl Into<String>, response: MockResponse) -> Self {
        Self::new(HttpMethod::Any, path, response)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Short label such as `GET /api/health`.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Declarative handler as written in a handler file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerDefinition {
    /// HTTP method (`ANY`/`ALL` matches every method)
    pub method: HttpMethod,
    /// Path pattern (supports `{param}`, `:param` and `*`)
    pub path: String,
    /// Canned response
    #[serde(default)]
    pub response: MockResponse,
}

impl TryFrom<HandlerDefinition> for Handler {
    type Error = ConfigError;

    fn try_from(definition: HandlerDefinition) -> Result<Self, Self::Error> {
        let path = definition.path.trim();
        if path.is_empty() {
            return Err(ConfigError::InvalidHandler {
                reason: format!("{} handler has an empty path", definition.method),
            });
        }
        Ok(Handler::new(definition.method, path, definition.response))
    }
}

impl TryFrom<&Handler> for HandlerDefinition {
    type Error = ConfigError;

    /// Only static handlers have a declarative form.
    fn try_from(handler: &Handler) -> Result<Self, Self::Error> {
        match &handler.responder {
            Responder::Static(response) => Ok(HandlerDefinition {
                method: handler.method,
                path: handler.path.clone(),
                response: response.clone(),
            }),
            Responder::Resolver(_) => Err(ConfigError::InvalidHandler {
                reason: format!("{} is computed and has no static form", handler.describe()),
            }),
        }
    }
}

/// Build handlers from definitions, failing on the first invalid one.
pub fn handlers_from_definitions(
    definitions: Vec<HandlerDefinition>,
) -> Result<Vec<Handler>, ConfigError> {
    definitions.into_iter().map(Handler::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::InterceptedRequest;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::HashMap;

    fn matched(request: &InterceptedRequest) -> MatchedRequest<'_> {
        MatchedRequest {
            request,
            params: HashMap::from([("id".to_owned(), "42".to_owned())]),
            query: HashMap::new(),
        }
    }

    #[rstest]
    fn test_static_responder_returns_clone() {
        let handler = Handler::get("/api/health", MockResponse::json(200, json!({"status": "ok"})));
        let request = InterceptedRequest::get("/api/health");
        let first = handler.responder().respond(&matched(&request));
        let second = handler.responder().respond(&matched(&request));
        assert_eq!(first, second);
        assert_eq!(first.body, Some(json!({"status": "ok"})));
    }

    #[rstest]
    fn test_resolver_sees_params() {
        let handler = Handler::resolver(HttpMethod::Get, "/api/birds/{id}", |req| {
            MockResponse::json(200, json!({"id": req.param("id")}))
        });
        let request = InterceptedRequest::get("/api/birds/42");
        let response = handler.responder().respond(&matched(&request));
        assert_eq!(response.body, Some(json!({"id": "42"})));
    }

    #[rstest]
    fn test_static_body_gets_json_content_type() {
        let mut response = MockResponse::new(200);
        response.body = Some(json!({"status": "ok"}));
        let handler = Handler::get("/api/health", response);
        let request = InterceptedRequest::get("/api/health");
        let served = handler.responder().respond(&matched(&request));
        assert_eq!(served.content_type(), Some("application/json"));
    }

    #[rstest]
    fn test_resolver_body_gets_json_content_type() {
        let handler = Handler::resolver(HttpMethod::Get, "/api/birds/{id}", |req| MockResponse {
            status: 200,
            headers: HashMap::new(),
            body: Some(json!({"id": req.param("id")})),
        });
        let request = InterceptedRequest::get("/api/birds/42");
        let served = handler.responder().respond(&matched(&request));
        assert_eq!(served.content_type(), Some("application/json"));
    }

    #[rstest]
    fn test_bodiless_response_has_no_content_type() {
        let handler = Handler::get("/api/health", MockResponse::new(204));
        let request = InterceptedRequest::get("/api/health");
        let served = handler.responder().respond(&matched(&request));
        assert_eq!(served.content_type(), None);
    }

    #[rstest]
    fn test_describe() {
        let handler = Handler::any("/api/*", MockResponse::new(404));
        assert_eq!(handler.describe(), "ANY /api/*");
    }

    #[rstest]
    fn test_definition_adds_json_content_type() {
        let definition = HandlerDefinition {
            method: HttpMethod::Get,
            path: "/api/health".into(),
            response: MockResponse {
                status: 200,
                headers: HashMap::new(),
                body: Some(json!({"status": "ok"})),
            },
        };
        let handler = Handler::try_from(definition).expect("Should build");
        let Responder::Static(response) = handler.responder() else {
            panic!("expected a static responder");
        };
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_definition_rejects_empty_path(#[case] path: &str) {
        let definition = HandlerDefinition {
            method: HttpMethod::Get,
            path: path.into(),
            response: MockResponse::default(),
        };
        let err = Handler::try_from(definition).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHandler { .. }));
    }

    #[rstest]
    fn test_resolver_has_no_definition() {
        let handler = Handler::resolver(HttpMethod::Get, "/x", |_| MockResponse::new(200));
        assert!(HandlerDefinition::try_from(&handler).is_err());
    }

    #[rstest]
    fn test_definition_from_yaml() {
        let yaml = "method: GET\npath: /api/health\nresponse:\n  body:\n    status: ok\n";
        let definition: HandlerDefinition = serde_yaml::from_str(yaml).expect("Should parse");
        assert_eq!(definition.method, HttpMethod::Get);
        assert_eq!(definition.response.status, 200);
        assert_eq!(definition.response.body, Some(json!({"status": "ok"})));
    }
}
