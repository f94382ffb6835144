//! Handlers shipped with the hellobirdie front-end test suite.

use crate::types::handler::{Handler, HandlerDefinition};
use crate::types::method::HttpMethod;
use crate::types::response::MockResponse;
use serde_json::json;

pub const HEALTH_PATH: &str = "/api/health";

/// Static definitions every test process starts from.
pub fn default_definitions() -> Vec<HandlerDefinition> {
    vec![HandlerDefinition {
        method: HttpMethod::Get,
        path: HEALTH_PATH.to_owned(),
        response: MockResponse::json(200, json!({ "status": "ok" })),
    }]
}

pub fn default_handlers() -> Vec<Handler> {
    default_definitions()
        .into_iter()
        .map(|d| Handler::new(d.method, d.path, d.response))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HandlerRegistry;
    use rstest::rstest;

    #[rstest]
    fn test_health_check_returns_ok_status() {
        let registry = HandlerRegistry::new(default_handlers());
        let outcome = registry.find(HttpMethod::Get, HEALTH_PATH);
        let response = outcome.response().expect("health handler should match");
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.body, Some(json!({"status": "ok"})));
    }
}
