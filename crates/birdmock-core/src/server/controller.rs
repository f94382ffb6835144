//! Interceptor controller: lifecycle state plus request routing.
//!
//! `MockServer` owns the handler registry and moves between two states:
//! `Idle` and `Intercepting`. Only `start`, `reset_handlers` and `stop` change
//! what the interceptor does; `handle` only reads the registry.

use crate::config::options::{ListenOptions, UnhandledRequestPolicy};
use crate::error::HarnessError;
use crate::registry::{HandlerRegistry, MatchOutcome};
use crate::server::journal::{RequestOutcome, RequestRecord};
use crate::types::handler::Handler;
use crate::types::method::HttpMethod;
use crate::types::request::InterceptedRequest;
use crate::types::response::MockResponse;
use tracing::{debug, error, warn};

/// What the interceptor did with an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Answered from the registry
    Mocked(MockResponse),
    /// Not intercepted; the caller performs the real request
    Passthrough,
}

impl Dispatch {
    pub fn into_response(self) -> Option<MockResponse> {
        match self {
            Dispatch::Mocked(response) => Some(response),
            Dispatch::Passthrough => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Intercepting { policy: UnhandledRequestPolicy },
}

#[derive(Debug, Clone)]
pub struct MockServer {
    registry: HandlerRegistry,
    state: State,
    journal: Vec<RequestRecord>,
}

impl MockServer {
    /// Create an idle server from the static handler list.
    pub fn new(handlers: Vec<Handler>) -> Self {
        Self {
            registry: HandlerRegistry::new(handlers),
            state: State::Idle,
            journal: Vec::new(),
        }
    }

    /// Begin intercepting.
    ///
    /// Returns [`HarnessError::AlreadyListening`] if interception is already running.
    pub fn start(&mut self, options: ListenOptions) -> Result<(), HarnessError> {
        if self.is_listening() {
            error!("interception started twice");
            return Err(HarnessError::AlreadyListening);
        }
        self.state = State::Intercepting {
            policy: options.on_unhandled_request,
        };
        debug!(
            policy = %options.on_unhandled_request,
            handlers = self.registry.handlers().len(),
            "interception started"
        );
        Ok(())
    }

    /// End interception.
    ///
    /// Returns [`HarnessError::NotListening`] unless paired with a prior `start`.
    pub fn stop(&mut self) -> Result<(), HarnessError> {
        if !self.is_listening() {
            return Err(HarnessError::NotListening);
        }
        self.state = State::Idle;
        self.journal.clear();
        debug!("interception stopped");
        Ok(())
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, State::Intercepting { .. })
    }

    /// Active unmatched-request policy, `None` while idle.
    pub fn policy(&self) -> Option<UnhandledRequestPolicy> {
        match self.state {
            State::Idle => None,
            State::Intercepting { policy } => Some(policy),
        }
    }

    /// Add per-test handlers ahead of the registered ones.
    pub fn use_handlers(&mut self, handlers: Vec<Handler>) {
        debug!(count = handlers.len(), "handlers overridden");
        self.registry.use_handlers(handlers);
    }

    /// Restore the initial handlers and forget recorded requests.
    pub fn reset_handlers(&mut self) {
        self.registry.reset();
        self.journal.clear();
    }

    /// Replace the initial handlers, then reset to them.
    pub fn reset_handlers_with(&mut self, handlers: Vec<Handler>) {
        self.registry.reset_with(handlers);
        self.journal.clear();
    }

    pub fn list_handlers(&self) -> &[Handler] {
        self.registry.handlers()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Requests seen since the last reset.
    pub fn requests(&self) -> &[RequestRecord] {
        &self.journal
    }

    /// Route an outbound request.
    ///
    /// Matched requests are answered from the registry. Unmatched ones follow
    /// the policy given to `start`: `error` fails with
    /// [`HarnessError::UnhandledRequest`], `warn` and `bypass` pass through.
    pub fn handle(&mut self, request: &InterceptedRequest) -> Result<Dispatch, HarnessError> {
        let State::Intercepting { policy } = self.state else {
            return Ok(Dispatch::Passthrough);
        };

        let (outcome, result) = match self.registry.resolve(request) {
            MatchOutcome::Matched { handler, response } => (
                RequestOutcome::Mocked { handler },
                Ok(Dispatch::Mocked(response)),
            ),
            MatchOutcome::NoMatch => match policy {
                UnhandledRequestPolicy::Error => {
                    error!(method = %request.method, url = %request.url, "unhandled request");
                    (
                        RequestOutcome::Unhandled,
                        Err(HarnessError::UnhandledRequest {
                            method: request.method,
                            url: request.url.clone(),
                        }),
                    )
                }
                UnhandledRequestPolicy::Warn => {
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        "captured a request without a matching handler"
                    );
                    (RequestOutcome::Bypassed, Ok(Dispatch::Passthrough))
                }
                UnhandledRequestPolicy::Bypass => {
                    debug!(method = %request.method, url = %request.url, "request bypassed");
                    (RequestOutcome::Bypassed, Ok(Dispatch::Passthrough))
                }
            },
        };

        self.journal.push(RequestRecord {
            method: request.method,
            url: request.url.clone(),
            outcome,
        });
        result
    }

    /// Shorthand for handling a bodiless request.
    pub fn fetch(&mut self, method: HttpMethod, url: &str) -> Result<Dispatch, HarnessError> {
        self.handle(&InterceptedRequest::new(method, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::default_handlers;
    use rstest::rstest;
    use serde_json::json;

    fn listening(policy: UnhandledRequestPolicy) -> MockServer {
        let mut server = MockServer::new(default_handlers());
        server
            .start(ListenOptions::with_policy(policy))
            .expect("should start");
        server
    }

    #[rstest]
    fn test_new_server_is_idle() {
        let server = MockServer::new(default_handlers());
        assert!(!server.is_listening());
        assert_eq!(server.policy(), None);
        assert_eq!(server.list_handlers().len(), 1);
    }

    #[rstest]
    fn test_health_request() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        let response = server
            .fetch(HttpMethod::Get, "/api/health")
            .expect("should match")
            .into_response()
            .expect("should be mocked");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"status": "ok"})));
    }

    #[rstest]
    fn test_query_holding_url_still_matches_path() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        let response = server
            .fetch(HttpMethod::Get, "/api/health?next=http://localhost/home")
            .expect("should match")
            .into_response()
            .expect("should be mocked");
        assert_eq!(response.body, Some(json!({"status": "ok"})));
    }

    #[rstest]
    fn test_json_body_without_header_served_as_json() {
        let mut body_only = MockResponse::new(200);
        body_only.body = Some(json!({"status": "ok"}));
        let mut server = MockServer::new(vec![Handler::get("/api/health", body_only)]);
        server.start(ListenOptions::strict()).expect("should start");
        let response = server
            .fetch(HttpMethod::Get, "/api/health")
            .expect("should match")
            .into_response()
            .expect("should be mocked");
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[rstest]
    fn test_unknown_request_fails_under_error_policy() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        let err = server.fetch(HttpMethod::Get, "/api/unknown").unwrap_err();
        assert!(matches!(
            err,
            HarnessError::UnhandledRequest { method: HttpMethod::Get, ref url } if url == "/api/unknown"
        ));
        assert_eq!(server.requests()[0].outcome, RequestOutcome::Unhandled);
    }

    #[rstest]
    #[case(UnhandledRequestPolicy::Warn)]
    #[case(UnhandledRequestPolicy::Bypass)]
    fn test_unknown_request_passes_through(#[case] policy: UnhandledRequestPolicy) {
        let mut server = listening(policy);
        let dispatch = server
            .fetch(HttpMethod::Get, "/api/unknown")
            .expect("should pass through");
        assert_eq!(dispatch, Dispatch::Passthrough);
        assert_eq!(server.requests()[0].outcome, RequestOutcome::Bypassed);
    }

    #[rstest]
    fn test_idle_server_does_not_intercept() {
        let mut server = MockServer::new(default_handlers());
        let dispatch = server
            .fetch(HttpMethod::Get, "/api/health")
            .expect("idle server never fails");
        assert_eq!(dispatch, Dispatch::Passthrough);
        assert!(server.requests().is_empty());
    }

    #[rstest]
    fn test_double_start_is_rejected() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        let err = server.start(ListenOptions::strict()).unwrap_err();
        assert!(matches!(err, HarnessError::AlreadyListening));
        assert_eq!(server.policy(), Some(UnhandledRequestPolicy::Error));
    }

    #[rstest]
    fn test_stop_without_start_is_rejected() {
        let mut server = MockServer::new(default_handlers());
        assert!(matches!(server.stop(), Err(HarnessError::NotListening)));
    }

    #[rstest]
    fn test_start_stop_start_cycle() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        server.stop().expect("should stop");
        assert!(matches!(server.stop(), Err(HarnessError::NotListening)));
        server
            .start(ListenOptions::with_policy(UnhandledRequestPolicy::Bypass))
            .expect("should restart");
        assert_eq!(server.policy(), Some(UnhandledRequestPolicy::Bypass));
    }

    #[rstest]
    fn test_reset_discards_overrides_and_journal() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        server.use_handlers(vec![Handler::get(
            "/api/health",
            MockResponse::json(503, json!({"status": "down"})),
        )]);
        let status = server
            .fetch(HttpMethod::Get, "/api/health")
            .ok()
            .and_then(Dispatch::into_response)
            .map(|r| r.status);
        assert_eq!(status, Some(503));
        assert_eq!(server.requests().len(), 1);

        server.reset_handlers();
        assert!(server.requests().is_empty());
        let status = server
            .fetch(HttpMethod::Get, "/api/health")
            .ok()
            .and_then(Dispatch::into_response)
            .map(|r| r.status);
        assert_eq!(status, Some(200));
    }

    #[rstest]
    fn test_journal_records_handler_label() {
        let mut server = listening(UnhandledRequestPolicy::Error);
        server
            .handle(&InterceptedRequest::get("/api/health?verbose=1"))
            .expect("should match");
        let record = &server.requests()[0];
        assert!(record.is_mocked());
        assert_eq!(record.url, "/api/health?verbose=1");
        assert_eq!(
            record.outcome,
            RequestOutcome::Mocked {
                handler: "GET /api/health".into()
            }
        );
    }
}
