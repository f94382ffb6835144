//! Ordered handler table consulted by the interceptor.
//!
//! The registry keeps the initial handler list it was built from and an active
//! list derived from it. Per-test overrides are prepended to the active list;
//! a reset rebuilds the active list from the initial one.

use crate::matching::path_matches;
use crate::types::handler::Handler;
use crate::types::method::HttpMethod;
use crate::types::request::{InterceptedRequest, MatchedRequest};
use crate::types::response::MockResponse;
use tracing::debug;

/// Result of looking a request up in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// A handler matched; `handler` is its label
    Matched {
        handler: String,
        response: MockResponse,
    },
    NoMatch,
}

impl MatchOutcome {
    pub fn response(&self) -> Option<&MockResponse> {
        match self {
            MatchOutcome::Matched { response, .. } => Some(response),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    /// Handlers the registry was built with; reset target
    initial: Vec<Handler>,
    /// Handlers consulted on lookup, in priority order
    active: Vec<Handler>,
}

impl HandlerRegistry {
    pub fn new(initial: Vec<Handler>) -> Self {
        Self {
            active: initial.clone(),
            initial,
        }
    }

    /// Prepend handlers so they take precedence over everything registered so far.
    pub fn use_handlers(&mut self, handlers: Vec<Handler>) {
        let mut next = handlers;
        next.extend(self.active.iter().cloned());
        self.active = next;
    }

    /// Drop every override and rebuild from the initial handlers.
    pub fn reset(&mut self) {
        self.active = self.initial.clone();
    }

    /// Replace the initial handlers and rebuild.
    pub fn reset_with(&mut self, initial: Vec<Handler>) {
        self.initial = initial;
        self.reset();
    }

    /// Handlers in the order they are consulted.
    pub fn handlers(&self) -> &[Handler] {
        &self.active
    }

    pub fn has_overrides(&self) -> bool {
        self.active.len() != self.initial.len()
    }

    /// Look up `method` + `url`.
    pub fn find(&self, method: HttpMethod, url: &str) -> MatchOutcome {
        self.resolve(&InterceptedRequest::new(method, url))
    }

    /// First handler in priority order whose method and path match answers the request.
    pub fn resolve(&self, request: &InterceptedRequest) -> MatchOutcome {
        for handler in &self.active {
            if !handler.method().accepts(request.method) {
                continue;
            }
            let path_match = path_matches(handler.path(), &request.url);
            if !path_match.matched {
                continue;
            }

            let matched = MatchedRequest {
                request,
                params: path_match.params,
                query: request.query(),
            };
            let response = handler.responder().respond(&matched);
            debug!(
                handler = %handler.describe(),
                status = response.status,
                "request matched"
            );
            return MatchOutcome::Matched {
                handler: handler.describe(),
                response,
            };
        }
        MatchOutcome::NoMatch
    }
}
