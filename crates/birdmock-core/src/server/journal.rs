//! Requests seen by the interceptor, in arrival order.

use crate::types::method::HttpMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Answered by the handler with this label
    Mocked { handler: String },
    /// No handler matched; the request was let through
    Bypassed,
    /// No handler matched under the `error` policy
    Unhandled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: HttpMethod,
    pub url: String,
    pub outcome: RequestOutcome,
}

impl RequestRecord {
    pub fn is_mocked(&self) -> bool {
        matches!(self.outcome, RequestOutcome::Mocked { .. })
    }
}
