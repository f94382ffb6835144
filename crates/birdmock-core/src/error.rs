//! Harness errors.

use crate::config::error::ConfigError;
use crate::types::method::HttpMethod;
use thiserror::Error;

/// Errors raised by the interceptor and its lifecycle.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No handler matched and the policy is `error`
    #[error("Unhandled request: {method} {url}")]
    UnhandledRequest { method: HttpMethod, url: String },
    /// `start` called while already intercepting
    #[error("Interception already started; stop it before starting again")]
    AlreadyListening,
    /// `stop` called without a matching `start`
    #[error("Interception is not running")]
    NotListening,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HarnessError {
    /// Whether this is a setup fault (misuse of the lifecycle) rather than a test failure.
    pub fn is_lifecycle_fault(&self) -> bool {
        matches!(
            self,
            HarnessError::AlreadyListening | HarnessError::NotListening
        )
    }
}
