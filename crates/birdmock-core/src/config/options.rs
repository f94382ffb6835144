//! Interceptor listen options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with a request no handler matches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnhandledRequestPolicy {
    /// Log a warning and let the request through
    #[default]
    Warn,
    /// Fail the current test
    Error,
    /// Let the request through silently
    Bypass,
}

impl fmt::Display for UnhandledRequestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnhandledRequestPolicy::Warn => "warn",
            UnhandledRequestPolicy::Error => "error",
            UnhandledRequestPolicy::Bypass => "bypass",
        })
    }
}

/// Options passed when interception starts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListenOptions {
    #[serde(default)]
    pub on_unhandled_request: UnhandledRequestPolicy,
}

impl ListenOptions {
    /// Unmatched requests fail the test.
    pub fn strict() -> Self {
        Self::with_policy(UnhandledRequestPolicy::Error)
    }

    pub fn with_policy(on_unhandled_request: UnhandledRequestPolicy) -> Self {
        Self {
            on_unhandled_request,
        }
    }
}
