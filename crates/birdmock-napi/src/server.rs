//! NAPI bindings for the interceptor controller.

use crate::config::{
    to_core_handlers, DispatchResult, HandlerDefinition, InterceptedRequest, ListenOptions,
    MockResponse, RequestRecord,
};
use birdmock_core::config::parser;
use birdmock_core::handlers::{default_definitions, default_handlers};
use birdmock_core::server::controller::{Dispatch, MockServer as CoreMockServer};
use birdmock_core::types::request::InterceptedRequest as CoreRequest;
use birdmock_core::ListenOptions as CoreListenOptions;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::{Arc, Mutex, MutexGuard};

#[napi]
pub struct MockServer {
    inner: Arc<Mutex<CoreMockServer>>,
}

impl MockServer {
    fn lock(&self) -> Result<MutexGuard<'_, CoreMockServer>> {
        self.inner
            .lock()
            .map_err(|_| Error::from_reason("Mock server state is poisoned"))
    }
}

#[napi]
impl MockServer {
    /// Create an idle mock server
    ///
    /// @param handlers - Initial handlers; the built-in defaults when omitted
    #[napi(constructor)]
    pub fn new(handlers: Option<Vec<HandlerDefinition>>) -> Result<Self> {
        let handlers = match handlers {
            Some(definitions) => to_core_handlers(definitions)?,
            None => default_handlers(),
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(CoreMockServer::new(handlers))),
        })
    }

    /// Start intercepting
    ///
    /// @throws Error if interception is already running
    #[napi]
    pub fn listen(&self, options: Option<ListenOptions>) -> Result<()> {
        let options = options.map(CoreListenOptions::from).unwrap_or_default();
        self.lock()?
            .start(options)
            .map_err(|e| Error::from_reason(e.to_string()))
    }

    /// Prepend handlers for the current test
    #[napi(js_name = "use")]
    pub fn use_handlers(&self, handlers: Vec<HandlerDefinition>) -> Result<()> {
        let handlers = to_core_handlers(handlers)?;
        self.lock()?.use_handlers(handlers);
        Ok(())
    }

    /// Drop per-test handlers, or replace the initial handlers when `next` is given
    #[napi]
    pub fn reset_handlers(&self, next: Option<Vec<HandlerDefinition>>) -> Result<()> {
        let next = next.map(to_core_handlers).transpose()?;
        let mut server = self.lock()?;
        match next {
            Some(handlers) => server.reset_handlers_with(handlers),
            None => server.reset_handlers(),
        }
        Ok(())
    }

    /// Stop intercepting
    ///
    /// @throws Error if interception is not running
    #[napi]
    pub fn close(&self) -> Result<()> {
        self.lock()?
            .stop()
            .map_err(|e| Error::from_reason(e.to_string()))
    }

    /// Route an outbound request
    ///
    /// @throws Error if no handler matches and the policy is `error`
    #[napi]
    pub fn handle(&self, request: InterceptedRequest) -> Result<DispatchResult> {
        let request = CoreRequest::try_from(request)?;
        let dispatch = self
            .lock()?
            .handle(&request)
            .map_err(|e| Error::from_reason(e.to_string()))?;
        Ok(match dispatch {
            Dispatch::Mocked(response) => DispatchResult {
                mocked: true,
                response: Some(MockResponse::from(response)),
            },
            Dispatch::Passthrough => DispatchResult {
                mocked: false,
                response: None,
            },
        })
    }

    /// Labels of the active handlers, in lookup order
    #[napi]
    pub fn list_handlers(&self) -> Result<Vec<String>> {
        Ok(self
            .lock()?
            .list_handlers()
            .iter()
            .map(|h| h.describe())
            .collect())
    }

    /// Requests seen since the last reset
    #[napi]
    pub fn requests(&self) -> Result<Vec<RequestRecord>> {
        Ok(self
            .lock()?
            .requests()
            .iter()
            .map(RequestRecord::from)
            .collect())
    }

    #[napi(getter)]
    pub fn is_listening(&self) -> Result<bool> {
        Ok(self.lock()?.is_listening())
    }
}

/// Load handler definitions from a YAML/JSON/JSONC file or glob pattern
#[napi]
pub async fn load_handlers(pattern: String) -> Result<Vec<HandlerDefinition>> {
    let definitions = parser::load_handlers(&pattern)
        .await
        .map_err(|e| Error::from_reason(format!("Failed to load handlers: {e}")))?;
    Ok(definitions.into_iter().map(HandlerDefinition::from).collect())
}

/// Handlers the hellobirdie front-end tests start from
#[napi(js_name = "defaultHandlers")]
pub fn default_handler_definitions() -> Vec<HandlerDefinition> {
    default_definitions()
        .into_iter()
        .map(HandlerDefinition::from)
        .collect()
}
