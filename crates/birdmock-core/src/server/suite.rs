//! Test-run context binding the interceptor lifecycle to suite boundaries.
//!
//! ```ignore
//! let mut suite = TestSuite::setup(default_handlers(), ListenOptions::strict())?;
//! suite.run(|server| {
//!     let response = server.fetch(HttpMethod::Get, "/api/health")?;
//!     // ...
//!     Ok::<_, HarnessError>(())
//! })?;
//! suite.teardown()?;
//! ```

use crate::config::options::ListenOptions;
use crate::error::HarnessError;
use crate::server::controller::MockServer;
use crate::types::handler::Handler;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Interceptor context for one test process.
///
/// Interception starts in [`TestSuite::setup`] and stops in
/// [`TestSuite::teardown`]. Each test runs inside a [`TestScope`] that restores
/// the initial handlers when it ends.
#[derive(Debug)]
pub struct TestSuite {
    server: MockServer,
}

impl TestSuite {
    /// Build a server from the static handler list and start intercepting.
    pub fn setup(handlers: Vec<Handler>, options: ListenOptions) -> Result<Self, HarnessError> {
        let mut server = MockServer::new(handlers);
        server.start(options)?;
        Ok(Self { server })
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Open a test scope. Handlers are reset when the scope is dropped.
    pub fn scope(&mut self) -> TestScope<'_> {
        TestScope {
            server: &mut self.server,
        }
    }

    /// Run one test body. Handlers are reset afterwards, also when the body panics.
    pub fn run<F, T>(&mut self, body: F) -> T
    where
        F: FnOnce(&mut MockServer) -> T,
    {
        let mut scope = self.scope();
        body(&mut *scope)
    }

    /// Stop intercepting once the last test is done.
    pub fn teardown(mut self) -> Result<(), HarnessError> {
        self.server.stop()
    }
}

impl Drop for TestSuite {
    fn drop(&mut self) {
        if self.server.is_listening() {
            warn!("test suite dropped without teardown; stopping interception");
            let _ = self.server.stop();
        }
    }
}

/// One test's view of the server.
pub struct TestScope<'a> {
    server: &'a mut MockServer,
}

impl Deref for TestScope<'_> {
    type Target = MockServer;

    fn deref(&self) -> &Self::Target {
        self.server
    }
}

impl DerefMut for TestScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.server
    }
}

impl Drop for TestScope<'_> {
    fn drop(&mut self) {
        self.server.reset_handlers();
        debug!("handlers reset after test");
    }
}
