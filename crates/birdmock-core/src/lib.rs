//! Request mocking harness for the hellobirdie front-end test suite.
//!
//! The crate is split into:
//! - [`registry`]: ordered handler table answering intercepted requests
//! - [`server`]: the interceptor lifecycle ([`MockServer`]) and the per-suite
//!   context ([`TestSuite`]) that resets handlers after every test
//! - [`config`]: listen options and handler files (YAML/JSON/JSONC)
//! - [`matching`]: path pattern and query string matching
//! - [`handlers`]: the static handler list shipped with the front-end

pub mod config;
pub mod error;
pub mod handlers;
pub mod matching;
pub mod registry;
pub mod server;
pub mod types;

pub use config::options::{ListenOptions, UnhandledRequestPolicy};
pub use error::HarnessError;
pub use registry::{HandlerRegistry, MatchOutcome};
pub use server::controller::{Dispatch, MockServer};
pub use server::suite::{TestScope, TestSuite};
pub use types::handler::{Handler, HandlerDefinition, Responder};
pub use types::method::HttpMethod;
pub use types::request::{InterceptedRequest, MatchedRequest};
pub use types::response::MockResponse;
