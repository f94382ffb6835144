//! Interceptor lifecycle.
//!
//! - [`MockServer`]: starts and stops interception and routes requests to the registry
//! - [`TestSuite`]: binds the server lifecycle to a test run and resets handlers after each test
//! - [`journal`]: record of requests seen while intercepting

pub mod controller;
pub mod journal;
pub mod suite;

pub use controller::{Dispatch, MockServer};
pub use journal::{RequestOutcome, RequestRecord};
pub use suite::{TestScope, TestSuite};
