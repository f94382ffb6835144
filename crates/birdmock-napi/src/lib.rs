//! NAPI-RS bindings for the birdmock request mocking harness.
//!
//! Lets the JavaScript test setup drive the Rust interceptor from its
//! `beforeAll` / `afterEach` / `afterAll` hooks.

use napi_derive::napi;

mod config;
mod logging;
mod server;

pub use config::*;
pub use logging::*;
pub use server::*;

/// Library version
#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
