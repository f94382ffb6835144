//! Core domain types for handlers, requests and responses.

pub mod handler;
pub mod method;
pub mod request;
pub mod response;
