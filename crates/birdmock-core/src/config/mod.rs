//! Harness configuration: listen options and handler files.

pub mod error;
pub mod options;
pub mod parser;
