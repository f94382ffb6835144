//! Request matching utilities.

mod path;
mod query;

pub use path::{path_matches, split_origin, PathMatch};
pub use query::parse_query_string;
