//! Element tree and queries used by XML report parsers.
//!
//! Parsers should go through [`query::QueryEngine`] rather than calling the
//! tree's lookup methods directly, so the capability dispatch stays in one place.

pub mod query;
pub mod tree;

pub use query::{NodeQuery, QueryEngine};
pub use tree::{Element, ParseTree, TreeError};
