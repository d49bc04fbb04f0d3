//! # Saved Search Filters
//!
//! A search filter is a stored query that belongs to exactly one user. Only
//! its owner may see, read or delete it; to everyone else it does not exist.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterId(pub u64);

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub id: FilterId,
    pub owner: UserId,
    pub name: String,
    pub json_query: String,
    pub user_query: String,
}

/// Fields supplied by the user when saving a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub name: String,
    pub json_query: String,
    pub user_query: String,
}

impl FilterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_json_query(mut self, json_query: impl Into<String>) -> Self {
        self.json_query = json_query.into();
        self
    }

    pub fn with_user_query(mut self, user_query: impl Into<String>) -> Self {
        self.user_query = user_query.into();
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The filter does not exist, or it belongs to someone else.
    #[error("search filter {0} not found")]
    NotFound(FilterId),
}

impl AccessError {
    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::NotFound(_) => 404,
        }
    }
}
