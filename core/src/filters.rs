use std::collections::BTreeMap;

use ingestr_common::filter::{AccessError, FilterDraft, FilterId, SearchFilter, UserId};
use tracing::debug;

/// Saved search filters, visible only to the user who created them.
///
/// Asking for someone else's filter answers exactly like asking for one that
/// does not exist.
#[derive(Debug, Default)]
pub struct FilterStore {
    filters: BTreeMap<FilterId, SearchFilter>,
    next_id: u64,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, owner: UserId, draft: FilterDraft) -> SearchFilter {
        self.next_id += 1;
        let filter = SearchFilter {
            id: FilterId(self.next_id),
            owner,
            name: draft.name,
            json_query: draft.json_query,
            user_query: draft.user_query,
        };
        self.filters.insert(filter.id, filter.clone());
        debug!("filter {} created for user {}", filter.id, owner.0);
        filter
    }

    /// Filters owned by `requester`, oldest first. Empty when they own none.
    pub fn list(&self, requester: UserId) -> Vec<&SearchFilter> {
        self.filters
            .values()
            .filter(|filter| filter.owner == requester)
            .collect()
    }

    pub fn retrieve(&self, requester: UserId, id: FilterId) -> Result<&SearchFilter, AccessError> {
        self.filters
            .get(&id)
            .filter(|filter| filter.owner == requester)
            .ok_or(AccessError::NotFound(id))
    }

    pub fn delete(&mut self, requester: UserId, id: FilterId) -> Result<SearchFilter, AccessError> {
        self.retrieve(requester, id)?;
        self.filters.remove(&id).ok_or(AccessError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UserId = UserId(1);
    const STRANGER: UserId = UserId(2);

    #[test]
    fn owner_sees_and_deletes_own_filter() {
        let mut store = FilterStore::new();
        let filter = store.create(OWNER, FilterDraft::new("open ports").with_user_query("port:22"));

        assert_eq!(store.list(OWNER), vec![&filter]);
        assert_eq!(store.retrieve(OWNER, filter.id), Ok(&filter));
        assert_eq!(store.delete(OWNER, filter.id), Ok(filter.clone()));
        assert!(store.list(OWNER).is_empty());
        assert_eq!(store.retrieve(OWNER, filter.id), Err(AccessError::NotFound(filter.id)));
    }

    #[test]
    fn stranger_cannot_delete() {
        let mut store = FilterStore::new();
        let filter = store.create(OWNER, FilterDraft::new("mine"));

        let err = store.delete(STRANGER, filter.id).unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(store.list(OWNER).len(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = FilterStore::new();
        let first = store.create(OWNER, FilterDraft::new("a"));
        store.delete(OWNER, first.id).unwrap();
        let second = store.create(OWNER, FilterDraft::new("b"));
        assert_ne!(first.id, second.id);
    }
}
