use ingestr_common::filter::{AccessError, FilterDraft, FilterId, UserId};
use ingestr_core::filters::FilterStore;

const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);

fn store_with_alice_filter() -> (FilterStore, FilterId) {
    let mut store = FilterStore::new();
    let filter = store.create(
        ALICE,
        FilterDraft::new("web servers")
            .with_json_query(r#"{"filters":[{"name":"port","op":"eq","val":"443"}]}"#)
            .with_user_query("port:443"),
    );
    (store, filter.id)
}

#[test]
fn list_retrieves_all_items_from_logged_user() {
    let (store, _) = store_with_alice_filter();
    assert_eq!(store.list(ALICE).len(), 1);
}

#[test]
fn list_is_empty_for_another_user() {
    let (store, _) = store_with_alice_filter();
    assert!(store.list(BOB).is_empty());
}

#[test]
fn retrieve_one_object_from_logged_user() {
    let mut store = FilterStore::new();
    let ids: Vec<_> = (0..5)
        .map(|n| store.create(ALICE, FilterDraft::new(format!("filter {n}"))).id)
        .collect();

    for id in ids {
        let filter = store.retrieve(ALICE, id).unwrap();
        assert_eq!(filter.id, id);
        assert_eq!(filter.owner, ALICE);
    }
}

#[test]
fn retrieve_filter_from_another_user_is_not_found() {
    let (store, id) = store_with_alice_filter();
    let err = store.retrieve(BOB, id).unwrap_err();
    assert_eq!(err, AccessError::NotFound(id));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn delete_filter_from_another_user_is_not_found() {
    let (mut store, id) = store_with_alice_filter();
    assert_eq!(store.delete(BOB, id).map_err(|e| e.status_code()), Err(404));
    assert!(store.retrieve(ALICE, id).is_ok());
}
