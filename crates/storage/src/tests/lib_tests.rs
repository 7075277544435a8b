use super::*;

#[tokio::test]
async fn lists_entries_in_insertion_order() {
    let store = InMemoryAddressBook::with_seed_entries();
    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 16);
    assert_eq!(listed[0].name, "Ash");
    assert_eq!(listed[15].name, "Nyota");
}

#[tokio::test]
async fn create_prepends_so_newest_lists_first() {
    let store = InMemoryAddressBook::with_seed_entries();
    let created = store
        .create(Address::new("Nancy", "Drew", None))
        .await
        .expect("create");

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 17);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn create_then_list_round_trips_the_entry() {
    let store = InMemoryAddressBook::new();
    let entry = Address::new("Korra", "Avatar", Some("123456".into()));
    store.create(entry.clone()).await.expect("create");

    let listed = store.list().await.expect("list");
    assert_eq!(listed, vec![entry]);
}

#[tokio::test]
async fn update_replaces_the_entry_sharing_the_id() {
    let store = InMemoryAddressBook::with_seed_entries();
    let mut target = store.list().await.expect("list")[2].clone();
    target.surname = "Superstar".into();

    store.update(target.clone()).await.expect("update");

    let listed = store.list().await.expect("list");
    assert_eq!(listed[2], target);
    assert_eq!(listed.len(), 16);
}

#[tokio::test]
async fn update_of_unknown_id_fails_and_leaves_collection_unchanged() {
    let store = InMemoryAddressBook::with_seed_entries();
    let before = store.list().await.expect("list");

    let stranger = Address::new("Nobody", "Here", None);
    let err = store.update(stranger.clone()).await.expect_err("not found");
    assert_eq!(err, StoreError::NotFound(stranger.id));

    let after = store.list().await.expect("list");
    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_removes_the_entry_by_id() {
    let store = InMemoryAddressBook::with_seed_entries();
    let victim = store.list().await.expect("list")[0].clone();

    store.delete(victim.id).await.expect("delete");

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 15);
    assert!(listed.iter().all(|entry| entry.id != victim.id));
}

#[tokio::test]
async fn delete_of_absent_id_is_idempotent() {
    let store = InMemoryAddressBook::with_seed_entries();
    let before = store.list().await.expect("list");

    let absent = AddressId::generate();
    store.delete(absent).await.expect("first delete");
    store.delete(absent).await.expect("second delete");

    let after = store.list().await.expect("list");
    assert_eq!(before, after);
}

#[tokio::test]
async fn unavailable_store_fails_every_operation() {
    let store = UnavailableAddressBook;
    assert!(matches!(
        store.list().await,
        Err(StoreError::Backend(_))
    ));
    assert!(matches!(
        store.create(Address::new("A", "B", None)).await,
        Err(StoreError::Backend(_))
    ));
    assert!(matches!(
        store.update(Address::new("A", "B", None)).await,
        Err(StoreError::Backend(_))
    ));
    assert!(matches!(
        store.delete(AddressId::generate()).await,
        Err(StoreError::Backend(_))
    ));
}
