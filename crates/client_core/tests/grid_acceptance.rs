use std::sync::Arc;

use client_core::{AddressBookClient, EditOutcome, SortField, SortOrder};
use shared::domain::AddressDraft;
use storage::{AddressBookStore, InMemoryAddressBook};

#[tokio::test]
async fn seeded_grid_search_sort_page_and_crud_acceptance() {
    let store = Arc::new(InMemoryAddressBook::with_seed_entries());
    let client = AddressBookClient::new(Arc::clone(&store) as Arc<dyn AddressBookStore>, 5);

    let snapshot = client.refresh().await.expect("initial refresh");
    assert_eq!(snapshot.total, 16);
    assert_eq!(snapshot.rows[0].name, "Ash");
    assert_eq!(snapshot.page_rows().len(), 5);

    // Search narrows to the single SquarePants entry.
    let snapshot = client.set_search("sq").await;
    assert_eq!(snapshot.total, 1);
    assert_eq!(snapshot.rows[0].name, "Spongebob");

    // Clearing the search restores the full collection.
    let snapshot = client.set_search("").await;
    assert_eq!(snapshot.total, 16);

    // Ascending by name, descending, then back to insertion order.
    let snapshot = client.toggle_sort(SortField::Name).await;
    assert_eq!(snapshot.rows[0].name, "Adol");
    assert_eq!(snapshot.rows[15].name, "Toph");

    let snapshot = client.toggle_sort(SortField::Name).await;
    assert_eq!(snapshot.rows[0].name, "Toph");

    let snapshot = client.toggle_sort(SortField::Name).await;
    assert_eq!(snapshot.rows[0].name, "Ash");
    let columns = client.columns().await;
    assert!(columns.iter().all(|c| c.sort_order == SortOrder::None));

    // A completed editing-surface payload without an id creates at the front.
    let outcome = client
        .submit_edit(Some(AddressDraft {
            id: None,
            name: "Korra".into(),
            surname: "Avatar".into(),
            phone_number: Some("4455667788".into()),
        }))
        .await
        .expect("create");
    let EditOutcome::Created(korra_id) = outcome else {
        panic!("expected a create, got {outcome:?}");
    };
    let snapshot = client.snapshot().await;
    assert_eq!(snapshot.total, 17);
    assert_eq!(snapshot.rows[0].id, korra_id);

    // Paging over 17 rows at page size 5: 4 pages, last with 2 rows.
    let snapshot = client.set_page(3).await;
    assert_eq!(snapshot.page_rows().len(), 2);
    let snapshot = client.set_page(99).await;
    assert_eq!(snapshot.page_index, 3);

    // Editing the created entry replaces it in place.
    let outcome = client
        .submit_edit(Some(AddressDraft {
            id: Some(korra_id),
            name: "Korra".into(),
            surname: "OfTheSouthernWaterTribe".into(),
            phone_number: None,
        }))
        .await
        .expect("update");
    assert_eq!(outcome, EditOutcome::Updated(korra_id));
    let snapshot = client.snapshot().await;
    assert_eq!(snapshot.total, 17);
    assert_eq!(snapshot.rows[0].surname, "OfTheSouthernWaterTribe");

    // Deleting it brings the view back in sync with the seed set.
    client.delete_address(korra_id).await.expect("delete");
    let snapshot = client.snapshot().await;
    assert_eq!(snapshot.total, 16);
    assert!(snapshot.rows.iter().all(|row| row.id != korra_id));

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 16);
}
