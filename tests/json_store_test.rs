#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

mod common;

use common::{create_test_dir, json_manager, locations, sample_item, GALLERY};
use photo_gallery::{
    GalleryItem, ItemPatch, ItemStore, JsonFileItemStore, Placement, StoreError, TransactOp,
};
use tokio::fs;

#[tokio::test]
async fn test_items_survive_reopen() {
    let dir = create_test_dir();
    let path = dir.path().join("nested").join("items.json");

    let manager = json_manager(&path).await;
    let a = manager
        .create_item(GALLERY, sample_item(2, "A"), &Placement::anywhere())
        .await
        .unwrap()
        .item;
    manager
        .create_item(GALLERY, sample_item(1, "B"), &Placement::before(&a.item_id))
        .await
        .unwrap();
    drop(manager);

    let reopened = json_manager(&path).await;
    assert_eq!(locations(&reopened).await, vec!["B", "A"]);
    assert_eq!(reopened.get_item(GALLERY, &a.item_id).await.unwrap(), a);
}

#[tokio::test]
async fn test_document_is_camel_case_json() {
    let dir = create_test_dir();
    let path = dir.path().join("items.json");
    let manager = json_manager(&path).await;
    manager
        .create_item(GALLERY, sample_item(1, "Kerry"), &Placement::anywhere())
        .await
        .unwrap();

    let content = fs::read_to_string(&path).await.unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    let record = &doc[GALLERY]["a0"];
    assert_eq!(record["location"], "Kerry");
    assert_eq!(record["processedCount"], 0);
    assert_eq!(record["photoRefs"].as_array().unwrap().len(), 1);
    assert!(!dir.path().join("items.json.tmp").exists());
}

#[tokio::test]
async fn test_missing_and_blank_files_are_empty() {
    let dir = create_test_dir();
    let path = dir.path().join("items.json");
    let store = JsonFileItemStore::open(&path).await.unwrap();
    assert!(store.range_query(GALLERY).await.unwrap().is_empty());

    fs::write(&path, "  \n").await.unwrap();
    assert!(store.range_query(GALLERY).await.unwrap().is_empty());
    assert!(store.get(GALLERY, "a0").await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_file_is_reported() {
    let dir = create_test_dir();
    let path = dir.path().join("items.json");
    fs::write(&path, "{not json").await.unwrap();
    let store = JsonFileItemStore::open(&path).await.unwrap();
    assert!(matches!(
        store.range_query(GALLERY).await,
        Err(StoreError::Json(_))
    ));

    let manager = json_manager(&path).await;
    let err = manager.list_items(GALLERY).await.unwrap_err();
    assert!(err.is_storage());
}

#[tokio::test]
async fn test_failed_transaction_leaves_file_untouched() {
    let dir = create_test_dir();
    let path = dir.path().join("items.json");
    let manager = json_manager(&path).await;
    let item = manager
        .create_item(GALLERY, sample_item(1, "A"), &Placement::anywhere())
        .await
        .unwrap()
        .item;
    let before = fs::read_to_string(&path).await.unwrap();

    let store = JsonFileItemStore::open(&path).await.unwrap();
    let err = store
        .transact(vec![
            TransactOp::delete(GALLERY, &item.item_id),
            TransactOp::delete(GALLERY, "zz"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::TransactionCanceled(_)));
    assert_eq!(fs::read_to_string(&path).await.unwrap(), before);
}

#[tokio::test]
async fn test_update_and_processed_persist() {
    let dir = create_test_dir();
    let path = dir.path().join("items.json");
    let manager = json_manager(&path).await;
    let created = manager
        .create_item(GALLERY, sample_item(1, "A"), &Placement::anywhere())
        .await
        .unwrap();
    let photo = &created.item.photo_refs[0];
    let key = format!("{GALLERY}/{}/{photo}/0:0:640:480", created.item.item_id);
    manager.record_processed_photo(&key).await.unwrap();
    manager
        .update_item(
            GALLERY,
            &created.item.item_id,
            &ItemPatch::new().with_location("B"),
        )
        .await
        .unwrap();

    let reopened = json_manager(&path).await;
    let public = reopened.list_public_items(GALLERY).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].location, "B");
    assert_eq!(public[0].processed_count, 1);
}

fn staging_key(item: &GalleryItem, photo: usize) -> String {
    format!(
        "{GALLERY}/{}/{}/{photo}:{photo}:640:480",
        item.item_id, item.photo_refs[photo]
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_handles_do_not_lose_increments() {
    for round in 0..20 {
        let dir = create_test_dir();
        let path = dir.path().join("items.json");
        let first = json_manager(&path).await;
        let second = json_manager(&path).await;
        let item = first
            .create_item(GALLERY, sample_item(2, "A"), &Placement::anywhere())
            .await
            .unwrap()
            .item;

        let (key0, key1) = (staging_key(&item, 0), staging_key(&item, 1));
        let (a, b) = tokio::join!(
            first.record_processed_photo(&key0),
            second.record_processed_photo(&key1),
        );
        a.unwrap();
        b.unwrap();

        let stored = first.get_item(GALLERY, &item.item_id).await.unwrap();
        assert_eq!(stored.processed_count, 2, "round {round}");
        assert_eq!(second.list_public_items(GALLERY).await.unwrap().len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_handles_commit_one_of_two_rekeys() {
    for round in 0..20 {
        let dir = create_test_dir();
        let path = dir.path().join("items.json");
        let first = JsonFileItemStore::open(&path).await.unwrap();
        let second = JsonFileItemStore::open(&path).await.unwrap();
        let manager = json_manager(&path).await;
        let item = manager
            .create_item(GALLERY, sample_item(1, "A"), &Placement::anywhere())
            .await
            .unwrap()
            .item;

        let rekey = |to: &str| {
            vec![
                TransactOp::delete(GALLERY, &item.item_id),
                TransactOp::Put(item.rekeyed(to)),
            ]
        };
        let (a, b) = tokio::join!(first.transact(rekey("Zz")), second.transact(rekey("a0V")));
        assert!(a.is_ok() != b.is_ok(), "round {round}: {a:?} / {b:?}");
        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, StoreError::TransactionCanceled(_)));
            }
        }
        assert_eq!(first.range_query(GALLERY).await.unwrap().len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_handles_reject_one_of_two_moves() {
    for round in 0..10 {
        let dir = create_test_dir();
        let path = dir.path().join("items.json");
        let first = json_manager(&path).await;
        let second = json_manager(&path).await;
        let mut keys = Vec::new();
        for location in ["a", "b", "c"] {
            let item = first
                .create_item(GALLERY, sample_item(1, location), &Placement::anywhere())
                .await
                .unwrap()
                .item;
            keys.push(item.item_id);
        }
        let (a, b, c) = (&keys[0], &keys[1], &keys[2]);

        let (before_a, between_ab) = (Placement::before(a), Placement::between(a, b));
        let (left, right) = tokio::join!(
            first.move_item(GALLERY, c, &before_a),
            second.move_item(GALLERY, c, &between_ab),
        );
        assert!(left.is_err() || right.is_err(), "round {round}: both moves committed");
        for err in [left.err(), right.err()].into_iter().flatten() {
            assert!(err.is_storage() || err.is_not_found(), "round {round}: {err:?}");
        }
        assert_eq!(first.list_items(GALLERY).await.unwrap().len(), 3);
    }
}
