#![cfg(feature = "memory")]

use bson::oid::ObjectId;
use bson::{Bson, doc};
use mflix_store::{DocumentStore, MemoryStore, StoreError};

const COLLECTION: &str = "comments";

// ── Insert ──────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_object_id() {
    let store = MemoryStore::new();
    let result = store
        .insert_one(COLLECTION, doc! { "name": "A" })
        .await
        .unwrap();
    assert!(result.acknowledged);
    let Bson::ObjectId(oid) = result.id else {
        panic!("expected ObjectId, got {:?}", result.id);
    };

    let found = store
        .find_one(COLLECTION, doc! { "_id": oid })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, doc! { "_id": oid, "name": "A" });
}

#[tokio::test]
async fn insert_keeps_supplied_id() {
    let store = MemoryStore::new();
    let result = store
        .insert_one(COLLECTION, doc! { "_id": "c-1", "name": "A" })
        .await
        .unwrap();
    assert_eq!(result.id, Bson::String("c-1".into()));
}

#[tokio::test]
async fn insert_duplicate_id_fails() {
    let store = MemoryStore::new();
    store
        .insert_one(COLLECTION, doc! { "_id": "c-1" })
        .await
        .unwrap();
    let err = store
        .insert_one(COLLECTION, doc! { "_id": "c-1" })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)));
    assert_eq!(store.len(COLLECTION).unwrap(), 1);
}

// ── Find ────────────────────────────────────────────────────────

#[tokio::test]
async fn find_on_unknown_collection_is_empty() {
    let store = MemoryStore::new();
    let docs = store.find("nothing", doc! {}, 10).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn find_respects_limit_and_insertion_order() {
    let store = MemoryStore::new();
    for i in 0..15 {
        store
            .insert_one(COLLECTION, doc! { "n": i })
            .await
            .unwrap();
    }
    let docs = store.find(COLLECTION, doc! {}, 10).await.unwrap();
    assert_eq!(docs.len(), 10);
    let ns: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
    assert_eq!(ns, (0..10).collect::<Vec<_>>());
}

#[tokio::test]
async fn find_filters_by_equality() {
    let store = MemoryStore::new();
    let m1 = ObjectId::new();
    let m2 = ObjectId::new();
    for (movie, name) in [(m1, "a"), (m2, "b"), (m1, "c")] {
        store
            .insert_one(COLLECTION, doc! { "movie_id": movie, "name": name })
            .await
            .unwrap();
    }
    let docs = store
        .find(COLLECTION, doc! { "movie_id": m1 }, 10)
        .await
        .unwrap();
    let names: Vec<&str> = docs.iter().map(|d| d.get_str("name").unwrap()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[tokio::test]
async fn find_matches_numbers_of_any_width() {
    let store = MemoryStore::new();
    let rows = [
        (Bson::Int64(2009), "a"),
        (Bson::Int32(2009), "b"),
        (Bson::Double(2009.0), "c"),
        (Bson::Int32(2010), "d"),
    ];
    for (year, name) in rows {
        store
            .insert_one(COLLECTION, doc! { "year": year, "name": name })
            .await
            .unwrap();
    }

    for filter in [
        doc! { "year": 2009 },
        doc! { "year": 2009_i64 },
        doc! { "year": 2009.0 },
    ] {
        let docs = store.find(COLLECTION, filter, 10).await.unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.get_str("name").unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    let deleted = store
        .delete_one(COLLECTION, doc! { "year": 2010_i64 })
        .await
        .unwrap();
    assert_eq!(deleted.deleted, 1);
}

// ── Update ──────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_fields() {
    let store = MemoryStore::new();
    store
        .insert_one(COLLECTION, doc! { "_id": 1, "name": "A", "text": "hi" })
        .await
        .unwrap();

    let result = store
        .update_one(COLLECTION, doc! { "_id": 1 }, doc! { "$set": { "text": "bye" } })
        .await
        .unwrap();
    assert_eq!(result.matched, 1);
    assert_eq!(result.modified, 1);

    let found = store
        .find_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, doc! { "_id": 1, "name": "A", "text": "bye" });
}

#[tokio::test]
async fn update_no_match_is_not_an_error() {
    let store = MemoryStore::new();
    let result = store
        .update_one(COLLECTION, doc! { "_id": 1 }, doc! { "$set": { "a": 1 } })
        .await
        .unwrap();
    assert_eq!(result.matched, 0);
    assert_eq!(result.modified, 0);
}

#[tokio::test]
async fn update_with_same_value_matches_without_modifying() {
    let store = MemoryStore::new();
    store
        .insert_one(COLLECTION, doc! { "_id": 1, "a": 1 })
        .await
        .unwrap();
    let result = store
        .update_one(COLLECTION, doc! { "_id": 1 }, doc! { "$set": { "a": 1 } })
        .await
        .unwrap();
    assert_eq!(result.matched, 1);
    assert_eq!(result.modified, 0);
}

#[tokio::test]
async fn update_rejects_id_change() {
    let store = MemoryStore::new();
    store
        .insert_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap();
    let err = store
        .update_one(COLLECTION, doc! { "_id": 1 }, doc! { "$set": { "_id": 2 } })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidUpdate(_)));
}

// ── Delete ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
    let store = MemoryStore::new();
    store
        .insert_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap();

    let first = store
        .delete_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap();
    assert_eq!(first.deleted, 1);

    let second = store
        .delete_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap();
    assert_eq!(second.deleted, 0);
    assert_eq!(store.len(COLLECTION).unwrap(), 0);
}

#[tokio::test]
async fn delete_removes_only_first_match() {
    let store = MemoryStore::new();
    for i in 0..3 {
        store
            .insert_one(COLLECTION, doc! { "n": i, "kind": "x" })
            .await
            .unwrap();
    }
    store
        .delete_one(COLLECTION, doc! { "kind": "x" })
        .await
        .unwrap();
    let docs = store.find(COLLECTION, doc! {}, 10).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].get_i32("n").unwrap(), 1);
}

#[tokio::test]
async fn boxed_store_forwards() {
    let store: Box<dyn DocumentStore> = Box::new(MemoryStore::new());
    store.ping().await.unwrap();
    store
        .insert_one(COLLECTION, doc! { "_id": 1 })
        .await
        .unwrap();
    assert!(
        store
            .find_one(COLLECTION, doc! { "_id": 1 })
            .await
            .unwrap()
            .is_some()
    );
}
