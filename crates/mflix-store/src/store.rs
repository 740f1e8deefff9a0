use async_trait::async_trait;
use bson::Document;

use crate::error::StoreError;
use crate::result::{DeleteResult, InsertResult, UpdateResult};

/// A document store reachable through named collections.
///
/// Filters are equality documents: every `field: value` pair must match
/// (dotted paths reach into subdocuments). Collections spring into existence
/// on first write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns at most `limit` matching documents in the store's natural order.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Inserts a document, assigning an ObjectId `_id` when it has none.
    async fn insert_one(&self, collection: &str, doc: Document)
    -> Result<InsertResult, StoreError>;

    /// Applies an update document (`$set` / `$unset`) to the first match.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult, StoreError>;

    async fn delete_one(&self, collection: &str, filter: Document)
    -> Result<DeleteResult, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).find(collection, filter, limit).await
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        (**self).find_one(collection, filter).await
    }

    async fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<InsertResult, StoreError> {
        (**self).insert_one(collection, doc).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult, StoreError> {
        (**self).update_one(collection, filter, update).await
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteResult, StoreError> {
        (**self).delete_one(collection, filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
