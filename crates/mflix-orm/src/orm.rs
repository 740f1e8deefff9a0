use bson::{Bson, Document, doc};
use mflix_store::{DeleteResult, DocumentStore, InsertResult, UpdateResult};
use tracing::debug;

use crate::error::OrmError;
use crate::id::RecordId;

/// Maximum number of documents returned by `find` and `find_by`.
pub const RESULT_CAP: usize = 10;

/// Collection-parameterized data access over a [`DocumentStore`].
///
/// The store handle is injected once at construction and reused for every
/// call; `Orm` never opens or closes connections itself. Calls hold no state
/// between them, so two updates to the same document race with last write wins.
pub struct Orm<S> {
    store: S,
}

impl<S: DocumentStore> Orm<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Up to [`RESULT_CAP`] documents in the store's natural order.
    pub async fn find(&self, collection: &str) -> Result<Vec<Document>, OrmError> {
        let docs = self.store.find(collection, doc! {}, RESULT_CAP).await?;
        debug!(collection, count = docs.len(), "find");
        Ok(docs)
    }

    /// Up to [`RESULT_CAP`] documents whose `field` equals `value`.
    pub async fn find_by(
        &self,
        collection: &str,
        field: &str,
        value: impl Into<Bson>,
    ) -> Result<Vec<Document>, OrmError> {
        let mut filter = Document::new();
        filter.insert(field, value.into());
        let docs = self.store.find(collection, filter, RESULT_CAP).await?;
        debug!(collection, field, count = docs.len(), "find_by");
        Ok(docs)
    }

    /// Looks up a document by id, optionally scoped by an extra equality
    /// filter (e.g. a comment's parent movie). Absence is `Ok(None)`.
    pub async fn find_one(
        &self,
        collection: &str,
        id: &str,
        extra: Option<Document>,
    ) -> Result<Option<Document>, OrmError> {
        let id = RecordId::parse(id)?;
        let Some(filter) = scoped_filter(id, extra) else {
            return Ok(None);
        };
        let doc = self.store.find_one(collection, filter).await?;
        debug!(collection, %id, found = doc.is_some(), "find_one");
        Ok(doc)
    }

    /// Inserts `doc` as-is; the store assigns `_id` when it is missing.
    pub async fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<InsertResult, OrmError> {
        let result = self.store.insert_one(collection, doc).await?;
        debug!(collection, id = %result.id, "insert_one");
        Ok(result)
    }

    /// Merge-updates the document with the given id.
    ///
    /// `update` is an update document (`$set`, `$unset`); a document without
    /// operators is treated as `$set`. `_id` is never written. Zero matches
    /// is reported in the result, not as an error.
    pub async fn update_one(
        &self,
        collection: &str,
        id: &str,
        update: Document,
    ) -> Result<UpdateResult, OrmError> {
        let id = RecordId::parse(id)?;
        let filter = doc! { "_id": id };
        let update = normalize_update(update);

        let result = if update.is_empty() {
            let matched = self.store.find_one(collection, filter).await?.is_some();
            UpdateResult {
                matched: u64::from(matched),
                modified: 0,
            }
        } else {
            self.store.update_one(collection, filter, update).await?
        };
        debug!(
            collection,
            %id,
            matched = result.matched,
            modified = result.modified,
            "update_one"
        );
        Ok(result)
    }

    /// Deletes the document with the given id (and matching `extra`, if any).
    /// Deleting a missing document reports zero deletions.
    pub async fn delete_one(
        &self,
        collection: &str,
        id: &str,
        extra: Option<Document>,
    ) -> Result<DeleteResult, OrmError> {
        let id = RecordId::parse(id)?;
        let Some(filter) = scoped_filter(id, extra) else {
            return Ok(DeleteResult { deleted: 0 });
        };
        let result = self.store.delete_one(collection, filter).await?;
        debug!(collection, %id, deleted = result.deleted, "delete_one");
        Ok(result)
    }

    pub async fn ping(&self) -> Result<(), OrmError> {
        Ok(self.store.ping().await?)
    }
}

/// `{_id: id}` AND-combined with `extra`. Returns `None` when `extra` pins a
/// different `_id`, since nothing can match.
fn scoped_filter(id: RecordId, extra: Option<Document>) -> Option<Document> {
    let mut filter = doc! { "_id": id };
    for (key, value) in extra.unwrap_or_default() {
        if key == "_id" {
            if value != Bson::from(id) {
                return None;
            }
            continue;
        }
        filter.insert(key, value);
    }
    Some(filter)
}

/// Wraps bare fields in `$set` and strips `_id` from `$set`.
fn normalize_update(update: Document) -> Document {
    let mut update = if update.keys().any(|k| k.starts_with('$')) {
        update
    } else {
        doc! { "$set": update }
    };

    let set_empty = match update.get_mut("$set") {
        Some(Bson::Document(set)) => {
            set.remove("_id");
            set.is_empty()
        }
        _ => false,
    };
    if set_empty {
        update.remove("$set");
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_filter_adds_extra_fields() {
        let id = RecordId::new();
        let movie = RecordId::new();
        let filter = scoped_filter(id, Some(doc! { "movie_id": movie })).unwrap();
        assert_eq!(filter, doc! { "_id": id, "movie_id": movie });
    }

    #[test]
    fn scoped_filter_with_conflicting_id_matches_nothing() {
        let id = RecordId::new();
        assert!(scoped_filter(id, Some(doc! { "_id": RecordId::new() })).is_none());
        assert!(scoped_filter(id, Some(doc! { "_id": id })).is_some());
    }

    #[test]
    fn bare_update_becomes_set() {
        let update = normalize_update(doc! { "text": "bye" });
        assert_eq!(update, doc! { "$set": { "text": "bye" } });
    }

    #[test]
    fn id_is_stripped_from_set() {
        let update = normalize_update(doc! { "$set": { "_id": 1, "text": "bye" } });
        assert_eq!(update, doc! { "$set": { "text": "bye" } });

        let update = normalize_update(doc! { "_id": 1 });
        assert!(update.is_empty());
    }

    #[test]
    fn operator_updates_pass_through() {
        let update = normalize_update(doc! { "$unset": { "plot": "" } });
        assert_eq!(update, doc! { "$unset": { "plot": "" } });
    }
}
