use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use arc_swap::ArcSwap;
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use imbl::OrdMap;

use crate::error::StoreError;
use crate::filter::matches;
use crate::result::{DeleteResult, InsertResult, UpdateResult};
use crate::store::DocumentStore;
use crate::update::{apply_update, parse_update};

/// Documents keyed by insertion sequence, so natural order is insertion order.
type Records = OrdMap<u64, Document>;

/// In-process document store.
///
/// Readers load a snapshot of a collection without locking. Writers serialize
/// through `write_lock`, build a new map (cheap due to imbl structural sharing)
/// and swap it in.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<ArcSwap<Records>>>>,
    write_lock: Mutex<()>,
    next_seq: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self
            .snapshot(collection)?
            .map_or(0, |records| records.len()))
    }

    fn snapshot(&self, collection: &str) -> Result<Option<Arc<Records>>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Backend(format!("collection lock poisoned: {e}")))?;
        Ok(collections.get(collection).map(|arc| arc.load_full()))
    }

    fn collection(&self, name: &str) -> Result<Arc<ArcSwap<Records>>, StoreError> {
        if let Some(arc) = self
            .collections
            .read()
            .map_err(|e| StoreError::Backend(format!("collection lock poisoned: {e}")))?
            .get(name)
        {
            return Ok(arc.clone());
        }

        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Backend(format!("collection lock poisoned: {e}")))?;
        Ok(collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(ArcSwap::from_pointee(OrdMap::new())))
            .clone())
    }

    /// Run `f` against a private copy of the collection while holding the
    /// write lock, then publish the copy if `f` asks for it.
    fn write<T>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Records) -> Result<(T, bool), StoreError>,
    ) -> Result<T, StoreError> {
        let arc = self.collection(collection)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Backend(format!("write lock poisoned: {e}")))?;

        let mut records = (**arc.load()).clone();
        let (out, publish) = f(&mut records)?;
        if publish {
            arc.store(Arc::new(records));
        }
        Ok(out)
    }

    fn find_sync(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(match self.snapshot(collection)? {
            Some(records) => records
                .values()
                .filter(|doc| matches(doc, filter))
                .take(limit)
                .cloned()
                .collect(),
            None => Vec::new(),
        })
    }

    fn insert_sync(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
        let (id, doc) = match doc.get("_id") {
            Some(id) => (id.clone(), doc),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert("_id", id.clone());
                for (key, value) in doc {
                    with_id.insert(key, value);
                }
                (id, with_id)
            }
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.write(collection, |records| {
            if records.values().any(|existing| existing.get("_id") == Some(&id)) {
                return Err(StoreError::DuplicateKey(id.to_string()));
            }
            records.insert(seq, doc);
            Ok(((), true))
        })?;

        Ok(InsertResult {
            id,
            acknowledged: true,
        })
    }

    fn update_sync(
        &self,
        collection: &str,
        filter: &Document,
        update: &Document,
    ) -> Result<UpdateResult, StoreError> {
        let ops = parse_update(update)?;
        self.write(collection, |records| {
            let Some((seq, mut doc)) = records
                .iter()
                .find(|(_, doc)| matches(doc, filter))
                .map(|(seq, doc)| (*seq, doc.clone()))
            else {
                return Ok((UpdateResult { matched: 0, modified: 0 }, false));
            };

            let changed = apply_update(&mut doc, &ops)?;
            if changed {
                records.insert(seq, doc);
            }
            Ok((
                UpdateResult {
                    matched: 1,
                    modified: u64::from(changed),
                },
                changed,
            ))
        })
    }

    fn delete_sync(&self, collection: &str, filter: &Document) -> Result<DeleteResult, StoreError> {
        self.write(collection, |records| {
            let seq = records
                .iter()
                .find(|(_, doc)| matches(doc, filter))
                .map(|(seq, _)| *seq);
            match seq {
                Some(seq) => {
                    records.remove(&seq);
                    Ok((DeleteResult { deleted: 1 }, true))
                }
                None => Ok((DeleteResult { deleted: 0 }, false)),
            }
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        self.find_sync(collection, &filter, limit)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find_sync(collection, &filter, 1)?.into_iter().next())
    }

    async fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<InsertResult, StoreError> {
        self.insert_sync(collection, doc)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult, StoreError> {
        self.update_sync(collection, &filter, &update)
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteResult, StoreError> {
        self.delete_sync(collection, &filter)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn poisoned_collections_fail_reads_and_writes() {
        let store = Arc::new(MemoryStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.collections.write().unwrap();
            panic!("poison the collection map");
        })
        .join();

        assert!(matches!(
            store.find_sync("movies", &doc! {}, 10),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(store.len("movies"), Err(StoreError::Backend(_))));
        assert!(matches!(
            store.insert_sync("movies", doc! { "title": "Up" }),
            Err(StoreError::Backend(_))
        ));
    }
}
