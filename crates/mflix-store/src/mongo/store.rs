use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};

use crate::error::StoreError;
use crate::result::{DeleteResult, InsertResult, UpdateResult};
use crate::store::DocumentStore;

/// MongoDB-backed store.
///
/// Acquire once per process: `Client` owns a connection pool and is cheap to
/// clone, so every call reuses it. Reconnection is left to the driver.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::from_client(client, database))
    }

    pub fn from_client(client: Client, database: &str) -> Self {
        let database = client.database(database);
        Self { client, database }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let cursor = self.collection(collection).find(filter).limit(limit).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<InsertResult, StoreError> {
        let result = self.collection(collection).insert_one(doc).await?;
        Ok(InsertResult {
            id: result.inserted_id,
            acknowledged: true,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .await?;
        Ok(UpdateResult {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteResult, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteResult {
            deleted: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::Authentication { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => StoreError::Connection(e.to_string()),
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                StoreError::Serialization(e.to_string())
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}
