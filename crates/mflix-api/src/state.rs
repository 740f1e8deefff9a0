use std::sync::Arc;

use mflix_orm::Orm;
use mflix_store::{DocumentStore, StoreError};

use crate::config::{Config, StoreKind};

pub type DynStore = Box<dyn DocumentStore>;

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<Orm<DynStore>>,
}

impl AppState {
    pub fn new(store: DynStore) -> Self {
        Self {
            orm: Arc::new(Orm::new(store)),
        }
    }
}

/// Opens the configured store. Called once per process.
pub async fn open_store(config: &Config) -> Result<DynStore, StoreError> {
    match config.store {
        StoreKind::Memory => Ok(Box::new(mflix_store::MemoryStore::new())),
        #[cfg(feature = "mongodb")]
        StoreKind::Mongo => {
            let store =
                mflix_store::MongoStore::connect(&config.mongodb_uri, &config.database).await?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "mongodb"))]
        StoreKind::Mongo => Err(StoreError::Connection(
            "built without the mongodb feature".into(),
        )),
    }
}
