mod error;
mod filter;
mod result;
mod store;
mod update;

pub use bson::{Bson, Document};
pub use error::StoreError;
pub use filter::matches;
pub use result::{DeleteResult, InsertResult, UpdateResult};
pub use store::DocumentStore;
pub use update::{FieldUpdate, UpdateOp, apply_update, parse_update};

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;

#[cfg(feature = "mongodb")]
mod mongo;

#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
