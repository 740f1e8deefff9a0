mod collection;
mod error;
mod id;
mod merge;
mod model;
mod orm;

pub use collection::{COMMENTS, MOVIES};
pub use error::OrmError;
pub use id::RecordId;
pub use merge::merge_fields;
pub use model::{Comment, CommentPatch, Movie, NewComment};
pub use orm::{Orm, RESULT_CAP};

pub use mflix_store::{DeleteResult, Document, DocumentStore, InsertResult, StoreError, UpdateResult};
