use std::fmt;

use mflix_store::StoreError;

#[derive(Debug)]
pub enum OrmError {
    /// The store is unreachable or authentication failed.
    Connection(String),
    /// The identifier string is not a valid ObjectId.
    InvalidIdentifier(String),
    Store(StoreError),
}

impl fmt::Display for OrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrmError::Connection(msg) => write!(f, "connection error: {msg}"),
            OrmError::InvalidIdentifier(id) => write!(f, "invalid identifier: {id:?}"),
            OrmError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for OrmError {}

impl From<StoreError> for OrmError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Connection(msg) => OrmError::Connection(msg),
            other => OrmError::Store(other),
        }
    }
}
