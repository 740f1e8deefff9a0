use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// The store could not be reached or refused our credentials.
    Connection(String),
    DuplicateKey(String),
    InvalidUpdate(String),
    Serialization(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "connection error: {msg}"),
            StoreError::DuplicateKey(id) => write!(f, "duplicate key: {id}"),
            StoreError::InvalidUpdate(msg) => write!(f, "invalid update: {msg}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<bson::ser::Error> for StoreError {
    fn from(e: bson::ser::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(e: bson::de::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
