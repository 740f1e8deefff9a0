use std::fmt;
use std::str::FromStr;

use bson::Bson;
use bson::oid::ObjectId;

use crate::error::OrmError;

/// A document identifier in the store's native format.
///
/// Identifiers arrive as strings (path parameters, JSON) and are parsed here,
/// once, before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(ObjectId);

impl RecordId {
    pub fn new() -> Self {
        RecordId(ObjectId::new())
    }

    pub fn parse(s: &str) -> Result<Self, OrmError> {
        ObjectId::parse_str(s)
            .map(RecordId)
            .map_err(|_| OrmError::InvalidIdentifier(s.to_string()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RecordId {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        RecordId(oid)
    }
}

impl From<RecordId> for Bson {
    fn from(id: RecordId) -> Self {
        Bson::ObjectId(id.0)
    }
}
