use bson::Bson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertResult {
    #[serde(rename = "insertedId")]
    pub id: Bson,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    #[serde(rename = "matchedCount")]
    pub matched: u64,
    #[serde(rename = "modifiedCount")]
    pub modified: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(rename = "deletedCount")]
    pub deleted: u64,
}
