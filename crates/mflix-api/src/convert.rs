//! BSON to JSON for responses. ObjectIds become hex strings and dates become
//! RFC 3339 strings; everything else follows relaxed extended JSON.

use bson::{Bson, Document};
use serde::Serialize;
use serde_json::Value;

pub fn to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, to_json(v))).collect())
}

pub fn documents_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_json).collect())
}

/// Serializes through BSON so ids and dates get the same treatment as documents.
pub fn result_json<T: Serialize>(value: &T) -> Result<Value, bson::ser::Error> {
    Ok(to_json(bson::to_bson(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use bson::{DateTime, doc};
    use mflix_store::{InsertResult, UpdateResult};
    use serde_json::json;

    #[test]
    fn object_ids_and_dates_are_plain_strings() {
        let oid = ObjectId::new();
        let date = DateTime::from_millis(0);
        let value = document_json(doc! {
            "_id": oid,
            "date": date,
            "tags": [oid],
            "imdb": { "rating": 7.5, "votes": 10_i64 },
        });
        assert_eq!(
            value,
            json!({
                "_id": oid.to_hex(),
                "date": "1970-01-01T00:00:00Z",
                "tags": [oid.to_hex()],
                "imdb": { "rating": 7.5, "votes": 10 },
            })
        );
    }

    #[test]
    fn results_use_driver_field_names() {
        let oid = ObjectId::new();
        let insert = result_json(&InsertResult {
            id: Bson::ObjectId(oid),
            acknowledged: true,
        })
        .unwrap();
        assert_eq!(insert, json!({ "insertedId": oid.to_hex(), "acknowledged": true }));

        let update = result_json(&UpdateResult {
            matched: 1,
            modified: 0,
        })
        .unwrap();
        assert_eq!(update, json!({ "matchedCount": 1, "modifiedCount": 0 }));
    }
}
