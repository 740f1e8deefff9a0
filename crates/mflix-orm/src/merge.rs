use bson::{Bson, Document};

/// Overlays `patch` onto the keys of `current`.
///
/// Every key of `current` except `_id` appears in the output, taking the
/// patch's value when the patch has a non-null one. Keys only present in the
/// patch are ignored. The result is meant for a `$set`.
pub fn merge_fields(current: &Document, patch: &Document) -> Document {
    current
        .iter()
        .filter(|(key, _)| key.as_str() != "_id")
        .map(|(key, value)| {
            let merged = match patch.get(key) {
                Some(Bson::Null) | None => value.clone(),
                Some(patched) => patched.clone(),
            };
            (key.clone(), merged)
        })
        .collect()
}
