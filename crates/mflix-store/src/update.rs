use bson::{Bson, Document};

use crate::error::StoreError;

/// A single field-level update operator.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Set a field to a value, creating it (and any missing parents) if needed.
    Set(Bson),
    /// Remove a field from the document.
    Unset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: String,
    pub op: UpdateOp,
}

/// Parse an update document into field updates.
///
/// Supports `$set` and `$unset`. Bare top-level fields are treated as an
/// implicit `$set`, and a top-level `_id` key is skipped.
///
/// # Errors
///
/// Returns `InvalidUpdate` for unknown operators, non-document operands,
/// updates targeting `_id`, or an update with nothing to do.
pub fn parse_update(update: &Document) -> Result<Vec<FieldUpdate>, StoreError> {
    let mut ops = Vec::new();

    for (key, value) in update {
        if key == "_id" {
            continue;
        }

        match key.as_str() {
            "$set" => {
                for (field, val) in operand(key, value)? {
                    ops.push(FieldUpdate {
                        field: field.clone(),
                        op: UpdateOp::Set(val.clone()),
                    });
                }
            }
            "$unset" => {
                // Values are ignored, `{ "field": "" }` by convention.
                for (field, _) in operand(key, value)? {
                    ops.push(FieldUpdate {
                        field: field.clone(),
                        op: UpdateOp::Unset,
                    });
                }
            }
            k if k.starts_with('$') => {
                return Err(StoreError::InvalidUpdate(format!("unknown operator: {k}")));
            }
            _ => ops.push(FieldUpdate {
                field: key.clone(),
                op: UpdateOp::Set(value.clone()),
            }),
        }
    }

    if ops.is_empty() {
        return Err(StoreError::InvalidUpdate("empty update document".into()));
    }

    for fu in &ops {
        let target = fu.field.split('.').next().unwrap_or(&fu.field);
        if target == "_id" {
            return Err(StoreError::InvalidUpdate("cannot modify _id field".into()));
        }
    }

    Ok(ops)
}

fn operand<'a>(op: &str, value: &'a Bson) -> Result<&'a Document, StoreError> {
    match value {
        Bson::Document(d) => Ok(d),
        _ => Err(StoreError::InvalidUpdate(format!(
            "{op} value must be a document"
        ))),
    }
}

/// Apply parsed updates in place. Returns `true` if the document changed.
pub fn apply_update(doc: &mut Document, ops: &[FieldUpdate]) -> Result<bool, StoreError> {
    let mut changed = false;
    for fu in ops {
        changed |= match &fu.op {
            UpdateOp::Set(val) => set_path(doc, &fu.field, val)?,
            UpdateOp::Unset => unset_path(doc, &fu.field),
        };
    }
    Ok(changed)
}

fn set_path(doc: &mut Document, path: &str, value: &Bson) -> Result<bool, StoreError> {
    match path.split_once('.') {
        None => {
            if doc.get(path) == Some(value) {
                return Ok(false);
            }
            doc.insert(path, value.clone());
            Ok(true)
        }
        Some((head, rest)) => {
            if !doc.contains_key(head) {
                doc.insert(head, Document::new());
            }
            match doc.get_mut(head) {
                Some(Bson::Document(sub)) => set_path(sub, rest, value),
                _ => Err(StoreError::InvalidUpdate(format!(
                    "cannot set '{rest}': '{head}' is not a document"
                ))),
            }
        }
    }
}

fn unset_path(doc: &mut Document, path: &str) -> bool {
    match path.split_once('.') {
        None => doc.remove(path).is_some(),
        Some((head, rest)) => match doc.get_mut(head) {
            Some(Bson::Document(sub)) => unset_path(sub, rest),
            _ => false,
        },
    }
}
