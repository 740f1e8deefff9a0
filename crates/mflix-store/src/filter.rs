use bson::{Bson, Document};

/// Returns true if every `field: value` pair in `filter` equals the value
/// found at that (possibly dotted) path in `doc`. An empty filter matches all.
///
/// Numbers compare by value, so `Int32(7)`, `Int64(7)` and `Double(7.0)` are
/// equal.
pub fn matches(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(path, expected)| lookup(doc, path).is_some_and(|actual| equal(actual, expected)))
}

fn equal(actual: &Bson, expected: &Bson) -> bool {
    match (actual, expected) {
        (Bson::Int32(_) | Bson::Int64(_), Bson::Int32(_) | Bson::Int64(_)) => {
            as_i64(actual) == as_i64(expected)
        }
        (Bson::Double(d), other) | (other, Bson::Double(d)) => match other {
            Bson::Double(o) => d == o,
            Bson::Int32(i) => *d == f64::from(*i),
            Bson::Int64(i) => *d == *i as f64,
            _ => false,
        },
        _ => actual == expected,
    }
}

fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        _ => None,
    }
}

fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    if let Some(value) = doc.get(path) {
        return Some(value);
    }
    let (head, rest) = path.split_once('.')?;
    match doc.get(head)? {
        Bson::Document(sub) => lookup(sub, rest),
        _ => None,
    }
}
