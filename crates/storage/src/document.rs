//! Stored document representation
//!
//! Documents are schemaless JSON objects. The store-generated id is kept
//! outside the body; callers attach it on read when they need it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use ticketmaster_core::DocumentId;

use crate::error::{StoreError, StoreResult};

/// A stored JSON object
pub type Document = Map<String, Value>;

/// Encode a typed value as a document body.
///
/// # Errors
///
/// Fails with `StoreError::Serialization` if `value` does not encode to a
/// JSON object.
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "document body must be an object, got {}",
            other
        ))),
    }
}

/// Decode a document body into a typed value.
///
/// # Errors
///
/// Fails with `StoreError::Serialization` if the body does not match `T`.
pub fn from_document<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Decode a document body, attaching its id under `id_field` first.
///
/// # Errors
///
/// Fails with `StoreError::Serialization` if the body does not match `T`.
pub fn from_document_with_id<T: DeserializeOwned>(
    id: &DocumentId,
    id_field: &str,
    mut document: Document,
) -> StoreResult<T> {
    document.insert(id_field.to_string(), Value::String(id.to_string()));
    from_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        n: i64,
    }

    #[test]
    fn test_to_document_rejects_scalars() {
        assert!(to_document(&42).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }

    #[test]
    fn test_from_document_with_id_attaches_id() {
        let mut doc = Document::new();
        doc.insert("n".into(), json!(5));
        let row: Row = from_document_with_id(&DocumentId::from("x1"), "id", doc).unwrap();
        assert_eq!(
            row,
            Row {
                id: "x1".into(),
                n: 5
            }
        );
    }

    #[test]
    fn test_from_document_type_mismatch() {
        let mut doc = Document::new();
        doc.insert("n".into(), json!("five"));
        let result: StoreResult<Row> = from_document_with_id(&DocumentId::from("x1"), "id", doc);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
