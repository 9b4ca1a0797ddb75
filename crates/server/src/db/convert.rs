//! JSON <-> BSON conversion at the HTTP boundary.
//!
//! Request bodies arrive as free-form JSON objects and are stored as-is.
//! Responses render `ObjectId`s as bare hex strings and dates as RFC 3339,
//! everything else as relaxed extended JSON.

use bson::{Bson, Document};
use coffee_core::object_id_hex;
use serde_json::{Map, Value};

use super::StoreError;

/// Encode a JSON object body as a BSON document, preserving field order.
///
/// # Errors
///
/// Returns `StoreError::Encoding` for values BSON cannot hold (integers above
/// `i64::MAX`).
pub fn object_to_document(body: &Map<String, Value>) -> Result<Document, StoreError> {
    Ok(bson::to_document(body)?)
}

/// Encode a single JSON value.
///
/// # Errors
///
/// Returns `StoreError::Encoding` for values BSON cannot hold.
pub fn value_to_bson(value: &Value) -> Result<Bson, StoreError> {
    Ok(bson::to_bson(value)?)
}

/// Render a stored document as a JSON object.
#[must_use]
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Render a single BSON value.
#[must_use]
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(object_id_hex(&id)),
        Bson::DateTime(at) => at
            .try_to_rfc3339_string()
            .map_or_else(|_| Bson::DateTime(at).into_relaxed_extjson(), Value::String),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bson::{doc, oid::ObjectId};
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_body_is_stored_verbatim() {
        let body = object(json!({
            "name": "Latte",
            "taste": "sweet",
            "price": 4.5,
            "shots": 2,
            "tags": ["hot", "milk"],
            "origin": { "country": "Colombia" },
            "photo": null
        }));

        let document = object_to_document(&body).unwrap();

        let keys: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "taste", "price", "shots", "tags", "origin", "photo"]);
        assert_eq!(document.get_str("name").unwrap(), "Latte");
        assert_eq!(document.get_f64("price").unwrap(), 4.5);
        assert_eq!(document.get_document("origin").unwrap().get_str("country").unwrap(), "Colombia");
        assert_eq!(document.get("photo"), Some(&Bson::Null));
    }

    #[test]
    fn test_object_id_renders_as_hex() {
        let id = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let rendered = document_to_json(doc! { "_id": id, "name": "Mocha" });

        assert_eq!(rendered, json!({ "_id": "64b7f0c2a1b2c3d4e5f60718", "name": "Mocha" }));
    }

    #[test]
    fn test_nested_values_render() {
        let id = ObjectId::new();
        let rendered = document_to_json(doc! {
            "refs": [id, 3_i32],
            "meta": { "owner": id, "ok": true },
        });

        assert_eq!(rendered["refs"], json!([id.to_hex(), 3]));
        assert_eq!(rendered["meta"]["owner"], json!(id.to_hex()));
        assert_eq!(rendered["meta"]["ok"], json!(true));
    }

    #[test]
    fn test_datetime_renders_rfc3339() {
        let at = bson::DateTime::from_millis(0);
        assert_eq!(bson_to_json(Bson::DateTime(at)), json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn test_json_round_trip_keeps_plain_values() {
        let body = object(json!({ "email": "a@x.com", "lastSignIn": "2024-01-01T10:00:00Z" }));
        let document = object_to_document(&body).unwrap();
        assert_eq!(document_to_json(document), Value::Object(body));
    }

    #[test]
    fn test_value_to_bson() {
        assert_eq!(value_to_bson(&json!("a@x.com")).unwrap(), Bson::String("a@x.com".into()));
        assert_eq!(value_to_bson(&Value::Null).unwrap(), Bson::Null);
    }

    #[test]
    fn test_out_of_range_integer_is_rejected() {
        let body = object(json!({ "big": u64::MAX }));
        assert!(matches!(object_to_document(&body), Err(StoreError::Encoding(_))));
    }
}
