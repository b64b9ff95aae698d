use serde_json::{Map, Number, Value, json};

use crate::domain::errors::DomainError;
use crate::domain::models::document::{Document, DocumentFields};

/// Wrap a plain JSON value in Firestore's typed value envelope
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                json!({ "integerValue": integer.to_string() })
            } else if let Some(integer) = number.as_u64() {
                json!({ "integerValue": integer.to_string() })
            } else {
                json!({ "doubleValue": number.as_f64().unwrap_or_default() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(fields: &DocumentFields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

/// Unwrap a Firestore typed value into plain JSON.
///
/// Timestamps, references and bytes come back as their string form.
pub fn decode_value(value: &Value) -> Result<Value, DomainError> {
    let Some(object) = value.as_object() else {
        return Err(invalid(format!("expected a typed value, got {}", value)));
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Err(invalid("empty typed value".to_string()));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| invalid(format!("bad booleanValue: {}", inner))),
        "integerValue" => decode_integer(inner),
        "doubleValue" => match inner {
            Value::Number(number) => Ok(Value::Number(number.clone())),
            Value::String(text) => text
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(format!("bad doubleValue: {}", text))),
            other => Err(invalid(format!("bad doubleValue: {}", other))),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|text| Value::String(text.to_string()))
            .ok_or_else(|| invalid(format!("bad {}: {}", kind, inner))),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let items = match inner.get("values") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(items))
        }
        "mapValue" => Ok(Value::Object(decode_fields(
            inner.get("fields").and_then(Value::as_object),
        )?)),
        other => Err(invalid(format!("unsupported value type {}", other))),
    }
}

pub fn decode_fields(fields: Option<&Map<String, Value>>) -> Result<DocumentFields, DomainError> {
    let mut decoded = DocumentFields::new();
    if let Some(fields) = fields {
        for (key, value) in fields {
            decoded.insert(key.clone(), decode_value(value)?);
        }
    }
    Ok(decoded)
}

/// Turn a Firestore REST document into a `Document`; the id is the last
/// segment of its resource name
pub fn decode_document(document: &Value) -> Result<Document, DomainError> {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("document without a name".to_string()))?;
    let id = document_id(name)
        .ok_or_else(|| invalid(format!("bad document name: {}", name)))?;

    let fields = decode_fields(document.get("fields").and_then(Value::as_object))?;
    Ok(Document::new(id, fields))
}

pub fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

fn decode_integer(inner: &Value) -> Result<Value, DomainError> {
    match inner {
        Value::Number(number) => Ok(Value::Number(number.clone())),
        Value::String(text) => {
            if let Ok(integer) = text.parse::<i64>() {
                Ok(Value::from(integer))
            } else {
                text.parse::<u64>()
                    .map(Value::from)
                    .map_err(|_| invalid(format!("bad integerValue: {}", text)))
            }
        }
        other => Err(invalid(format!("bad integerValue: {}", other))),
    }
}

fn invalid(message: String) -> DomainError {
    DomainError::InvalidData(format!("Firestore: {}", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_player_fields() {
        let fields = match json!({
            "fullName": "Ada Striker",
            "age": 24,
            "rating": 7.5,
            "retired": false,
            "pfp": null
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let encoded = encode_fields(&fields);

        assert_eq!(encoded["fullName"], json!({ "stringValue": "Ada Striker" }));
        assert_eq!(encoded["age"], json!({ "integerValue": "24" }));
        assert_eq!(encoded["rating"], json!({ "doubleValue": 7.5 }));
        assert_eq!(encoded["retired"], json!({ "booleanValue": false }));
        assert_eq!(encoded["pfp"], json!({ "nullValue": null }));
    }

    #[test]
    fn decodes_nested_trophy_document() {
        let document = json!({
            "name": "projects/league/databases/(default)/documents/trophies/abc123",
            "fields": {
                "name": { "stringValue": "League Cup" },
                "awards": { "arrayValue": { "values": [
                    { "stringValue": "Golden Boot" },
                    { "stringValue": "MVP" }
                ] } },
                "awardWinners": { "mapValue": { "fields": {
                    "MVP": { "stringValue": "p2" }
                } } },
                "season": { "integerValue": "2024" },
                "createdAt": { "timestampValue": "2024-05-01T10:00:00Z" },
                "tags": { "arrayValue": {} }
            }
        });

        let decoded = decode_document(&document).expect("document should decode");

        assert_eq!(decoded.id, "abc123");
        assert_eq!(decoded.fields["awards"], json!(["Golden Boot", "MVP"]));
        assert_eq!(decoded.fields["awardWinners"], json!({ "MVP": "p2" }));
        assert_eq!(decoded.fields["season"], json!(2024));
        assert_eq!(decoded.fields["createdAt"], json!("2024-05-01T10:00:00Z"));
        assert_eq!(decoded.fields["tags"], json!([]));
    }

    #[test]
    fn encoded_values_decode_back() {
        let original = json!({ "goals": 12, "club": "Riverside FC", "awards": ["MVP"] });

        let decoded = decode_value(&encode_value(&original)).expect("decode");

        assert_eq!(decoded, original);
    }

    #[test]
    fn rejects_unknown_value_types() {
        assert!(decode_value(&json!({ "mysteryValue": 1 })).is_err());
        assert!(decode_value(&json!("bare")).is_err());
    }
}
