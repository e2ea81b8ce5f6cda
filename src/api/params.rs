//! Request parsing, validation helpers, and response bodies.
//!
//! Request bodies are read as loose JSON so that a field of the wrong type
//! produces the field's own validation message instead of a generic
//! deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::{messages, ApiError};
use crate::entity::{StoredTodo, TodoPatch};

// ============================================================================
// Request parsing
// ============================================================================

/// Parse a request body into its top-level fields.
///
/// An empty body has no fields. So does a well-formed JSON value that is not
/// an object.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            Err(ApiError::bad_request(messages::INVALID_JSON))
        }
    }
}

/// Extract the `text` of a create request. Trimming is left to the store.
pub fn create_text(fields: &Map<String, Value>) -> Result<&str, ApiError> {
    match fields.get("text") {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.as_str()),
        _ => Err(ApiError::bad_request(messages::TEXT_REQUIRED)),
    }
}

/// Build a patch from an update request.
///
/// A field that is present, including an explicit `null`, must have the
/// right type.
pub fn update_patch(fields: &Map<String, Value>) -> Result<TodoPatch, ApiError> {
    let text = match fields.get("text") {
        None => None,
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(_) => return Err(ApiError::bad_request(messages::TEXT_NOT_STRING)),
    };

    let completed = match fields.get("completed") {
        None => None,
        Some(Value::Bool(done)) => Some(*done),
        Some(_) => return Err(ApiError::bad_request(messages::COMPLETED_NOT_BOOLEAN)),
    };

    Ok(TodoPatch { text, completed })
}

/// Parse the decimal prefix of a path id: leading whitespace, an optional
/// sign, then as many decimal digits as there are. Trailing characters are
/// ignored, and there is no radix prefix handling (`"0x1A"` reads as 0).
/// Returns `None` when there are no leading digits.
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub todo: StoredTodo,
}

impl DeleteResponse {
    pub fn new(todo: StoredTodo) -> Self {
        Self {
            message: messages::DELETED.to_string(),
            todo,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub todos_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_parse_body_empty_and_non_object() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"  \n").unwrap().is_empty());
        assert!(parse_body(b"[1, 2]").unwrap().is_empty());
        assert!(parse_body(b"\"text\"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_body_malformed() {
        let err = parse_body(b"{\"text\": ").unwrap_err();
        assert_eq!(err, ApiError::bad_request(messages::INVALID_JSON));
    }

    #[test]
    fn test_create_text_rules() {
        assert_eq!(create_text(&fields(json!({"text": " Buy milk "}))).unwrap(), " Buy milk ");

        for body in [
            json!({}),
            json!({"text": ""}),
            json!({"text": "   "}),
            json!({"text": 42}),
            json!({"text": null}),
            json!({"text": ["a"]}),
        ] {
            let err = create_text(&fields(body)).unwrap_err();
            assert_eq!(err, ApiError::bad_request(messages::TEXT_REQUIRED));
        }
    }

    #[test]
    fn test_update_patch_accepts_partial_bodies() {
        assert_eq!(update_patch(&Map::new()).unwrap(), TodoPatch::default());

        let patch = update_patch(&fields(json!({"completed": true}))).unwrap();
        assert_eq!(patch.text, None);
        assert_eq!(patch.completed, Some(true));

        let patch = update_patch(&fields(json!({"text": "New", "completed": false}))).unwrap();
        assert_eq!(patch.text.as_deref(), Some("New"));
        assert_eq!(patch.completed, Some(false));
    }

    #[test]
    fn test_update_patch_rejects_wrong_types() {
        for body in [json!({"text": ""}), json!({"text": 1}), json!({"text": null})] {
            assert_eq!(
                update_patch(&fields(body)).unwrap_err(),
                ApiError::bad_request(messages::TEXT_NOT_STRING)
            );
        }
        for body in [
            json!({"completed": "true"}),
            json!({"completed": 1}),
            json!({"completed": null}),
        ] {
            assert_eq!(
                update_patch(&fields(body)).unwrap_err(),
                ApiError::bad_request(messages::COMPLETED_NOT_BOOLEAN)
            );
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("  7"), Some(7));
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("+5"), Some(5));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id("0x1A"), Some(0));
        assert_eq!(parse_id("99999999999999999999999"), None);
    }

    #[test]
    fn test_health_response_shape() {
        let health = HealthResponse {
            status: "OK".to_string(),
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            todos_count: 3,
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json, json!({"status": "OK", "timestamp": "2024-05-01T12:00:00.000Z", "todosCount": 3}));
    }
}
