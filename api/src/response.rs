//! Response body handling shared by the HTTP backend.

use bux_types::Transaction;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Parse a response body as JSON. An empty body is `Value::Null`.
pub fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {e}")))
}

/// Extract the human-readable message from an error body.
///
/// Backends send either plain text or a JSON string literal; the quotes of the
/// latter are stripped.
pub fn error_message(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<String>(text) {
        Ok(s) => Some(s),
        Err(_) => Some(text.to_string()),
    }
}

/// Interpret a transaction list payload.
///
/// A present payload must be a JSON object or array; anything else is an
/// error rather than an empty list. A missing payload, or an object without
/// a `transactions` field, is an empty list.
pub fn transactions_from(value: Value) -> Result<Vec<Transaction>, ApiError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => decode(value, "transaction list"),
        Value::Object(ref map) => match map.get("transactions") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(inner) => decode(inner.clone(), "transaction list"),
        },
        other => Err(ApiError::MalformedResponse(format!(
            "expected a transaction list, got {}",
            kind(&other)
        ))),
    }
}

/// Deserialize a typed payload, mapping failures to `MalformedResponse`.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid {what}: {e}")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
