//! Shared request execution and response decoding for the blocking clients.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Build a blocking client; `None` keeps reqwest's default timeout.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ApiError::HttpClient(e.to_string()))
}

/// Send a request and return the JSON body.
///
/// Non-success statuses become `ApiError::Status` carrying the server's
/// `{error}` text. An empty success body decodes as `Value::Null`.
pub(crate) fn execute(request: RequestBuilder, base_url: &str) -> Result<Value, ApiError> {
    let response = request
        .send()
        .map_err(|e| ApiError::from_reqwest(e, base_url))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| ApiError::ResponseParsing(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| ApiError::ResponseParsing(e.to_string()))
}

/// Message from an `{error: "..."}` payload, else the trimmed body.
pub(crate) fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    if let Some(message) = parsed.as_ref().and_then(rejection) {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

/// The `error` field of a success-status payload, if the server put one there.
pub(crate) fn rejection(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Decode a list endpoint. Anything that is not a JSON array reads as empty,
/// and elements that do not decode are skipped so the rest still land.
pub(crate) fn coerce_array<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            tracing::warn!(what, kind = json_kind(&other), "Expected array, treating as empty");
            return Ok(Vec::new());
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(what, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        tracing::warn!(what, kept = decoded.len(), total, "Some records were unreadable");
    }
    Ok(decoded)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    if let Some(message) = rejection(&value) {
        return Err(ApiError::Rejected(message));
    }
    serde_json::from_value(value).map_err(|e| ApiError::ResponseParsing(format!("{what}: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_coerces_to_empty() {
        for value in [json!(null), json!({"dogs": []}), json!("oops"), json!(3)] {
            let parsed: Vec<u32> = coerce_array(value, "numbers").unwrap();
            assert!(parsed.is_empty());
        }
    }

    #[test]
    fn bad_items_are_skipped_and_rest_kept() {
        let parsed: Vec<u32> = coerce_array(json!([1, "two", null, 4]), "numbers").unwrap();
        assert_eq!(parsed, vec![1, 4]);
    }

    #[test]
    fn array_decodes() {
        let parsed: Vec<u32> = coerce_array(json!([1, 2, 3]), "numbers").unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error": "No image file provided"}"#), "No image file provided");
        assert_eq!(error_message("  Bad Gateway "), "Bad Gateway");
        assert_eq!(error_message(""), "Unknown error");
    }

    #[test]
    fn decode_surfaces_rejection() {
        let err = decode::<serde_json::Map<String, Value>>(json!({"error": "Email taken"}), "auth")
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("Email taken".into()));
    }
}
