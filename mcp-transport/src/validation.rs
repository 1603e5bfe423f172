//! Framing and shape checks for incoming stdio lines

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Message contains embedded newlines")]
    EmbeddedNewlines,

    #[error("Message is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Request ID cannot be null")]
    NullRequestId,

    #[error("Message is {size} bytes, limit is {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Invalid JSON-RPC format: {0}")]
    InvalidFormat(String),
}

impl ValidationError {
    fn format(reason: &str) -> Self {
        Self::InvalidFormat(reason.to_string())
    }
}

/// What a well-formed JSON-RPC object turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Request,
    Response,
    Notification,
}

/// Decode one raw line into text
pub fn decode_line(bytes: &[u8]) -> Result<&str, ValidationError> {
    std::str::from_utf8(bytes).map_err(|e| ValidationError::InvalidUtf8(e.to_string()))
}

/// A line must be a single line, and no longer than `max_size` when given
pub fn validate_message_string(message: &str, max_size: Option<usize>) -> Result<(), ValidationError> {
    if message.contains(['\n', '\r']) {
        return Err(ValidationError::EmbeddedNewlines);
    }

    match max_size {
        Some(max) if message.len() > max => Err(ValidationError::MessageTooLarge {
            size: message.len(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Classify a parsed message, rejecting anything that is not JSON-RPC 2.0
///
/// Requests must not carry a `null` id; a missing id makes a notification.
pub fn validate_jsonrpc_message(value: &Value) -> Result<MessageType, ValidationError> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationError::format("Message must be a JSON object"));
    };

    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Err(ValidationError::format("Missing or invalid jsonrpc field"));
    }

    match obj.get("method") {
        Some(Value::String(_)) => classify_call(obj),
        Some(_) => Err(ValidationError::format("Method must be a string")),
        None if is_reply(obj) => {
            if obj.contains_key("id") {
                Ok(MessageType::Response)
            } else {
                Err(ValidationError::format("Response must have an ID"))
            }
        }
        None => Err(ValidationError::format("Unknown message type")),
    }
}

fn classify_call(obj: &Map<String, Value>) -> Result<MessageType, ValidationError> {
    match obj.get("id") {
        None => Ok(MessageType::Notification),
        Some(Value::Null) => Err(ValidationError::NullRequestId),
        Some(_) => Ok(MessageType::Request),
    }
}

fn is_reply(obj: &Map<String, Value>) -> bool {
    obj.contains_key("result") || obj.contains_key("error")
}

/// Best-effort id of a line that failed validation or parsing
///
/// Falls back to pattern matching when the text is not JSON; `null` when
/// nothing usable is found.
pub fn extract_id_from_malformed(text: &str) -> Value {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        return obj.get("id").cloned().unwrap_or(Value::Null);
    }

    extract_id_with_regex(text).unwrap_or(Value::Null)
}

static STRING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""id"\s*:\s*"([^"]*)""#).expect("valid string id pattern"));
static NUMBER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""id"\s*:\s*(-?\d+)"#).expect("valid number id pattern"));

fn extract_id_with_regex(text: &str) -> Option<Value> {
    if let Some(captures) = STRING_ID.captures(text) {
        return Some(Value::String(captures[1].to_string()));
    }

    NUMBER_ID
        .captures(text)
        .and_then(|captures| captures[1].parse::<i64>().ok())
        .map(|n| Value::Number(n.into()))
}
