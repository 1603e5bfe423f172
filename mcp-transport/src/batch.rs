//! JSON-RPC single and batch message dispatch

use crate::{
    RequestHandler,
    validation::{MessageType, validate_jsonrpc_message},
};
use echo_scaffolder_protocol::{Error, Request, Response};
use serde_json::Value;
use tracing::{debug, warn};

/// A JSON-RPC message that can be either single or batch
#[derive(Debug, Clone)]
pub enum JsonRpcMessage {
    Single(Value),
    Batch(Vec<Value>),
}

impl JsonRpcMessage {
    /// Parse a JSON string into a JsonRpcMessage
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(text)? {
            Value::Array(values) => Ok(JsonRpcMessage::Batch(values)),
            value => Ok(JsonRpcMessage::Single(value)),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            JsonRpcMessage::Single(value) => serde_json::to_string(value),
            JsonRpcMessage::Batch(values) => serde_json::to_string(values),
        }
    }
}

/// Run every request and notification in `message` through `handler`
///
/// Returns `None` when nothing needs to be written back (only notifications
/// or client responses). An empty batch is itself an invalid request.
pub async fn process_message(
    message: JsonRpcMessage,
    handler: &RequestHandler,
) -> Result<Option<JsonRpcMessage>, serde_json::Error> {
    match message {
        JsonRpcMessage::Single(value) => match dispatch_value(value, handler).await {
            Some(response) => Ok(Some(JsonRpcMessage::Single(serde_json::to_value(
                response,
            )?))),
            None => Ok(None),
        },
        JsonRpcMessage::Batch(values) if values.is_empty() => {
            let response = create_error_response(
                Error::invalid_request("Batch cannot be empty"),
                Value::Null,
            );
            Ok(Some(JsonRpcMessage::Single(serde_json::to_value(
                response,
            )?)))
        }
        JsonRpcMessage::Batch(values) => {
            debug!("Processing batch of {} messages", values.len());

            let mut responses = Vec::new();
            for value in values {
                if let Some(response) = dispatch_value(value, handler).await {
                    responses.push(serde_json::to_value(response)?);
                }
            }

            if responses.is_empty() {
                Ok(None)
            } else {
                Ok(Some(JsonRpcMessage::Batch(responses)))
            }
        }
    }
}

/// Validate and dispatch one message object
async fn dispatch_value(value: Value, handler: &RequestHandler) -> Option<Response> {
    let message_type = match validate_jsonrpc_message(&value) {
        Ok(message_type) => message_type,
        Err(e) => {
            warn!("JSON-RPC validation failed: {}", e);
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(create_error_response(
                Error::invalid_request(format!("Invalid JSON-RPC: {e}")),
                id,
            ));
        }
    };

    if message_type == MessageType::Response {
        debug!("Ignoring client response message");
        return None;
    }

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: Request = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return Some(create_error_response(
                Error::invalid_request(format!("Invalid request: {e}")),
                id,
            ));
        }
    };

    match message_type {
        MessageType::Notification => {
            debug!("Processing notification: {}", request.method);
            let _ = handler(request).await;
            None
        }
        _ => {
            debug!("Processing request: {} (ID: {})", request.method, request.id);
            Some(handler(request).await)
        }
    }
}

/// Create an error response for a malformed request
pub fn create_error_response(error: Error, request_id: Value) -> Response {
    Response::error(request_id, error)
}
