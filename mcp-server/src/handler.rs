//! Generic request handler for the MCP protocol

use crate::{backend::McpBackend, context::RequestContext};
use echo_scaffolder_protocol::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{Instrument, debug, debug_span, info, warn};

/// Error type for handler operations
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid parameters for {method}: {message}")]
    InvalidParams { method: String, message: String },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] Error),
}

impl From<HandlerError> for Error {
    fn from(err: HandlerError) -> Self {
        match err {
            err @ HandlerError::InvalidParams { .. } => Error::invalid_params(err.to_string()),
            HandlerError::Encode(e) => Error::internal_error(format!("Failed to encode result: {e}")),
            HandlerError::Protocol(e) => e,
        }
    }
}

/// Routes JSON-RPC methods to a backend
#[derive(Clone)]
pub struct GenericServerHandler<B: McpBackend> {
    backend: Arc<B>,
    client_info: Arc<RwLock<Option<Implementation>>>,
}

impl<B: McpBackend> GenericServerHandler<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            client_info: Arc::new(RwLock::new(None)),
        }
    }

    /// Client that completed `initialize`, if any
    pub async fn client_info(&self) -> Option<Implementation> {
        self.client_info.read().await.clone()
    }

    /// Handle one request or notification
    ///
    /// Every failure is folded into an error response carrying the request id.
    pub async fn handle_request(&self, request: Request) -> Response {
        let mut context = RequestContext::new(request.method.clone())
            .with_metadata("jsonrpc_id", request.id.to_string());
        if let Some(client) = self.client_info().await {
            context = context.with_client_info(client);
        }

        let span = debug_span!(
            "request",
            request_id = %context.request_id,
            jsonrpc_id = context.get_metadata("jsonrpc_id").unwrap_or("null"),
            method = %context.method,
            client = context.client_name(),
        );

        async move {
            let id = request.id.clone();
            match self.route(request, &context).await {
                Ok(result) => Response::success(id, result),
                Err(error) => {
                    warn!("Request failed: {}", error);
                    Response::error(id, error.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn route(
        &self,
        request: Request,
        context: &RequestContext,
    ) -> std::result::Result<Value, HandlerError> {
        debug!("Handling request");

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "notifications/initialized" => {
                info!(client = context.client_name(), "Client initialized");
                Ok(empty_result())
            }
            "ping" => Ok(empty_result()),
            "tools/list" => self.handle_list_tools(request).await,
            "tools/call" => self.handle_call_tool(request).await,
            method => Err(Error::method_not_found(method).into()),
        }
    }

    async fn handle_initialize(&self, request: Request) -> std::result::Result<Value, HandlerError> {
        let params: InitializeRequestParam = parse_params(&request.method, request.params)?;
        let protocol_version = negotiate_protocol_version(&params.protocol_version);

        if protocol_version != params.protocol_version {
            warn!(
                requested = %params.protocol_version,
                offered = protocol_version,
                "Unsupported protocol version requested"
            );
        }

        self.backend
            .on_client_connect(&params.client_info)
            .await
            .map_err(Into::<Error>::into)?;

        info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol_version,
            "Client connected"
        );
        *self.client_info.write().await = Some(params.client_info);

        let server_info = self.backend.get_server_info();
        let result = InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: server_info.capabilities,
            server_info: server_info.server_info,
            instructions: server_info.instructions,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_list_tools(&self, request: Request) -> std::result::Result<Value, HandlerError> {
        let params: PaginatedRequestParam = parse_optional_params(&request.method, request.params)?;

        let result = self
            .backend
            .list_tools(params)
            .await
            .map_err(Into::<Error>::into)?;

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_call_tool(&self, request: Request) -> std::result::Result<Value, HandlerError> {
        let params: CallToolRequestParam = parse_params(&request.method, request.params)?;
        debug!(tool = %params.name, "Calling tool");

        let result = self
            .backend
            .call_tool(params)
            .await
            .map_err(Into::<Error>::into)?;

        Ok(serde_json::to_value(result)?)
    }
}

fn empty_result() -> Value {
    Value::Object(Default::default())
}

fn parse_params<T: DeserializeOwned>(
    method: &str,
    params: Value,
) -> std::result::Result<T, HandlerError> {
    serde_json::from_value(params).map_err(|e| HandlerError::InvalidParams {
        method: method.to_string(),
        message: e.to_string(),
    })
}

/// Like [`parse_params`], but absent params mean the default value
fn parse_optional_params<T: DeserializeOwned + Default>(
    method: &str,
    params: Value,
) -> std::result::Result<T, HandlerError> {
    if params.is_null() {
        Ok(T::default())
    } else {
        parse_params(method, params)
    }
}
