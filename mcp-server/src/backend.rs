//! The seam between protocol handling and the tools a server offers

use async_trait::async_trait;
use echo_scaffolder_protocol::*;
use std::error::Error as StdError;
use thiserror::Error;

/// Failures any backend can report, whatever its own error type
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Backend failure: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn not_supported(what: impl Into<String>) -> Self {
        Self::NotSupported(what.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::UnknownTool(name) => Error::tool_not_found(name),
            BackendError::InvalidParams(message) => Error::invalid_params(message),
            BackendError::NotSupported(what) => Error::method_not_found(what),
            BackendError::Internal(message) => Error::internal_error(message),
        }
    }
}

/// A tool provider
///
/// Implementors only deal in typed params and results; routing, version
/// negotiation and framing happen in [`GenericServerHandler`](crate::GenericServerHandler).
#[async_trait]
pub trait McpBackend: Send + Sync + Clone {
    /// Must map onto a JSON-RPC error
    type Error: StdError + Send + Sync + Into<Error> + From<BackendError> + 'static;

    type Config: Clone + Send + Sync;

    async fn initialize(config: Self::Config) -> std::result::Result<Self, Self::Error>;

    /// Name, version and capabilities reported by `initialize`
    fn get_server_info(&self) -> ServerInfo;

    async fn health_check(&self) -> std::result::Result<(), Self::Error>;

    async fn list_tools(
        &self,
        request: PaginatedRequestParam,
    ) -> std::result::Result<ListToolsResult, Self::Error>;

    /// Run a tool
    ///
    /// Failures caused by the tool's input belong in the returned
    /// `CallToolResult`; `Err` is reserved for protocol-level problems such
    /// as an unknown tool name.
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> std::result::Result<CallToolResult, Self::Error>;

    /// Runs before the first line is read
    async fn on_startup(&self) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Runs once the transport has stopped, however the session ended
    async fn on_shutdown(&self) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Runs when a client completes `initialize`; an error rejects it
    async fn on_client_connect(
        &self,
        client_info: &Implementation,
    ) -> std::result::Result<(), Self::Error> {
        let _ = client_info;
        Ok(())
    }
}
