//! MCP server infrastructure with a pluggable backend
//!
//! The crate routes JSON-RPC methods (`initialize`, `ping`, `tools/list`,
//! `tools/call`) to an [`McpBackend`] and drives the session over a
//! [`Transport`], stdio by default.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use echo_scaffolder_server::{BackendError, McpBackend, McpServer, ServerConfig};
//! use echo_scaffolder_protocol::*;
//! use std::result::Result;
//! use async_trait::async_trait;
//!
//! #[derive(Clone)]
//! struct MyBackend;
//!
//! #[async_trait]
//! impl McpBackend for MyBackend {
//!     type Error = BackendError;
//!     type Config = ();
//!
//!     async fn initialize(_: ()) -> Result<Self, Self::Error> {
//!         Ok(MyBackend)
//!     }
//!
//!     fn get_server_info(&self) -> ServerInfo {
//!         ServerInfo {
//!             capabilities: ServerCapabilities::tools_only(),
//!             server_info: Implementation {
//!                 name: "My Server".to_string(),
//!                 version: "1.0.0".to_string(),
//!             },
//!             instructions: None,
//!         }
//!     }
//!
//!     async fn health_check(&self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     async fn list_tools(&self, _: PaginatedRequestParam) -> Result<ListToolsResult, Self::Error> {
//!         Ok(ListToolsResult { tools: vec![], next_cursor: None })
//!     }
//!
//!     async fn call_tool(&self, request: CallToolRequestParam) -> Result<CallToolResult, Self::Error> {
//!         Err(BackendError::unknown_tool(request.name))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MyBackend::initialize(()).await?;
//!     let mut server = McpServer::new(backend, ServerConfig::default())?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod context;
pub mod handler;
#[cfg(feature = "stdio-logging")]
pub mod logging;
pub mod server;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod server_tests;

pub use backend::{BackendError, McpBackend};
pub use context::RequestContext;
pub use handler::{GenericServerHandler, HandlerError};
#[cfg(feature = "stdio-logging")]
pub use logging::{LogFormat, LoggingConfig, LoggingError};
pub use server::{HealthStatus, McpServer, ServerConfig, ServerError};

pub use echo_scaffolder_protocol::{self as protocol, *};
pub use echo_scaffolder_transport::{self as transport, StdioConfig, Transport};
