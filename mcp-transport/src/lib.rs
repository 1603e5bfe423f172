//! Stdio transport for the Echo scaffolder MCP server
//!
//! Messages are newline-delimited JSON-RPC 2.0 objects (or batches) read
//! from stdin; every response is written as a single line on stdout.
//! Nothing else may be written to stdout.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use echo_scaffolder_transport::{RequestHandler, StdioTransport, Transport};
//! use echo_scaffolder_protocol::{Request, Response};
//! use futures::FutureExt;
//!
//! # async fn run() -> Result<(), echo_scaffolder_transport::TransportError> {
//! let handler: RequestHandler = Box::new(|request: Request| {
//!     async move { Response::empty(request.id) }.boxed()
//! });
//!
//! let mut transport = StdioTransport::new();
//! transport.start(handler).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod stdio;
pub mod validation;

#[cfg(test)]
mod batch_tests;

use async_trait::async_trait;
use echo_scaffolder_protocol::{Request, Response};
use futures::future::BoxFuture;
use thiserror::Error as ThisError;

pub use stdio::{StdioConfig, StdioTransport};

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Request handler function type
///
/// Called once per request or notification. The returned response is
/// discarded for notifications.
pub type RequestHandler = Box<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Transport layer trait
#[async_trait]
pub trait Transport: Send + Sync {
    /// Serve requests until the peer closes the stream or `stop` is called
    async fn start(&mut self, handler: RequestHandler) -> std::result::Result<(), TransportError>;
    async fn stop(&mut self) -> std::result::Result<(), TransportError>;
    async fn health_check(&self) -> std::result::Result<(), TransportError>;
}
