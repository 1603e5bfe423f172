//! Server lifecycle: backend hooks around a transport session

use crate::{backend::McpBackend, handler::GenericServerHandler};
use echo_scaffolder_protocol::ServerInfo;
use echo_scaffolder_transport::{RequestHandler, StdioConfig, StdioTransport, Transport};
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use thiserror::Error;
use tokio::signal;
use tracing::{error, info, warn};

/// Error type for server operations
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Server already running")]
    AlreadyRunning,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Settings for the stdio transport
    pub transport_config: StdioConfig,

    /// Stop serving on Ctrl-C
    pub graceful_shutdown: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport_config: StdioConfig::default(),
            graceful_shutdown: true,
        }
    }
}

/// Generic MCP server with pluggable backend
pub struct McpServer<B: McpBackend> {
    backend: Arc<B>,
    handler: GenericServerHandler<B>,
    transport: Box<dyn Transport>,
    config: ServerConfig,
    running: Arc<AtomicBool>,
}

impl<B: McpBackend + 'static> McpServer<B> {
    /// Create a server that talks over stdin/stdout
    pub fn new(backend: B, config: ServerConfig) -> std::result::Result<Self, ServerError> {
        if config.transport_config.max_message_size == 0 {
            return Err(ServerError::Configuration(
                "max_message_size must be greater than zero".to_string(),
            ));
        }

        let transport = Box::new(StdioTransport::with_config(config.transport_config.clone()));
        Ok(Self::with_transport(backend, config, transport))
    }

    /// Create a server over an arbitrary transport
    pub fn with_transport(backend: B, config: ServerConfig, transport: Box<dyn Transport>) -> Self {
        info!("Initializing MCP server with backend");

        let backend = Arc::new(backend);
        let handler = GenericServerHandler::new(backend.clone());

        Self {
            backend,
            handler,
            transport,
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Serve until the client closes the stream or Ctrl-C is received
    ///
    /// `on_startup` runs before the first request is read and `on_shutdown`
    /// after the transport stops, whichever way the session ended.
    pub async fn run(&mut self) -> std::result::Result<(), ServerError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ServerError::AlreadyRunning);
        }

        info!(
            server = %self.get_server_info().server_info.name,
            "Starting MCP server"
        );

        if let Err(e) = self.backend.on_startup().await {
            self.running.store(false, Ordering::SeqCst);
            return Err(ServerError::Backend(e.to_string()));
        }

        let served = self.serve().await;

        if let Err(e) = self.transport.stop().await {
            warn!("Failed to stop transport: {}", e);
        }

        let shutdown = self
            .backend
            .on_shutdown()
            .await
            .map_err(|e| ServerError::Backend(e.to_string()));

        self.running.store(false, Ordering::SeqCst);
        info!("MCP server stopped");

        served.and(shutdown)
    }

    async fn serve(&mut self) -> std::result::Result<(), ServerError> {
        let handler = self.request_handler();

        if !self.config.graceful_shutdown {
            return self
                .transport
                .start(handler)
                .await
                .map_err(|e| ServerError::Transport(e.to_string()));
        }

        tokio::select! {
            served = self.transport.start(handler) => {
                served.map_err(|e| ServerError::Transport(e.to_string()))
            }
            signal = signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        warn!("Shutdown signal received");
                        Ok(())
                    }
                    Err(e) => {
                        error!("Failed to listen for Ctrl-C: {}", e);
                        Err(ServerError::Transport(format!("Signal handler error: {e}")))
                    }
                }
            }
        }
    }

    fn request_handler(&self) -> RequestHandler {
        let handler = self.handler.clone();
        Box::new(move |request| {
            let handler = handler.clone();
            async move { handler.handle_request(request).await }.boxed()
        })
    }

    /// Health of the backend and the transport
    pub async fn health_check(&self) -> HealthStatus {
        let backend_healthy = self.backend.health_check().await.is_ok();
        let transport_healthy = self.transport.health_check().await.is_ok();

        HealthStatus {
            status: if backend_healthy && transport_healthy {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            components: HashMap::from([
                ("backend".to_string(), backend_healthy),
                ("transport".to_string(), transport_healthy),
            ]),
        }
    }

    pub fn get_server_info(&self) -> ServerInfo {
        self.backend.get_server_info()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Health status information
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub components: HashMap<String, bool>,
}
