//! Tests for server lifecycle

use crate::backend::{BackendError, McpBackend};
use crate::server::{McpServer, ServerConfig, ServerError};
use async_trait::async_trait;
use echo_scaffolder_protocol::*;
use std::result::Result;
use echo_scaffolder_transport::{RequestHandler, StdioConfig, Transport, TransportError};
use serde_json::json;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

#[derive(Clone, Default)]
struct MockServerBackend {
    fail_startup: bool,
    fail_health: bool,
    startups: Arc<AtomicUsize>,
    shutdowns: Arc<AtomicUsize>,
}

#[async_trait]
impl McpBackend for MockServerBackend {
    type Error = BackendError;
    type Config = ();

    async fn initialize(_: ()) -> Result<Self, Self::Error> {
        Ok(Self::default())
    }

    fn get_server_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::tools_only(),
            server_info: Implementation {
                name: "Mock Server".to_string(),
                version: "0.1.0".to_string(),
            },
            instructions: None,
        }
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        if self.fail_health {
            Err(BackendError::internal("unhealthy"))
        } else {
            Ok(())
        }
    }

    async fn list_tools(&self, _: PaginatedRequestParam) -> Result<ListToolsResult, Self::Error> {
        Ok(ListToolsResult {
            tools: vec![],
            next_cursor: None,
        })
    }

    async fn call_tool(&self, request: CallToolRequestParam) -> Result<CallToolResult, Self::Error> {
        Err(BackendError::unknown_tool(request.name))
    }

    async fn on_startup(&self) -> Result<(), Self::Error> {
        if self.fail_startup {
            return Err(BackendError::internal("startup failed"));
        }
        self.startups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn on_shutdown(&self) -> Result<(), Self::Error> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Feeds a fixed list of requests to the handler and records the replies
#[derive(Default)]
struct ScriptedTransport {
    requests: Vec<Request>,
    responses: Arc<Mutex<Vec<Response>>>,
    running: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn start(&mut self, handler: RequestHandler) -> Result<(), TransportError> {
        self.running.store(true, Ordering::SeqCst);
        for request in self.requests.drain(..) {
            let notification = request.is_notification();
            let response = handler(request).await;
            if !notification {
                self.responses
                    .lock()
                    .map_err(|e| TransportError::Connection(e.to_string()))?
                    .push(response);
            }
        }
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), TransportError> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        if self.running.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TransportError::Connection("not running".to_string()))
        }
    }
}

fn quiet_config() -> ServerConfig {
    ServerConfig {
        graceful_shutdown: false,
        ..ServerConfig::default()
    }
}

#[test]
fn test_default_config() {
    let config = ServerConfig::default();
    assert!(config.graceful_shutdown);
    assert_eq!(config.transport_config.max_message_size, 10 * 1024 * 1024);
}

#[test]
fn test_zero_message_size_rejected() {
    let config = ServerConfig {
        transport_config: StdioConfig {
            max_message_size: 0,
            validate_messages: true,
        },
        graceful_shutdown: false,
    };

    let result = McpServer::new(MockServerBackend::default(), config);
    assert!(matches!(result, Err(ServerError::Configuration(_))));
}

#[tokio::test]
async fn test_run_serves_session_and_calls_hooks() {
    let backend = MockServerBackend::default();
    let responses = Arc::new(Mutex::new(Vec::new()));
    let stopped = Arc::new(AtomicBool::new(false));
    let transport = ScriptedTransport {
        requests: vec![
            Request::new(
                json!(1),
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "clientInfo": { "name": "c", "version": "1" }
                }),
            ),
            Request::new(serde_json::Value::Null, "notifications/initialized", json!({})),
            Request::new(json!(2), "tools/list", json!({})),
            Request::new(json!(3), "tools/call", json!({"name": "nope"})),
        ],
        responses: responses.clone(),
        stopped: stopped.clone(),
        ..ScriptedTransport::default()
    };

    let mut server = McpServer::with_transport(backend.clone(), quiet_config(), Box::new(transport));
    server.run().await.expect("session completes");

    assert!(!server.is_running());
    assert!(stopped.load(Ordering::SeqCst));
    assert_eq!(backend.startups.load(Ordering::SeqCst), 1);
    assert_eq!(backend.shutdowns.load(Ordering::SeqCst), 1);

    let responses = responses.lock().expect("lock");
    assert_eq!(responses.len(), 3);
    assert_eq!(
        responses[0].result.as_ref().map(|r| r["protocolVersion"].clone()),
        Some(json!("2024-11-05"))
    );
    assert!(responses[1].result.is_some());
    assert_eq!(
        responses[2].error.as_ref().map(|e| e.code),
        Some(ErrorCode::ToolNotFound)
    );
}

#[tokio::test]
async fn test_startup_failure_aborts_run() {
    let backend = MockServerBackend {
        fail_startup: true,
        ..MockServerBackend::default()
    };
    let mut server = McpServer::with_transport(
        backend.clone(),
        quiet_config(),
        Box::new(ScriptedTransport::default()),
    );

    let result = server.run().await;
    assert!(matches!(result, Err(ServerError::Backend(_))));
    assert!(!server.is_running());
    assert_eq!(backend.shutdowns.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_check_reports_components() {
    let backend = MockServerBackend {
        fail_health: true,
        ..MockServerBackend::default()
    };
    let server = McpServer::with_transport(
        backend,
        quiet_config(),
        Box::new(ScriptedTransport::default()),
    );

    let health = server.health_check().await;
    assert_eq!(health.status, "unhealthy");
    assert_eq!(health.components.get("backend"), Some(&false));
    assert_eq!(health.components.get("transport"), Some(&false));
}

#[test]
fn test_server_info_comes_from_backend() {
    let server = McpServer::with_transport(
        MockServerBackend::default(),
        quiet_config(),
        Box::new(ScriptedTransport::default()),
    );
    assert_eq!(server.get_server_info().server_info.name, "Mock Server");
    assert!(!server.config().graceful_shutdown);
}
