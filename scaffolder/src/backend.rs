//! The scaffolder as an MCP backend

use crate::arguments::ToolArguments;
use crate::error::ScaffolderError;
use crate::tools::{ScaffoldTool, catalogue};
use async_trait::async_trait;
use echo_scaffolder_protocol::*;
use echo_scaffolder_server::McpBackend;
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "Golang Echo Scaffolder Server";

const INSTRUCTIONS: &str = "Returns instructions and Go code templates for scaffolding Echo web \
applications backed by GORM, with templ/templUI views. Nothing is written to disk.";

/// Stateless backend serving the scaffold tools
#[derive(Debug, Clone, Default)]
pub struct ScaffolderBackend;

impl ScaffolderBackend {
    pub fn new() -> Self {
        Self
    }

    /// Run one tool against raw call arguments
    ///
    /// Input problems come back as an error result, not as `Err`.
    pub fn run_tool(&self, tool: ScaffoldTool, arguments: Option<serde_json::Value>) -> CallToolResult {
        let args = ToolArguments::new(arguments);

        match tool.run(&args) {
            Ok(text) => {
                debug!(tool = tool.name(), bytes = text.len(), "Tool produced output");
                CallToolResult::text(text)
            }
            Err(e) => {
                warn!(tool = tool.name(), parameter = e.parameter(), "Invalid tool input: {}", e);
                CallToolResult::error_text(e.to_string())
            }
        }
    }
}

#[async_trait]
impl McpBackend for ScaffolderBackend {
    type Error = ScaffolderError;
    type Config = ();

    async fn initialize(_config: Self::Config) -> std::result::Result<Self, Self::Error> {
        info!("Initializing scaffolder backend");
        Ok(Self::new())
    }

    fn get_server_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::tools_only(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn health_check(&self) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
    ) -> std::result::Result<ListToolsResult, Self::Error> {
        Ok(ListToolsResult {
            tools: catalogue(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> std::result::Result<CallToolResult, Self::Error> {
        let Some(tool) = ScaffoldTool::from_name(&request.name) else {
            warn!(tool = %request.name, "Unknown tool requested");
            return Err(ScaffolderError::UnknownTool(request.name));
        };

        if tool.name() != request.name {
            debug!(alias = %request.name, tool = tool.name(), "Resolved legacy tool name");
        }

        Ok(self.run_tool(tool, request.arguments))
    }
}
