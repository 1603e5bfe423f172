//! `echo-scaffolder`: stdio MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use echo_scaffolder::{ScaffolderBackend, catalogue};
use echo_scaffolder_server::{
    LogFormat, LoggingConfig, McpBackend, McpServer, ServerConfig, StdioConfig,
};
use tracing::info;

/// MCP server that returns Echo/GORM/templ scaffolding instructions
#[derive(Debug, Parser)]
#[command(name = "echo-scaffolder", version, about)]
struct Config {
    /// Log filter directive written to stderr, e.g. `info` or `echo_scaffolder=debug`
    #[arg(long, env = "ECHO_SCAFFOLDER_LOG", default_value = "off")]
    log_level: String,

    /// Log line format: pretty, compact or json
    #[arg(long, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Largest accepted request line in bytes
    #[arg(long, default_value_t = StdioConfig::default().max_message_size)]
    max_message_size: usize,

    /// Skip framing and JSON-RPC shape checks on incoming lines
    #[arg(long)]
    no_validate: bool,

    /// Print the tool catalogue as JSON and exit
    #[arg(long)]
    list_tools: bool,
}

impl Config {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            transport_config: StdioConfig {
                max_message_size: self.max_message_size,
                validate_messages: !self.no_validate,
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    if config.list_tools {
        let tools = serde_json::to_string_pretty(&catalogue())
            .context("Failed to serialize tool catalogue")?;
        println!("{tools}");
        return Ok(());
    }

    LoggingConfig::new(config.log_level.clone(), config.log_format)
        .initialize()
        .context("Failed to initialize logging")?;

    let backend = ScaffolderBackend::initialize(()).await?;
    let mut server = McpServer::new(backend, config.server_config())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Echo scaffolder ready on stdio");
    server.run().await?;

    Ok(())
}
