//! Protocol types for the Echo scaffolder MCP server
//!
//! JSON-RPC 2.0 envelopes, the subset of Model Context Protocol types a
//! tools-only server needs, and protocol version negotiation.
//!
//! # Quick Start
//!
//! ```rust
//! use echo_scaffolder_protocol::{CallToolResult, Tool};
//! use serde_json::json;
//!
//! let tool = Tool {
//!     name: "app-scaffold".to_string(),
//!     description: "Scaffold a new Echo application".to_string(),
//!     input_schema: json!({
//!         "type": "object",
//!         "properties": { "app_name": { "type": "string" } },
//!         "required": ["app_name"]
//!     }),
//! };
//!
//! let result = CallToolResult::text("# Echo Web Application Scaffold Instructions");
//! assert!(!result.is_error());
//! ```

pub mod error;
pub mod model;


pub use error::{Error, ErrorCode, Result};
pub use model::*;

/// Latest protocol revision this server speaks
pub const MCP_VERSION: &str = "2025-11-25";

/// All protocol revisions accepted from clients, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] =
    &["2025-11-25", "2025-06-18", "2025-03-26", "2024-11-05"];

/// Check if a protocol version is supported
pub fn is_protocol_version_supported(version: &str) -> bool {
    SUPPORTED_PROTOCOL_VERSIONS.contains(&version)
}

/// Pick the protocol version to answer an `initialize` with
///
/// The client's requested version is echoed when supported, otherwise the
/// server proposes its latest and lets the client decide whether to continue.
pub fn negotiate_protocol_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| *v == requested)
        .unwrap_or(MCP_VERSION)
}
