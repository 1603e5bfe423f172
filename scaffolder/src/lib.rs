//! MCP tool server for scaffolding Echo web applications
//!
//! Each tool turns a handful of names into instructional text and Go code
//! templates for an Echo + GORM + templ/templUI project. Nothing is written
//! to disk; the output is meant to be read by an LLM client.
//!
//! ```rust
//! use echo_scaffolder::{ScaffoldTool, ScaffolderBackend};
//! use serde_json::json;
//!
//! let backend = ScaffolderBackend::new();
//! let result = backend.run_tool(
//!     ScaffoldTool::Model,
//!     Some(json!({
//!         "app_name": "shop",
//!         "model_name": "product",
//!         "fields": "[{\"name\":\"price\",\"type\":\"float64\"}]"
//!     })),
//! );
//!
//! assert!(!result.is_error());
//! assert!(result.joined_text().contains("Price float64 `json:\"price\"`"));
//! ```

pub mod arguments;
pub mod backend;
pub mod error;
pub mod fields;
pub mod naming;
pub mod template;
pub mod tools;

pub use arguments::ToolArguments;
pub use backend::{SERVER_NAME, ScaffolderBackend};
pub use error::{InputError, ScaffolderError};
pub use fields::{FieldDescriptor, model_struct, struct_lines};
pub use naming::{lower_case, title_case};
pub use tools::{ScaffoldTool, catalogue};
