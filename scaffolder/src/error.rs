//! Error types for tool execution

use echo_scaffolder_protocol::Error;
use echo_scaffolder_server::BackendError;
use thiserror::Error;

/// Problems with the arguments of a single tool call
///
/// These never become JSON-RPC errors; the tool answers with an error
/// result whose text is this error's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Error getting '{name}': required argument \"{name}\" not found")]
    MissingParameter { name: String },

    #[error("Error getting '{name}': argument \"{name}\" is not a string")]
    WrongType { name: String },

    #[error("App name is required")]
    AppNameRequired,

    #[error("Invalid '{name}' JSON format: {message}")]
    MalformedInput { name: String, message: String },
}

impl InputError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn wrong_type(name: impl Into<String>) -> Self {
        Self::WrongType { name: name.into() }
    }

    pub fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Argument the error is about
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingParameter { name }
            | Self::WrongType { name }
            | Self::MalformedInput { name, .. } => name,
            Self::AppNameRequired => "app_name",
        }
    }
}

/// Backend error for the scaffolder server
#[derive(Debug, Error)]
pub enum ScaffolderError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<ScaffolderError> for Error {
    fn from(err: ScaffolderError) -> Self {
        match err {
            ScaffolderError::UnknownTool(name) => Error::tool_not_found(name),
            ScaffolderError::Backend(e) => e.into(),
        }
    }
}
