//! Error types for the MCP server

use thiserror::Error;
use ucloudctl_core::CoreError;

/// Errors that can occur in the MCP server
#[derive(Error, Debug)]
pub enum McpError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// UCloud API error
    #[error("UHost API error: {0}")]
    UHostApi(String),

    /// The requested instance does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tool execution error
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl From<anyhow::Error> for McpError {
    fn from(err: anyhow::Error) -> Self {
        McpError::ToolExecution(format!("{:#}", err))
    }
}

impl From<CoreError> for McpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config(e) => McpError::Configuration(e.to_string()),
            CoreError::Validation(msg) => McpError::InvalidParameters(msg),
            e @ (CoreError::Match(_) | CoreError::Template(_)) => {
                McpError::InvalidParameters(e.to_string())
            }
            CoreError::NotFound(msg) => McpError::NotFound(msg),
            CoreError::Api { code, message } => {
                McpError::UHostApi(format!("UCloud returned RetCode {} ({})", code, message))
            }
            e if e.is_upstream() => McpError::UHostApi(e.to_string()),
            e => McpError::ToolExecution(e.to_string()),
        }
    }
}

impl From<McpError> for tower_mcp::Error {
    fn from(err: McpError) -> Self {
        tower_mcp::Error::tool(err.to_string())
    }
}

impl McpError {
    /// Render with a leading description of the failed operation
    pub fn with_context(&self, context: &str) -> String {
        format!("{}: {}", context, self)
    }
}
