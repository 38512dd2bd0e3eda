//! MCP (Model Context Protocol) server for UCloud UHost instances
//!
//! This crate exposes UHost instance lookup, listing, status and monitoring
//! metrics as MCP tools, resources and prompts.
//!
//! ## Binary Usage
//!
//! ```bash
//! # Stdio transport (for desktop MCP clients)
//! ucloudctl-mcp --config ~/.config/ucloudctl/config.toml
//!
//! # HTTP transport (for shared deployments)
//! ucloudctl-mcp --transport http --port 8080
//! ```
//!
//! ## Library Usage
//!
//! You can also embed the tools in your own MCP server:
//!
//! ```no_run
//! use std::sync::Arc;
//! use ucloudctl_core::PaginationConfig;
//! use ucloudctl_mcp::{AppState, tools};
//! use tower_mcp::McpRouter;
//!
//! let state = Arc::new(AppState::new(None, PaginationConfig::default()));
//!
//! let router = McpRouter::new()
//!     .tool(tools::uhost::describe_instance(state.clone()))
//!     .tool(tools::uhost::instance_status(state));
//! ```

use std::sync::Arc;

use tower_mcp::McpRouter;

pub mod error;
pub mod prompts;
pub mod resources;
pub mod state;
pub mod tools;

pub use error::McpError;
pub use state::AppState;

/// Name reported in the MCP server info
pub const SERVER_NAME: &str = "ucloudctl-mcp";

const INSTRUCTIONS_HEADER: &str = r#"UCloud UHost MCP Server

This server provides tools for inspecting UCloud UHost instances: their
configuration, lifecycle state and monitoring metrics.

## Available Tools
"#;

const INSTRUCTIONS_FOOTER: &str = r#"
## Resources

- uhost://instances lists every instance
- uhost://instances/{instance_id}/status returns one instance's state
- uhost://help describes the tools, prompts and configuration

## Authentication

Credentials are read from the ucloudctl config file, with UCLOUD_* environment
variables filling any missing field.
"#;

/// Build the MCP router with every tool, resource and prompt
///
/// Fails if a resource template cannot be registered.
pub fn build_router(state: Arc<AppState>) -> Result<McpRouter, McpError> {
    let mut instructions = String::from(INSTRUCTIONS_HEADER);
    instructions.push_str(tools::uhost::instructions());
    instructions.push_str(INSTRUCTIONS_FOOTER);

    Ok(McpRouter::new()
        .server_info(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .merge(tools::uhost::router(state.clone()))
        .merge(resources::router(state)?)
        .merge(prompts::router())
        .instructions(&instructions))
}
