//! MCP tools for UCloud UHost instances

use serde::Serialize;
use tower_mcp::{CallToolResult, ToolError};
use ucloudctl_core::CoreError;

use crate::error::McpError;

pub mod uhost;

/// Render a JSON array as pretty-printed text content.
///
/// `structuredContent` must be an object, so list results that are returned
/// as bare arrays go out as text instead of through `from_serialize`.
pub fn json_array<T: Serialize>(items: &[T]) -> Result<CallToolResult, tower_mcp::Error> {
    let output = serde_json::to_string_pretty(items)
        .map_err(|e| ToolError::new(format!("Failed to serialize: {}", e)))?;
    Ok(CallToolResult::text(output))
}

/// Format a client creation error with remediation guidance for LLMs.
///
/// Inspects the error chain for the common configuration problems and says
/// which settings or resources to check.
pub fn client_error(err: anyhow::Error) -> ToolError {
    ToolError::new(client_remediation(&err))
}

/// Format a failed UHost operation as a tool error
pub fn operation_error(context: &str, err: CoreError) -> ToolError {
    ToolError::new(operation_message(context, err))
}

fn client_remediation(err: &anyhow::Error) -> String {
    let msg = format!("{:#}", err);
    let err_lower = msg.to_lowercase();

    let mut output = String::new();

    if err_lower.contains("missing required fields") {
        output.push_str("UCloud credentials are incomplete.\n\n");
        output.push_str("Suggested actions:\n");
        output.push_str(
            "- Set region, project_id, public_key and private_key in the config file\n",
        );
        output.push_str(
            "- Or export UCLOUD_REGION, UCLOUD_PROJECT_ID, UCLOUD_PUBLIC_KEY and UCLOUD_PRIVATE_KEY\n",
        );
        output.push_str("- Read uhost://config/path to find the config file location\n");
    } else if err_lower.contains("invalid base url") {
        output.push_str("The configured API endpoint is not a valid URL.\n\n");
        output.push_str("Suggested actions:\n");
        output.push_str("- Fix base_url in the config file or UCLOUD_BASE_URL\n");
        output.push_str("- Remove it to use the public endpoint https://api.ucloud.cn\n");
    } else {
        output.push_str("Failed to initialize the UCloud client.\n\n");
        output.push_str("Suggested actions:\n");
        output.push_str("- Read uhost://config/path to check the config file location\n");
        output.push_str("- Restart the server with --log-level debug for details\n");
    }

    output.push_str(&format!("\nError details: {}", msg));
    output
}

fn operation_message(context: &str, err: CoreError) -> String {
    McpError::from(err).with_context(context)
}
