//! MCP Prompts for UHost instance workflows

use std::collections::HashMap;

use tower_mcp::Error as McpError;
use tower_mcp::McpRouter;
use tower_mcp::prompt::{Prompt, PromptBuilder};
use tower_mcp::protocol::{Content, GetPromptResult, PromptMessage, PromptRole};

/// Actions understood by the `instance_management` prompt
pub const INSTANCE_ACTIONS: [&str; 3] = ["describe", "list", "get_instance_metrics"];

fn message(role: PromptRole, text: &str) -> PromptMessage {
    PromptMessage {
        role,
        content: Content::Text {
            text: text.to_string(),
            annotations: None,
            meta: None,
        },
        meta: None,
    }
}

/// Conversation opener for one management action
fn instance_management_messages(action: &str) -> Result<Vec<PromptMessage>, McpError> {
    let (user, assistant) = match action {
        "describe" => (
            "I'll help you get information about a UCloud instance.",
            "Please provide the instance ID you want to describe.",
        ),
        "list" => (
            "I'll help you list all your UCloud instances.",
            "I'll show you a list of all instances with their details.",
        ),
        "get_instance_metrics" => (
            "I'll help you get the monitoring metrics for a UCloud instance.",
            "Please provide the instance ID you want to get metrics for.",
        ),
        other => {
            return Err(McpError::tool(format!(
                "unknown action: {} (expected one of: {})",
                other,
                INSTANCE_ACTIONS.join(", ")
            )));
        }
    };

    Ok(vec![
        message(PromptRole::User, user),
        message(PromptRole::Assistant, assistant),
    ])
}

/// Build the instance management prompt
pub fn instance_management_prompt() -> Prompt {
    PromptBuilder::new("instance_management")
        .description("Help with UCloud instance management")
        .required_arg(
            "action",
            "Action to perform (describe, list, get_instance_metrics)",
        )
        .handler(|args: HashMap<String, String>| async move {
            let action = args.get("action").cloned().unwrap_or_default();
            let messages = instance_management_messages(&action)?;

            Ok::<_, McpError>(GetPromptResult {
                description: Some("UCloud Instance Management".to_string()),
                messages,
                meta: None,
            })
        })
        .build()
}

/// Build an MCP sub-router containing all prompts
pub fn router() -> McpRouter {
    McpRouter::new().prompt(instance_management_prompt())
}
