//! MCP Resources for UHost instances
//!
//! Resources expose read-only data that can be fetched by URI.

use std::collections::HashMap;
use std::sync::Arc;

use tower_mcp::McpRouter;
use tower_mcp::protocol::ReadResourceResult;
use tower_mcp::resource::{Resource, ResourceBuilder, ResourceTemplate, ResourceTemplateBuilder};
use tracing::{debug, info};
use ucloudctl_core::path::PathTemplate;
use ucloudctl_core::uhost;
use ucloudctl_core::view::InstanceView;
use ucloudctl_core::{Config, CoreError};

use crate::error::McpError;
use crate::state::AppState;

/// URI of the instance listing resource
pub const INSTANCES_URI: &str = "uhost://instances";

/// URI template of the per-instance status resource
pub const INSTANCE_STATUS_TEMPLATE: &str = "uhost://instances/{instance_id}/status";

fn json_contents(uri: impl Into<String>, text: String) -> ReadResourceResult {
    ReadResourceResult::text_with_mime(uri, text, "application/json")
}

fn core_error(context: &str, err: CoreError) -> tower_mcp::Error {
    tower_mcp::Error::tool(McpError::from(err).with_context(context))
}

/// Build the resource listing every instance (no metrics)
pub fn instances_resource(state: Arc<AppState>) -> Resource {
    ResourceBuilder::new(INSTANCES_URI)
        .name("instance_list")
        .description("List all UCloud instances")
        .mime_type("application/json")
        .handler(move || {
            let state = state.clone();
            async move {
                let client = state.uhost_client().await.map_err(McpError::from)?;

                let instances = uhost::list_instances(client.as_ref(), &state.pagination)
                    .await
                    .map_err(|e| core_error("failed to list instances", e))?;

                for instance in &instances {
                    debug!(
                        instance_id = %instance.uhost_id,
                        name = %instance.name,
                        status = %instance.state,
                        "Found instance"
                    );
                }
                info!(count = instances.len(), "Listed instances");

                let views: Vec<InstanceView> = instances
                    .iter()
                    .map(|instance| InstanceView::build(instance, None))
                    .collect();
                let text = serde_json::to_string_pretty(&views).map_err(|e| {
                    tower_mcp::Error::tool(format!("failed to marshal instance data: {}", e))
                })?;

                Ok::<_, tower_mcp::Error>(json_contents(INSTANCES_URI, text))
            }
        })
        .build()
}

/// Build the per-instance status resource template
///
/// [`INSTANCE_STATUS_TEMPLATE`] is validated here, once; each read matches
/// the requested URI against the parsed template to find the instance ID.
pub fn instance_status_template(state: Arc<AppState>) -> Result<ResourceTemplate, McpError> {
    let template = PathTemplate::parse(INSTANCE_STATUS_TEMPLATE).map_err(CoreError::from)?;

    ResourceTemplateBuilder::new(INSTANCE_STATUS_TEMPLATE)
        .name("instance_status")
        .description("Get the current status of a UCloud instance")
        .mime_type("application/json")
        .try_handler(move |uri: String, _vars: HashMap<String, String>| {
            let state = state.clone();
            let instance_id = instance_id_from_uri(&template, &uri);
            async move {
                let instance_id = instance_id?;
                let client = state.uhost_client().await.map_err(McpError::from)?;

                let instance = uhost::describe_instance(client.as_ref(), &instance_id)
                    .await
                    .map_err(|e| core_error("failed to describe instance", e))?;

                let text = serde_json::json!({ "status": instance.state }).to_string();
                Ok::<_, tower_mcp::Error>(json_contents(uri, text))
            }
        })
        .map_err(|e| McpError::Configuration(format!("invalid resource template: {}", e)))
}

/// Extract `instance_id` from a status URI
pub fn instance_id_from_uri(
    template: &PathTemplate,
    uri: &str,
) -> Result<String, tower_mcp::Error> {
    let variables = template
        .matches(uri)
        .map_err(|e| core_error("failed to parse path", e.into()))?;

    match variables.get("instance_id") {
        Some(id) if !id.is_empty() => Ok(id.clone()),
        _ => Err(
            McpError::InvalidParameters("instance_id not found in path".to_string()).into(),
        ),
    }
}

/// Build a resource exposing the current configuration path
pub fn config_path_resource(state: Arc<AppState>) -> Resource {
    ResourceBuilder::new("uhost://config/path")
        .name("Configuration Path")
        .description("Path to the ucloudctl configuration file")
        .mime_type("text/plain")
        .handler(move || {
            let explicit = state.config_file.clone();
            async move {
                let path = match explicit {
                    Some(p) => p.display().to_string(),
                    None => Config::config_path()
                        .map(|p: std::path::PathBuf| p.display().to_string())
                        .unwrap_or_else(|_| "(no config path available)".to_string()),
                };

                Ok(ReadResourceResult::text("uhost://config/path", path))
            }
        })
        .build()
}

/// Build a resource exposing server instructions/help
pub fn help_resource() -> Resource {
    ResourceBuilder::new("uhost://help")
        .name("Help")
        .description("Usage instructions for the UCloud UHost MCP server")
        .mime_type("text/markdown")
        .text(
            r#"# UCloud UHost MCP Server Help

## Tools

- **describe_instance** `instance_id`: summary of one instance
- **get_instance_metrics** `instance_id`: monitoring samples and basic info
- **instance_status**: id, name and status of every instance
- **instance_list**: every instance with its monitoring samples

## Prompts

- `instance_management` with `action` = `describe`, `list` or `get_instance_metrics`

## Resources

- `uhost://instances` - All instances (no metrics)
- `uhost://instances/{instance_id}/status` - Status of one instance
- `uhost://config/path` - Configuration file location
- `uhost://help` - This help text

## Configuration

Credentials come from the config file (TOML, or JSON when the file ends in
`.json`) with `UCLOUD_REGION`, `UCLOUD_PROJECT_ID`, `UCLOUD_PUBLIC_KEY`,
`UCLOUD_PRIVATE_KEY` and `UCLOUD_BASE_URL` filling any missing field.
"#,
        )
}

/// Build an MCP sub-router containing all resources
pub fn router(state: Arc<AppState>) -> Result<McpRouter, McpError> {
    Ok(McpRouter::new()
        .resource(instances_resource(state.clone()))
        .resource(config_path_resource(state.clone()))
        .resource(help_resource())
        .resource_template(instance_status_template(state)?))
}
