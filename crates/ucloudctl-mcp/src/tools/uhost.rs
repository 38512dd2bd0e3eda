//! UHost instance tools

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tower_mcp::extract::{Json, State};
use tower_mcp::{CallToolResult, McpRouter, Tool, ToolBuilder, ToolError};
use tracing::{info, warn};
use ucloudctl_core::uhost::{self, UHostInstance};
use ucloudctl_core::view::{InstanceStatus, InstanceView, ListedInstance, MetricsReport};
use ucloudctl_core::{PaginationConfig, UHostApi};

use super::{client_error, json_array, operation_error};
use crate::state::AppState;

/// Input for describing a single instance
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DescribeInstanceInput {
    /// UHost instance ID (e.g. uhost-xxxxxxxx)
    pub instance_id: String,
}

/// Build the describe_instance tool
pub fn describe_instance(state: Arc<AppState>) -> Tool {
    ToolBuilder::new("describe_instance")
        .description("Get information about a UCloud instance. Returns JSON with id, name, status, ip, zone, cpu, memory and disk_size.")
        .read_only()
        .idempotent()
        .extractor_handler_typed::<_, _, _, DescribeInstanceInput>(
            state,
            |State(state): State<Arc<AppState>>, Json(input): Json<DescribeInstanceInput>| async move {
                let client = state.uhost_client().await.map_err(client_error)?;

                let instance = uhost::describe_instance(client.as_ref(), &input.instance_id)
                    .await
                    .map_err(|e| {
                        operation_error(
                            &format!("Failed to describe instance {}", input.instance_id),
                            e,
                        )
                    })?;

                CallToolResult::from_serialize(&InstanceView::build(&instance, None))
            },
        )
        .build()
}

/// Input for fetching instance metrics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetInstanceMetricsInput {
    /// UHost instance ID to get metrics for
    pub instance_id: String,
}

/// Build the get_instance_metrics tool
pub fn get_instance_metrics(state: Arc<AppState>) -> Tool {
    ToolBuilder::new("get_instance_metrics")
        .description("Get monitoring metrics for a UCloud instance. Returns JSON with basic_info (cpu, memory, disk_size, zone, ip) and the instance's metric samples.")
        .read_only()
        .idempotent()
        .extractor_handler_typed::<_, _, _, GetInstanceMetricsInput>(
            state,
            |State(state): State<Arc<AppState>>, Json(input): Json<GetInstanceMetricsInput>| async move {
                let client = state.uhost_client().await.map_err(client_error)?;

                let instance = uhost::describe_instance(client.as_ref(), &input.instance_id)
                    .await
                    .map_err(|e| {
                        operation_error(&format!("Failed to get instance {}", input.instance_id), e)
                    })?;

                let metrics = uhost::instance_metrics(client.as_ref(), &instance, &state.pagination)
                    .await
                    .map_err(|e| operation_error("Failed to get metrics", e))?;

                if metrics.is_empty() {
                    return Err(ToolError::new("Instance metrics not found").into());
                }

                CallToolResult::from_serialize(&MetricsReport::build(&instance, metrics))
            },
        )
        .build()
}

/// Input for tools that take no arguments
///
/// Older clients send a placeholder `random_string`; it is accepted and ignored.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgsInput {
    /// Placeholder for clients that cannot call a tool without arguments
    #[serde(default)]
    pub random_string: Option<String>,
}

/// Build the instance_status tool
pub fn instance_status(state: Arc<AppState>) -> Tool {
    ToolBuilder::new("instance_status")
        .description("Get the current status of every UCloud instance. Returns a JSON array of {id, name, status}.")
        .read_only()
        .idempotent()
        .extractor_handler_typed::<_, _, _, NoArgsInput>(
            state,
            |State(state): State<Arc<AppState>>, Json(_input): Json<NoArgsInput>| async move {
                let client = state.uhost_client().await.map_err(client_error)?;

                let instances = uhost::list_instances(client.as_ref(), &state.pagination)
                    .await
                    .map_err(|e| operation_error("Failed to list instances", e))?;

                let statuses: Vec<InstanceStatus> =
                    instances.iter().map(InstanceStatus::from).collect();

                json_array(&statuses)
            },
        )
        .build()
}

/// Build the instance_list tool
pub fn instance_list(state: Arc<AppState>) -> Tool {
    ToolBuilder::new("instance_list")
        .description("List all UCloud instances with their monitoring metrics. Instances whose metrics cannot be fetched are listed without them.")
        .read_only()
        .idempotent()
        .extractor_handler_typed::<_, _, _, NoArgsInput>(
            state,
            |State(state): State<Arc<AppState>>, Json(_input): Json<NoArgsInput>| async move {
                let client = state.uhost_client().await.map_err(client_error)?;

                let instances = uhost::list_instances(client.as_ref(), &state.pagination)
                    .await
                    .map_err(|e| operation_error("Failed to list instances", e))?;

                let listed =
                    list_with_metrics(client.as_ref(), &instances, &state.pagination).await;

                json_array(&listed)
            },
        )
        .build()
}

/// Attach metrics to each instance, degrading per instance on failure
///
/// Instances are enriched one at a time, in listing order.
pub async fn list_with_metrics(
    api: &dyn UHostApi,
    instances: &[UHostInstance],
    pagination: &PaginationConfig,
) -> Vec<ListedInstance> {
    let mut listed = Vec::with_capacity(instances.len());

    for instance in instances {
        let entry = match uhost::instance_metrics(api, instance, pagination).await {
            Ok(metrics) => ListedInstance::complete(InstanceView::build(instance, Some(metrics))),
            Err(e) => {
                warn!(
                    instance_id = %instance.uhost_id,
                    error = %e,
                    "Failed to get metrics, listing instance without them"
                );
                ListedInstance::degraded(InstanceView::build(instance, None), e.to_string())
            }
        };
        listed.push(entry);
    }

    let degraded = listed.iter().filter(|l| l.is_degraded()).count();
    info!(count = listed.len(), degraded, "Listed instances with metrics");

    listed
}

/// Build an MCP sub-router containing all UHost tools
pub fn router(state: Arc<AppState>) -> McpRouter {
    McpRouter::new()
        .tool(describe_instance(state.clone()))
        .tool(get_instance_metrics(state.clone()))
        .tool(instance_status(state.clone()))
        .tool(instance_list(state))
}

/// Instructions fragment describing the UHost tools
pub fn instructions() -> &'static str {
    r#"
### UHost Instances
- describe_instance: Summary of one instance (id, name, status, ip, zone, cpu, memory, disk_size)
- get_instance_metrics: Monitoring samples for one instance plus its basic info
- instance_status: {id, name, status} for every instance
- instance_list: Every instance with its monitoring samples attached
"#
}
