//! UHost operations built on [`UHostApi`]
//!
//! These compose single API calls with pagination and filtering so that
//! the MCP layer only deals with finished results.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::client::{DescribeInstancesRequest, UHostApi};
use crate::error::{CoreError, Result};
use crate::pagination::{Page, PaginationConfig, collect_pages};

use super::types::{MetricOverviewResponse, MetricRecord, UHostInstance};

/// Monitoring action that returns per-resource metric overviews
pub const METRIC_OVERVIEW_ACTION: &str = "GetMetricOverview";

/// Resource type tag for UHost instances in the monitoring API
pub const UHOST_RESOURCE_TYPE: &str = "uhost";

/// Fetch a single instance by ID
///
/// Returns [`CoreError::NotFound`] when the API answers with an empty set.
pub async fn describe_instance(api: &dyn UHostApi, instance_id: &str) -> Result<UHostInstance> {
    if instance_id.is_empty() {
        return Err(CoreError::Validation(
            "instance_id must not be empty".to_string(),
        ));
    }

    let response = api
        .describe_instances(DescribeInstancesRequest::by_id(instance_id))
        .await?;

    response
        .uhost_set
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::NotFound(format!("instance {} not found", instance_id)))
}

/// Fetch every instance in the configured region and project
pub async fn list_instances(
    api: &dyn UHostApi,
    pagination: &PaginationConfig,
) -> Result<Vec<UHostInstance>> {
    let instances = collect_pages(pagination, |offset, limit| async move {
        let response = api
            .describe_instances(DescribeInstancesRequest::page(offset, limit))
            .await?;
        Ok::<_, CoreError>(Page::new(response.uhost_set, response.total_count))
    })
    .await?;

    info!(count = instances.len(), "Listed instances");
    Ok(instances)
}

/// Fetch the monitoring samples that belong to one instance
///
/// The monitoring API cannot filter by resource, so every page for the
/// instance's zone is fetched and only records whose `ResourceId` equals the
/// instance ID are kept, in the order received. No matching record yields
/// an empty vector, not an error.
pub async fn instance_metrics(
    api: &dyn UHostApi,
    instance: &UHostInstance,
    pagination: &PaginationConfig,
) -> Result<Vec<MetricRecord>> {
    if instance.uhost_id.is_empty() {
        return Err(CoreError::Validation(
            "instance has no UHostId".to_string(),
        ));
    }

    let zone = instance.zone.as_str();
    let records = collect_pages(pagination, |offset, limit| async move {
        let response = api
            .invoke(METRIC_OVERVIEW_ACTION, metric_overview_payload(zone, offset, limit))
            .await?;
        let overview: MetricOverviewResponse = serde_json::from_value(response)?;
        Ok::<_, CoreError>(Page::new(overview.data_set, overview.total_count))
    })
    .await?;

    let fetched = records.len();
    let matching: Vec<MetricRecord> = records
        .into_iter()
        .filter(|record| record.resource_id == instance.uhost_id)
        .collect();

    debug!(
        instance_id = %instance.uhost_id,
        zone,
        fetched,
        matched = matching.len(),
        "Correlated metrics"
    );

    Ok(matching)
}

fn metric_overview_payload(zone: &str, offset: u32, limit: u32) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("Zone".to_string(), Value::String(zone.to_string()));
    payload.insert(
        "ResourceType".to_string(),
        Value::String(UHOST_RESOURCE_TYPE.to_string()),
    );
    payload.insert("Limit".to_string(), limit.into());
    payload.insert("Offset".to_string(), offset.into());
    payload
}
