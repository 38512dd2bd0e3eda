//! Output shapes for instances
//!
//! Raw [`UHostInstance`] records are projected into a small, stable set of
//! fields before they leave the server.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::uhost::{MetricRecord, UHostInstance};

/// Current time in RFC 3339 (UTC, second precision)
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Flattened summary of one instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceView {
    pub id: String,
    pub name: String,
    pub status: String,
    pub ip: String,
    pub zone: String,
    pub cpu: i64,
    pub memory: i64,
    pub disk_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl InstanceView {
    /// Project an instance, optionally attaching its metrics
    ///
    /// Disk size and address come from the first entry of `DiskSet` and
    /// `IPSet`; an empty list gives `0` and `""`. When metrics are supplied
    /// the view is stamped with the current time.
    pub fn build(instance: &UHostInstance, metrics: Option<Vec<MetricRecord>>) -> Self {
        let timestamp = metrics.as_ref().map(|_| timestamp_now());

        Self {
            id: instance.uhost_id.clone(),
            name: instance.name.clone(),
            status: instance.state.clone(),
            ip: primary_ip(instance).to_string(),
            zone: instance.zone.clone(),
            cpu: instance.cpu,
            memory: instance.memory,
            disk_size: primary_disk_size(instance),
            metrics,
            timestamp,
        }
    }
}

/// `{id, name, status}` row for status listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceStatus {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl From<&UHostInstance> for InstanceStatus {
    fn from(instance: &UHostInstance) -> Self {
        Self {
            id: instance.uhost_id.clone(),
            name: instance.name.clone(),
            status: instance.state.clone(),
        }
    }
}

/// Hardware and placement summary inside a [`MetricsReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicInfo {
    pub cpu: i64,
    pub memory: i64,
    pub disk_size: i64,
    pub zone: String,
    pub ip: String,
}

/// Metrics for one instance, as returned by `get_instance_metrics`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub instance_id: String,
    pub name: String,
    pub status: String,
    pub basic_info: BasicInfo,
    pub metrics: Vec<MetricRecord>,
    pub timestamp: String,
}

impl MetricsReport {
    pub fn build(instance: &UHostInstance, metrics: Vec<MetricRecord>) -> Self {
        Self {
            instance_id: instance.uhost_id.clone(),
            name: instance.name.clone(),
            status: instance.state.clone(),
            basic_info: BasicInfo {
                cpu: instance.cpu,
                memory: instance.memory,
                disk_size: primary_disk_size(instance),
                zone: instance.zone.clone(),
                ip: primary_ip(instance).to_string(),
            },
            metrics,
            timestamp: timestamp_now(),
        }
    }
}

/// Whether a listed instance carries everything that was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Complete,
    /// Metrics could not be fetched; the reason is kept for diagnostics
    Degraded(String),
}

/// One entry of a bulk listing
///
/// Only the view is serialized; the enrichment status lets callers tell
/// complete entries from degraded ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedInstance {
    #[serde(flatten)]
    pub view: InstanceView,
    #[serde(skip)]
    pub enrichment: Enrichment,
}

impl ListedInstance {
    pub fn complete(view: InstanceView) -> Self {
        Self {
            view,
            enrichment: Enrichment::Complete,
        }
    }

    pub fn degraded(view: InstanceView, reason: impl Into<String>) -> Self {
        Self {
            view,
            enrichment: Enrichment::Degraded(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.enrichment, Enrichment::Degraded(_))
    }
}

fn primary_ip(instance: &UHostInstance) -> &str {
    instance
        .ip_set
        .first()
        .map(|ip| ip.ip.as_str())
        .unwrap_or_default()
}

fn primary_disk_size(instance: &UHostInstance) -> i64 {
    instance.disk_set.first().map(|d| d.size).unwrap_or(0)
}
