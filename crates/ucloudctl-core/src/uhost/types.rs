//! UHost API payload types
//!
//! Field names follow the UCloud wire format exactly; consumers of the
//! metrics output depend on them.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A UHost instance as returned by `DescribeUHostInstance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UHostInstance {
    #[serde(rename = "UHostId")]
    pub uhost_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Lifecycle state (`Running`, `Stopped`, `Initializing`, ...)
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zone")]
    pub zone: String,
    /// vCPU count
    #[serde(rename = "CPU")]
    pub cpu: i64,
    /// Memory in MB
    #[serde(rename = "Memory")]
    pub memory: i64,
    #[serde(rename = "DiskSet")]
    pub disk_set: Vec<UHostDisk>,
    #[serde(rename = "IPSet")]
    pub ip_set: Vec<UHostIp>,
    #[serde(rename = "OsName", skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(rename = "ChargeType", skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    #[serde(rename = "Remark", skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(rename = "Tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "CreateTime", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

/// A disk attached to an instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UHostDisk {
    #[serde(rename = "DiskId")]
    pub disk_id: String,
    /// `CLOUD_SSD`, `LOCAL_NORMAL`, ...
    #[serde(rename = "Type")]
    pub disk_type: String,
    /// Size in GB
    #[serde(rename = "Size")]
    pub size: i64,
    /// `"True"` for the system disk
    #[serde(rename = "IsBoot")]
    pub is_boot: String,
}

/// An address bound to an instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UHostIp {
    #[serde(rename = "IP")]
    pub ip: String,
    /// `Private`, `International`, `BGP`, ...
    #[serde(rename = "Type")]
    pub ip_type: String,
    #[serde(rename = "Default")]
    pub default: String,
}

/// Response of `DescribeUHostInstance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeUHostInstanceResponse {
    #[serde(rename = "RetCode")]
    pub ret_code: i64,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "UHostSet")]
    pub uhost_set: Vec<UHostInstance>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u64>,
}

/// One monitoring sample from `GetMetricOverview`
///
/// A `null` in any field decodes as that field's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRecord {
    /// Identifier of the resource this sample describes
    #[serde(rename = "ResourceId", deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(rename = "CPUUtilization", deserialize_with = "null_as_default")]
    pub cpu_utilization: f64,
    #[serde(rename = "IORead", deserialize_with = "null_as_default")]
    pub io_read: f64,
    #[serde(rename = "IOWrite", deserialize_with = "null_as_default")]
    pub io_write: f64,
    #[serde(rename = "DiskReadOps", deserialize_with = "null_as_default")]
    pub disk_read_ops: f64,
    #[serde(rename = "DiskWriteOps", deserialize_with = "null_as_default")]
    pub disk_write_ops: f64,
    #[serde(rename = "NICIn", deserialize_with = "null_as_default")]
    pub nic_in: f64,
    #[serde(rename = "NICOut", deserialize_with = "null_as_default")]
    pub nic_out: f64,
    #[serde(rename = "NetPacketIn", deserialize_with = "null_as_default")]
    pub net_packet_in: f64,
    #[serde(rename = "NetPacketOut", deserialize_with = "null_as_default")]
    pub net_packet_out: f64,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "PrivateIp", deserialize_with = "null_as_default")]
    pub private_ip: String,
    #[serde(rename = "CreateTime", deserialize_with = "null_as_default")]
    pub create_time: i64,
}

/// Response of `GetMetricOverview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricOverviewResponse {
    #[serde(rename = "RetCode")]
    pub ret_code: i64,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "ResourceType")]
    pub resource_type: String,
    #[serde(rename = "DataSet")]
    pub data_set: Vec<MetricRecord>,
    #[serde(rename = "RefreshTime")]
    pub refresh_time: i64,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u64>,
}
