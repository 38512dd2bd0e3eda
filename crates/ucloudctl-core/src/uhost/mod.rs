//! UHost domain: payload types and operations

pub mod operations;
pub mod types;

pub use operations::{
    METRIC_OVERVIEW_ACTION, UHOST_RESOURCE_TYPE, describe_instance, instance_metrics,
    list_instances,
};
pub use types::{
    DescribeUHostInstanceResponse, MetricOverviewResponse, MetricRecord, UHostDisk, UHostInstance,
    UHostIp,
};
