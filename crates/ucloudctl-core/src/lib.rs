//! # ucloudctl-core
//!
//! Shared engine for the UCloud UHost tooling. It holds everything that does
//! not depend on how results are presented:
//!
//! - [`config`]: credentials, region and endpoint, loaded from file or env
//! - [`client`]: the signed JSON transport and the [`UHostApi`] seam
//! - [`pagination`]: offset/limit collection with a page guard
//! - [`path`]: `{placeholder}` path templates
//! - [`uhost`]: instance lookup, listing and metric correlation
//! - [`view`]: the output shapes handed to MCP clients
//!
//! ## Example
//!
//! ```rust,no_run
//! use ucloudctl_core::{Config, PaginationConfig, UCloudClient, uhost};
//!
//! # async fn example() -> ucloudctl_core::Result<()> {
//! let client = UCloudClient::new(Config::from_env())?;
//! let instances = uhost::list_instances(&client, &PaginationConfig::default()).await?;
//! for instance in &instances {
//!     println!("{} {}", instance.uhost_id, instance.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod path;
pub mod uhost;
pub mod view;

pub use client::{DescribeInstancesRequest, UCloudClient, UHostApi};
pub use config::{Config, ConfigError};
pub use error::{CoreError, Result};
pub use pagination::{Page, PaginationConfig, collect_pages};
pub use path::{MatchError, PathTemplate, TemplateError, match_path};
pub use view::{InstanceStatus, InstanceView, ListedInstance, MetricsReport};
