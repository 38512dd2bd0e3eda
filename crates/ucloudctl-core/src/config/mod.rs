//! Configuration for the UCloud API connection
//!
//! Settings are read from a TOML or JSON file, with every field falling back
//! to its `UCLOUD_*` environment variable when absent from the file.

#![allow(clippy::module_inception)]

pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{ConfigError, Result};
