//! Application state and client construction

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};
use ucloudctl_core::{Config, PaginationConfig, UCloudClient, UHostApi};

/// Shared application state
pub struct AppState {
    /// Explicit config file, if one was given on the command line
    pub config_file: Option<PathBuf>,
    /// Page size and guard used by every listing
    pub pagination: PaginationConfig,
    /// Connection settings, loaded once at startup
    config: Config,
    /// Cached API client
    client: RwLock<Option<Arc<dyn UHostApi>>>,
}

impl AppState {
    /// Create new application state
    ///
    /// Configuration is read from `config_file` when given, otherwise from
    /// the platform config location, with environment variables filling any
    /// gaps. The client itself is created on first use so the server can
    /// start (and list its tools) without credentials.
    pub fn new(config_file: Option<PathBuf>, pagination: PaginationConfig) -> Self {
        let config = Config::load(config_file.as_deref());
        info!(
            region = %config.region,
            project_id = %config.project_id,
            base_url = %config.base_url,
            "Loaded UCloud configuration"
        );

        Self::with_config(config_file, config, pagination)
    }

    /// Create state from an already loaded configuration
    pub fn with_config(
        config_file: Option<PathBuf>,
        config: Config,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            config_file,
            pagination,
            config,
            client: RwLock::new(None),
        }
    }

    /// Create state around an existing API client
    ///
    /// Useful for embedding the tools with a custom transport, and for tests.
    pub fn with_client(client: Arc<dyn UHostApi>, pagination: PaginationConfig) -> Self {
        Self {
            config_file: None,
            pagination,
            config: Config::default(),
            client: RwLock::new(Some(client)),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get or create the UCloud API client
    pub async fn uhost_client(&self) -> Result<Arc<dyn UHostApi>> {
        // Check cache first
        {
            let client = self.client.read().await;
            if let Some(client) = client.as_ref() {
                return Ok(client.clone());
            }
        }

        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client: Arc<dyn UHostApi> = Arc::new(self.create_client()?);
        *slot = Some(client.clone());
        Ok(client)
    }

    fn create_client(&self) -> Result<UCloudClient> {
        debug!(region = %self.config.region, "Creating UCloud client");
        UCloudClient::new(self.config.clone()).context("Failed to build UCloud client")
    }
}
