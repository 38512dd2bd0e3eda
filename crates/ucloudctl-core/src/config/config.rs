//! Configuration management for UCloud tools
//!
//! Handles configuration loading from files and environment variables.
//! Files may be TOML (the default `config.toml`) or JSON (`*.json`), and any
//! field left empty in the file is filled from its `UCLOUD_*` variable.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::{ConfigError, Result};

/// Public UCloud API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.ucloud.cn";

const ENV_REGION: &str = "UCLOUD_REGION";
const ENV_PROJECT_ID: &str = "UCLOUD_PROJECT_ID";
const ENV_PUBLIC_KEY: &str = "UCLOUD_PUBLIC_KEY";
const ENV_PRIVATE_KEY: &str = "UCLOUD_PRIVATE_KEY";
const ENV_BASE_URL: &str = "UCLOUD_BASE_URL";

/// Connection settings for the UCloud API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Region the UHost instances live in (e.g. `cn-bj2`)
    #[serde(default)]
    pub region: String,
    /// Project the instances belong to
    #[serde(default)]
    pub project_id: String,
    /// API public key
    #[serde(default)]
    pub public_key: String,
    /// API private key, used only to sign requests
    #[serde(default)]
    pub private_key: String,
    /// API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: String::new(),
            project_id: String::new(),
            public_key: String::new(),
            private_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Build a configuration purely from `UCLOUD_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.fill_missing(|var| std::env::var(var).ok());
        config
    }

    /// Load configuration, falling back to the environment when the file is unusable
    ///
    /// Uses `path` when given, otherwise the platform config location. Any
    /// failure to read or parse the file is logged and the configuration is
    /// built from environment variables instead.
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::config_path(),
        };

        match resolved.and_then(|p| Self::load_from_path(&p)) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to load config file, trying environment variables");
                Self::from_env()
            }
        }
    }

    /// Load configuration from a specific path
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    /// `${VAR}` references in the file are expanded before parsing.
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);

        let is_json = config_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut config: Config = if is_json {
            serde_json::from_str(&expanded_content)?
        } else {
            toml::from_str(&expanded_content)?
        };

        debug!(path = %config_path.display(), "Loaded config file");

        config.fill_missing(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Check that every required field is present
    ///
    /// Reports all missing fields at once rather than the first one found.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.region.is_empty() {
            missing.push("region");
        }
        if self.project_id.is_empty() {
            missing.push("project_id");
        }
        if self.public_key.is_empty() {
            missing.push("public_key");
        }
        if self.private_key.is_empty() {
            missing.push("private_key");
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingFields(missing));
        }

        url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("cn", "ucloud", "ucloudctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Fill empty fields from a variable lookup
    fn fill_missing(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |field: &mut String, var: &str| {
            if field.is_empty()
                && let Some(value) = lookup(var)
            {
                *field = value;
            }
        };

        fill(&mut self.region, ENV_REGION);
        fill(&mut self.project_id, ENV_PROJECT_ID);
        fill(&mut self.public_key, ENV_PUBLIC_KEY);
        fill(&mut self.private_key, ENV_PRIVATE_KEY);

        if self.base_url.is_empty() || self.base_url == DEFAULT_BASE_URL {
            if let Some(url) = lookup(ENV_BASE_URL) {
                self.base_url = url;
            } else if self.base_url.is_empty() {
                self.base_url = default_base_url();
            }
        }
    }

    /// Expand environment variables in configuration content
    ///
    /// Supports `${VAR}` and `${VAR:-default}`. Unknown variables are left
    /// as-is so that the per-field fallback can still apply.
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
