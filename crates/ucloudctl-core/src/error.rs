//! Unified error handling for ucloudctl-core
//!
//! Every fallible core operation returns [`CoreError`], with predicate
//! helpers so callers can branch on the kind of failure without matching
//! on variants.
//!
//! # Example
//!
//! ```rust
//! use ucloudctl_core::CoreError;
//!
//! let err = CoreError::NotFound("instance uhost-1 not found".to_string());
//! assert!(err.is_not_found());
//! assert!(!err.is_upstream());
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use crate::path::{MatchError, TemplateError};

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// The requested entity does not exist upstream
    #[error("{0}")]
    NotFound(String),

    /// The transport failed (network, timeout, malformed response)
    #[error("UCloud API request failed: {0}")]
    Upstream(String),

    /// The API answered with a non-zero `RetCode`
    #[error("UCloud API error {code}: {message}")]
    Api { code: i64, message: String },

    /// A path did not conform to its template
    #[error("Path does not match template: {0}")]
    Match(#[from] MatchError),

    /// A template was rejected at registration
    #[error("Invalid path template: {0}")]
    Template(#[from] TemplateError),

    /// A payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The page guard tripped before the upstream signalled the last page
    #[error("Pagination limit exceeded after {pages} pages ({items} items)")]
    PaginationLimitExceeded { pages: usize, items: usize },

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if the requested entity was not found
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }

    /// Returns true if the failure came from the API or its transport
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, CoreError::Upstream(_) | CoreError::Api { .. })
    }

    /// Returns true if a path or template was malformed
    #[must_use]
    pub fn is_match_failure(&self) -> bool {
        matches!(self, CoreError::Match(_) | CoreError::Template(_))
    }

    /// Returns true if this is a configuration error
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Upstream(err.to_string())
    }
}
