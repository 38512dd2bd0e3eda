//! UCloud API transport
//!
//! [`UHostApi`] is the seam between the UHost operations and the network.
//! [`UCloudClient`] implements it against the public UCloud endpoint:
//! every action is a JSON `POST` to the base URL carrying `Action`,
//! `Region`, `ProjectId`, `PublicKey` and a request `Signature`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sha1::{Digest, Sha1};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::uhost::DescribeUHostInstanceResponse;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Parameters for `DescribeUHostInstance`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeInstancesRequest {
    /// Restrict to these instance IDs; empty means all instances
    pub ids: Vec<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl DescribeInstancesRequest {
    /// Request a single instance by ID
    pub fn by_id(instance_id: &str) -> Self {
        Self {
            ids: vec![instance_id.to_string()],
            ..Self::default()
        }
    }

    /// Request one page of all instances
    pub fn page(offset: u32, limit: u32) -> Self {
        Self {
            ids: Vec::new(),
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    fn into_payload(self) -> Map<String, Value> {
        let mut payload = Map::new();
        for (i, id) in self.ids.into_iter().enumerate() {
            payload.insert(format!("UHostIds.{}", i), Value::String(id));
        }
        if let Some(offset) = self.offset {
            payload.insert("Offset".to_string(), offset.into());
        }
        if let Some(limit) = self.limit {
            payload.insert("Limit".to_string(), limit.into());
        }
        payload
    }
}

/// Operations the UHost layer needs from the cloud API
#[async_trait]
pub trait UHostApi: Send + Sync {
    /// Call `DescribeUHostInstance`
    async fn describe_instances(
        &self,
        request: DescribeInstancesRequest,
    ) -> Result<DescribeUHostInstanceResponse>;

    /// Call an arbitrary action with a free-form payload, returning the raw response
    async fn invoke(&self, action: &str, payload: Map<String, Value>) -> Result<Value>;
}

/// HTTP client for the UCloud API
#[derive(Clone)]
pub struct UCloudClient {
    http: reqwest::Client,
    config: Config,
}

impl UCloudClient {
    /// Create a client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("ucloudctl/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Region this client targets
    pub fn region(&self) -> &str {
        &self.config.region
    }

    /// Add the common parameters and the signature to an action payload
    fn signed_params(&self, action: &str, mut payload: Map<String, Value>) -> Map<String, Value> {
        payload.insert("Action".to_string(), Value::String(action.to_string()));
        payload
            .entry("Region")
            .or_insert_with(|| Value::String(self.config.region.clone()));
        payload
            .entry("ProjectId")
            .or_insert_with(|| Value::String(self.config.project_id.clone()));
        payload.insert(
            "PublicKey".to_string(),
            Value::String(self.config.public_key.clone()),
        );

        let signature = sign(&payload, &self.config.private_key);
        payload.insert("Signature".to_string(), Value::String(signature));
        payload
    }
}

#[async_trait]
impl UHostApi for UCloudClient {
    async fn describe_instances(
        &self,
        request: DescribeInstancesRequest,
    ) -> Result<DescribeUHostInstanceResponse> {
        let response = self
            .invoke("DescribeUHostInstance", request.into_payload())
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn invoke(&self, action: &str, payload: Map<String, Value>) -> Result<Value> {
        debug!(action, base_url = %self.config.base_url, "POST");

        let params = self.signed_params(action, payload);
        let response = self
            .http
            .post(&self.config.base_url)
            .json(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(action, %status, body = %truncate_for_log(&body), "API error");
            return Err(CoreError::Upstream(format!(
                "{} returned HTTP {}",
                action, status
            )));
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            CoreError::Upstream(format!("{} returned malformed JSON: {}", action, e))
        })?;

        check_ret_code(&value)?;
        Ok(value)
    }
}

/// Turn a non-zero `RetCode` into an error
fn check_ret_code(response: &Value) -> Result<()> {
    let code = response.get("RetCode").and_then(Value::as_i64).unwrap_or(0);
    if code == 0 {
        return Ok(());
    }

    let message = response
        .get("Message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Err(CoreError::Api { code, message })
}

/// Compute the UCloud request signature
///
/// Parameters are sorted by key and concatenated as `key` + `value`, the
/// private key is appended, and the SHA-1 digest is hex encoded.
pub fn sign(params: &Map<String, Value>, private_key: &str) -> String {
    let mut keys: Vec<&String> = params.keys().filter(|k| *k != "Signature").collect();
    keys.sort();

    let mut hasher = Sha1::new();
    for key in keys {
        hasher.update(key.as_bytes());
        hasher.update(param_value(&params[key]).as_bytes());
    }
    hasher.update(private_key.as_bytes());

    hex::encode(hasher.finalize())
}

fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn truncate_for_log(body: &str) -> String {
    if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    }
}
