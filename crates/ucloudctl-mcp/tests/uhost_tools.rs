//! Integration tests for UHost MCP tools using a mock UCloud API

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower_mcp::{CallToolResult, Tool};
use ucloudctl_core::{Config, PaginationConfig};
use ucloudctl_mcp::resources;
use ucloudctl_mcp::state::AppState;
use ucloudctl_mcp::tools::uhost;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c: &tower_mcp::Content| c.as_text())
        .unwrap_or_default()
        .to_string()
}

/// Helper to call a tool and get JSON result
async fn call_tool_json(tool: &Tool, input: Value) -> Value {
    let result = tool.call(input).await;
    assert!(!result.is_error, "unexpected tool error: {}", result_text(&result));
    serde_json::from_str(&result_text(&result)).expect("valid JSON response")
}

/// Helper to call a tool that must fail and get the error text
async fn call_tool_error(tool: &Tool, input: Value) -> String {
    let result = tool.call(input).await;
    assert!(result.is_error, "expected tool error, got: {}", result_text(&result));
    result_text(&result)
}

/// Read the status template for one instance the way the router would
async fn read_status(state: Arc<AppState>, instance_id: &str) -> tower_mcp::Result<String> {
    let template = resources::instance_status_template(state).unwrap();
    let uri = format!("uhost://instances/{}/status", instance_id);
    let vars = template.match_uri(&uri).expect("uri fits template");

    let result = template.read(&uri, vars).await?;
    assert_eq!(result.contents[0].uri, uri);
    Ok(result.contents[0].text.clone().unwrap_or_default())
}

fn state_for(server: &MockServer) -> Arc<AppState> {
    let config = Config {
        region: "cn-bj2".to_string(),
        project_id: "org-test".to_string(),
        public_key: "test-pub".to_string(),
        private_key: "test-priv".to_string(),
        base_url: server.uri(),
        timeout_secs: 5,
    };
    Arc::new(AppState::with_config(
        None,
        config,
        PaginationConfig::default(),
    ))
}

fn instance_json(id: &str, name: &str, state: &str, zone: &str) -> Value {
    json!({
        "UHostId": id,
        "Name": name,
        "State": state,
        "Zone": zone,
        "CPU": 2,
        "Memory": 4096,
        "DiskSet": [
            {"DiskId": "bsi-sys", "Type": "CLOUD_SSD", "Size": 40, "IsBoot": "True"},
            {"DiskId": "bsi-data", "Type": "CLOUD_SSD", "Size": 200, "IsBoot": "False"}
        ],
        "IPSet": [{"IP": "10.9.0.11", "Type": "Private", "Default": "true"}]
    })
}

fn metric_json(resource_id: &str, cpu: f64) -> Value {
    json!({
        "ResourceId": resource_id,
        "CPUUtilization": cpu,
        "IORead": 1.0,
        "IOWrite": 2.0,
        "DiskReadOps": 3.0,
        "DiskWriteOps": 4.0,
        "NICIn": 5.0,
        "NICOut": 6.0,
        "NetPacketIn": 7.0,
        "NetPacketOut": 8.0,
        "Name": "web-1",
        "PrivateIp": "10.9.0.11",
        "CreateTime": 1700000000
    })
}

async fn mock_describe(server: &MockServer, instances: Vec<Value>) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"Action": "DescribeUHostInstance"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RetCode": 0,
            "Action": "DescribeUHostInstanceResponse",
            "TotalCount": instances.len(),
            "UHostSet": instances
        })))
        .mount(server)
        .await;
}

async fn mock_metrics(server: &MockServer, zone: &str, records: Vec<Value>) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"Action": "GetMetricOverview", "Zone": zone})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RetCode": 0,
            "Action": "GetMetricOverviewResponse",
            "ResourceType": "uhost",
            "TotalCount": records.len(),
            "DataSet": records
        })))
        .mount(server)
        .await;
}

// ============================================================================
// describe_instance
// ============================================================================

#[tokio::test]
async fn test_describe_instance() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Running", "cn-bj2-02")],
    )
    .await;

    let tool = uhost::describe_instance(state_for(&server));
    let result = call_tool_json(&tool, json!({"instance_id": "uhost-1"})).await;

    assert_eq!(
        result,
        json!({
            "id": "uhost-1",
            "name": "web-1",
            "status": "Running",
            "ip": "10.9.0.11",
            "zone": "cn-bj2-02",
            "cpu": 2,
            "memory": 4096,
            "disk_size": 40
        })
    );
}

#[tokio::test]
async fn test_describe_instance_not_found() {
    let server = MockServer::start().await;
    mock_describe(&server, vec![]).await;

    let tool = uhost::describe_instance(state_for(&server));
    let text = call_tool_error(&tool, json!({"instance_id": "uhost-missing"})).await;

    assert!(text.contains("Failed to describe instance uhost-missing"));
    assert!(text.contains("Not found: instance uhost-missing not found"));
}

#[tokio::test]
async fn test_describe_instance_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RetCode": 171,
            "Message": "Signature VerifyAC Error"
        })))
        .mount(&server)
        .await;

    let tool = uhost::describe_instance(state_for(&server));
    let text = call_tool_error(&tool, json!({"instance_id": "uhost-1"})).await;

    assert!(text.contains("RetCode 171"));
}

#[tokio::test]
async fn test_missing_credentials_give_remediation() {
    let state = Arc::new(AppState::with_config(
        None,
        Config::default(),
        PaginationConfig::default(),
    ));

    let tool = uhost::describe_instance(state);
    let text = call_tool_error(&tool, json!({"instance_id": "uhost-1"})).await;

    assert!(text.contains("credentials are incomplete"));
    assert!(text.contains("UCLOUD_PRIVATE_KEY"));
}

// ============================================================================
// get_instance_metrics
// ============================================================================

#[tokio::test]
async fn test_get_instance_metrics() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Running", "cn-bj2-02")],
    )
    .await;
    mock_metrics(
        &server,
        "cn-bj2-02",
        vec![
            metric_json("uhost-1", 12.5),
            metric_json("uhost-2", 99.0),
            metric_json("uhost-1", 14.0),
        ],
    )
    .await;

    let tool = uhost::get_instance_metrics(state_for(&server));
    let result = call_tool_json(&tool, json!({"instance_id": "uhost-1"})).await;

    assert_eq!(result["instance_id"], "uhost-1");
    assert_eq!(result["name"], "web-1");
    assert_eq!(result["status"], "Running");
    assert_eq!(
        result["basic_info"],
        json!({"cpu": 2, "memory": 4096, "disk_size": 40, "zone": "cn-bj2-02", "ip": "10.9.0.11"})
    );

    let metrics = result["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0]["CPUUtilization"], 12.5);
    assert_eq!(metrics[1]["CPUUtilization"], 14.0);
    assert_eq!(metrics[0]["NetPacketOut"], 8.0);
    assert!(result["timestamp"].is_string());
}

#[tokio::test]
async fn test_get_instance_metrics_none_matching() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Running", "cn-bj2-02")],
    )
    .await;
    mock_metrics(&server, "cn-bj2-02", vec![metric_json("uhost-2", 1.0)]).await;

    let tool = uhost::get_instance_metrics(state_for(&server));
    let text = call_tool_error(&tool, json!({"instance_id": "uhost-1"})).await;

    assert!(text.contains("Instance metrics not found"));
}

#[tokio::test]
async fn test_get_instance_metrics_tolerates_null_samples() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Running", "cn-bj2-02")],
    )
    .await;

    let mut other = metric_json("uhost-2", 0.0);
    other["CPUUtilization"] = Value::Null;
    let mut own = metric_json("uhost-1", 0.0);
    own["NICIn"] = Value::Null;
    mock_metrics(&server, "cn-bj2-02", vec![other, own]).await;

    let tool = uhost::get_instance_metrics(state_for(&server));
    let result = call_tool_json(&tool, json!({"instance_id": "uhost-1"})).await;

    let metrics = result["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0]["NICIn"], 0.0);
    assert_eq!(metrics[0]["NICOut"], 6.0);
}

// ============================================================================
// instance_status / instance_list
// ============================================================================

#[tokio::test]
async fn test_instance_status_accepts_placeholder_argument() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![
            instance_json("uhost-1", "web-1", "Running", "cn-bj2-02"),
            instance_json("uhost-2", "db-1", "Stopped", "cn-bj2-03"),
        ],
    )
    .await;

    let tool = uhost::instance_status(state_for(&server));
    let result = call_tool_json(&tool, json!({"random_string": "dummy"})).await;

    assert_eq!(
        result,
        json!([
            {"id": "uhost-1", "name": "web-1", "status": "Running"},
            {"id": "uhost-2", "name": "db-1", "status": "Stopped"}
        ])
    );
}

#[tokio::test]
async fn test_instance_list_degrades_when_metrics_fail() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![
            instance_json("uhost-1", "web-1", "Running", "cn-bj2-02"),
            instance_json("uhost-2", "db-1", "Running", "cn-bj2-03"),
        ],
    )
    .await;
    mock_metrics(&server, "cn-bj2-02", vec![metric_json("uhost-1", 3.0)]).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"Action": "GetMetricOverview", "Zone": "cn-bj2-03"})))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tool = uhost::instance_list(state_for(&server));
    let result = call_tool_json(&tool, json!({})).await;

    let list = result.as_array().unwrap();
    assert_eq!(list.len(), 2);

    assert_eq!(list[0]["id"], "uhost-1");
    assert_eq!(list[0]["metrics"].as_array().unwrap().len(), 1);
    assert!(list[0]["timestamp"].is_string());

    assert_eq!(list[1]["id"], "uhost-2");
    assert!(list[1].get("metrics").is_none());
    assert!(list[1].get("timestamp").is_none());
}

#[tokio::test]
async fn test_instance_list_fails_when_listing_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tool = uhost::instance_list(state_for(&server));
    let text = call_tool_error(&tool, json!({})).await;

    assert!(text.contains("Failed to list instances"));
}

// ============================================================================
// Resources
// ============================================================================

#[tokio::test]
async fn test_instances_resource() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Running", "cn-bj2-02")],
    )
    .await;

    let resource = resources::instances_resource(state_for(&server));
    assert_eq!(resource.uri, "uhost://instances");

    let result = resource.read().await;
    let text = result.contents[0].text.as_ref().unwrap();
    let views: Value = serde_json::from_str(text).unwrap();

    assert_eq!(views[0]["id"], "uhost-1");
    assert_eq!(views[0]["disk_size"], 40);
    assert!(views[0].get("metrics").is_none());
}

#[tokio::test]
async fn test_instance_status_template_read() {
    let server = MockServer::start().await;
    mock_describe(
        &server,
        vec![instance_json("uhost-1", "web-1", "Stopped", "cn-bj2-02")],
    )
    .await;

    let text = read_status(state_for(&server), "uhost-1").await.unwrap();
    let body: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(body, json!({"status": "Stopped"}));
}

#[tokio::test]
async fn test_instance_status_template_not_found_is_error() {
    let server = MockServer::start().await;
    mock_describe(&server, vec![]).await;

    let err = read_status(state_for(&server), "uhost-missing")
        .await
        .unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("failed to describe instance"));
    assert!(msg.contains("Not found: instance uhost-missing not found"));
}
