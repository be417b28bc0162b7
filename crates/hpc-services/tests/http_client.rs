use hpc_services::{
    CostService, HttpServiceClient, ServiceError, ServiceRequest, ValidationReport,
    ValidationService, DEFAULT_TIMEOUT,
};
use mockito::Matcher;
use serde_json::json;

const DOC: &str = "blueprint_name: hpc-cluster-example\n";

fn client(server: &mockito::ServerGuard) -> HttpServiceClient {
    HttpServiceClient::new(server.url(), DEFAULT_TIMEOUT).unwrap()
}

#[tokio::test]
async fn validate_posts_document_and_region() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/validate")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "yaml_content": DOC,
            "region": "us-central1",
            "zone": "us-central1-a",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"is_valid": false, "errors": ["machine type unavailable"]}"#)
        .create_async()
        .await;

    let report = client(&server)
        .validate(&ServiceRequest::new(DOC))
        .await
        .unwrap();

    assert_eq!(
        report,
        ValidationReport::invalid(vec!["machine type unavailable".into()])
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn validate_treats_missing_errors_as_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/validate")
        .with_status(200)
        .with_body(r#"{"is_valid": true}"#)
        .create_async()
        .await;

    let report = client(&server)
        .validate(&ServiceRequest::new(DOC))
        .await
        .unwrap();
    assert_eq!(report, ValidationReport::valid());
}

#[tokio::test]
async fn cost_preserves_breakdown_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/cost")
        .match_body(Matcher::PartialJson(json!({"region": "europe-west4"})))
        .with_status(200)
        .with_body(
            r#"{"total_cost": 1234.5, "cost_breakdown": {
                "Compute (CPUs)": 1000.0,
                "Compute (RAM)": 134.5,
                "Accelerators (GPUs)": 0.0,
                "Accelerators (TPUs)": 0.0,
                "Storage": 100.0
            }}"#,
        )
        .create_async()
        .await;

    let request = ServiceRequest::new(DOC).with_location("europe-west4", "europe-west4-b");
    let estimate = client(&server).estimate(&request).await.unwrap();

    assert!((estimate.total_cost - 1234.5).abs() < f64::EPSILON);
    let labels: Vec<_> = estimate.breakdown.keys().map(String::as_str).collect();
    assert_eq!(labels, hpc_services::BREAKDOWN_LABELS.to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/validate")
        .with_status(400)
        .with_body("Invalid YAML content")
        .create_async()
        .await;

    let err = client(&server)
        .validate(&ServiceRequest::new(DOC))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            status: 400,
            body: "Invalid YAML content".into()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_error_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/cost")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = client(&server)
        .estimate(&ServiceRequest::new(DOC))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Status { status: 502, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/cost")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = client(&server)
        .estimate(&ServiceRequest::new(DOC))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Port 9 (discard) is not listening in test environments.
    let client = HttpServiceClient::new("http://127.0.0.1:9", DEFAULT_TIMEOUT).unwrap();
    let err = client.validate(&ServiceRequest::new(DOC)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
    assert!(err.is_retryable());
}
