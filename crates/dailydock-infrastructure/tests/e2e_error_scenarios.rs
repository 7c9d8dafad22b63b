/// E2E Test: Error Scenarios
///
/// Validates how transport and protocol failures surface from the gateway:
/// 1. Non-2xx status (soft failure, never retried)
/// 2. Timeouts (retried up to the attempt limit)
/// 3. Undecodable bodies
/// 4. Connection refused
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dailydock_domain::check_in::{CheckinGateway, GatewayError};
use dailydock_domain::Credential;
use dailydock_infrastructure::config::TimeoutConfig;
use dailydock_infrastructure::http::{GladosGateway, RetryPolicy, ServiceEndpoints};

fn credential() -> Credential {
    Credential::new("koa:sess=abc123").unwrap()
}

fn gateway(base: &str, request_timeout: Duration) -> GladosGateway {
    let endpoints = ServiceEndpoints::parse(base).unwrap();
    let timeouts = TimeoutConfig::new().with_account_request(request_timeout);
    let retry = RetryPolicy::new(3, Duration::from_millis(10));
    GladosGateway::new(endpoints, &timeouts, retry, false).unwrap()
}

#[tokio::test]
async fn e2e_error_non_success_status_is_not_retried() {
    // ============================================================
    // Setup
    // ============================================================
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/checkin"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    // ============================================================
    // One request, absent response
    // ============================================================
    let result = gateway(&server.uri(), Duration::from_secs(2))
        .check_in(&credential())
        .await;

    assert_eq!(result, Ok(None));

    println!("✓ HTTP 500 yields an absent response after exactly one request");
}

#[tokio::test]
async fn e2e_error_timeout_exhausts_retries() {
    // ============================================================
    // Setup
    // ============================================================
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/points"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "points": 1 }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(3)
        .mount(&server)
        .await;

    // ============================================================
    // Every attempt times out
    // ============================================================
    let result = gateway(&server.uri(), Duration::from_millis(100))
        .fetch_points(&credential())
        .await;

    match result {
        Err(GatewayError::CallFailed {
            operation,
            attempts,
            message,
        }) => {
            assert_eq!(operation, "points");
            assert_eq!(attempts, 3);
            assert!(message.contains("timed out"), "unexpected message: {message}");
        }
        other => panic!("Expected CallFailed, got: {other:?}"),
    }

    println!("✓ Timeout retried three times then reported");
}

#[tokio::test]
async fn e2e_error_invalid_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway(&server.uri(), Duration::from_secs(2))
        .fetch_remaining_days(&credential())
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::InvalidResponse { ref operation, .. }) if operation == "status"
    ));

    println!("✓ Undecodable body reported without retry");
}

#[tokio::test]
async fn e2e_error_non_numeric_points() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "points": "many" })))
        .mount(&server)
        .await;

    let result = gateway(&server.uri(), Duration::from_secs(2))
        .fetch_points(&credential())
        .await;

    assert!(matches!(result, Err(GatewayError::InvalidResponse { .. })));

    println!("✓ Non-numeric points rejected");
}

#[tokio::test]
async fn e2e_error_connection_refused() {
    // ============================================================
    // Bind then drop a server so the port is closed
    // ============================================================
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let result = gateway(&uri, Duration::from_secs(1))
        .fetch_points(&credential())
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::CallFailed { attempts: 3, .. })
    ));

    println!("✓ Connection failure retried then reported");
}
