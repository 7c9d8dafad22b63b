/// E2E Test: Gateway against a local HTTP server
///
/// Walks the endpoint sequence of one account:
/// 1. Points query
/// 2. Check-in
/// 3. Status (remaining days)
/// 4. Exchange
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dailydock_domain::check_in::{classify, CheckinGateway, CheckinOutcome};
use dailydock_domain::redemption::RedemptionPlan;
use dailydock_domain::Credential;
use dailydock_infrastructure::config::TimeoutConfig;
use dailydock_infrastructure::http::{GladosGateway, RetryPolicy, ServiceEndpoints};

const COOKIE: &str = "koa:sess=abc123; koa:sess.sig=xyz";

fn gateway_for(server: &MockServer) -> GladosGateway {
    let endpoints = ServiceEndpoints::parse(&server.uri()).unwrap();
    let timeouts = TimeoutConfig::new().with_account_request(Duration::from_secs(2));
    let retry = RetryPolicy::new(3, Duration::from_millis(10));
    GladosGateway::new(endpoints, &timeouts, retry, true).unwrap()
}

#[tokio::test]
async fn e2e_gateway_full_account_sequence() {
    // ============================================================
    // Setup
    // ============================================================
    let server = MockServer::start().await;
    let credential = Credential::new(COOKIE).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/user/points"))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "points": "510.0000" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/user/checkin"))
        .and(header("cookie", COOKIE))
        .and(body_json(json!({ "token": "glados.cloud" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 0, "message": "Checkin! Got 5 Points" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "leftDays": "42.5" } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/user/exchange"))
        .and(body_json(json!({ "planType": "plan500" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    // ============================================================
    // Step 1: Points
    // ============================================================
    let points = gateway.fetch_points(&credential).await.unwrap();
    assert_eq!(points, Some(510));
    println!("✓ Step 1: Points parsed from fractional string");

    // ============================================================
    // Step 2: Check-in
    // ============================================================
    let response = gateway.check_in(&credential).await.unwrap().unwrap();
    assert_eq!(response.code, Some(0));
    assert!(matches!(
        classify(&response),
        CheckinOutcome::Success { .. }
    ));
    println!("✓ Step 2: Check-in classified as success");

    // ============================================================
    // Step 3: Remaining days
    // ============================================================
    let days = gateway.fetch_remaining_days(&credential).await.unwrap();
    assert_eq!(days, Some(42));
    println!("✓ Step 3: Remaining days truncated");

    // ============================================================
    // Step 4: Exchange
    // ============================================================
    let exchange = gateway
        .exchange(&credential, RedemptionPlan::Plan500)
        .await
        .unwrap()
        .unwrap();
    assert!(exchange.is_ok());
    println!("✓ Step 4: Exchange accepted");
}

#[tokio::test]
async fn e2e_gateway_sends_static_headers() {
    let server = MockServer::start().await;
    let credential = Credential::new(COOKIE).unwrap();
    let console = format!("{}/console/checkin", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/user/points"))
        .and(header("origin", server.uri().as_str()))
        .and(header("referer", console.as_str()))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "points": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let points = gateway_for(&server).fetch_points(&credential).await.unwrap();
    assert_eq!(points, Some(7));

    println!("✓ Origin, referer and content-type sent on every call");
}

#[tokio::test]
async fn e2e_gateway_exchange_rejected() {
    let server = MockServer::start().await;
    let credential = Credential::new(COOKIE).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/user/exchange"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 1, "message": "not enough points" })),
        )
        .mount(&server)
        .await;

    let exchange = gateway_for(&server)
        .exchange(&credential, RedemptionPlan::Plan100)
        .await
        .unwrap()
        .unwrap();

    assert!(!exchange.is_ok());
    assert_eq!(exchange.message.as_deref(), Some("not enough points"));

    println!("✓ Rejected exchange keeps the server message");
}
