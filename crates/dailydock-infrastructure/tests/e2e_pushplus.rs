/// E2E Test: PushPlus notification delivery
///
/// 1. Accepted message (HTTP 200, code 200)
/// 2. Rejected token (HTTP 200, code != 200)
/// 3. HTTP error status
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dailydock_domain::notification::{NotificationMessage, NotificationSender};
use dailydock_domain::shared::DomainError;
use dailydock_infrastructure::notification::PushPlusSender;

fn sender(server: &MockServer) -> PushPlusSender {
    PushPlusSender::new("token-123", Duration::from_secs(2))
        .unwrap()
        .with_endpoint(format!("{}/send", server.uri()))
}

fn message() -> NotificationMessage {
    NotificationMessage::new("GLaDOS check-in | ✅1 🔁0 ❌0", "[Account 1] ✅ success +5")
}

#[tokio::test]
async fn e2e_pushplus_delivered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_json(json!({
            "token": "token-123",
            "title": "GLaDOS check-in | ✅1 🔁0 ❌0",
            "content": "[Account 1] ✅ success +5",
            "template": "txt",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = sender(&server).send(&message()).await;
    assert!(result.is_ok(), "Expected Ok, got: {result:?}");

    println!("✓ Notification delivered");
}

#[tokio::test]
async fn e2e_pushplus_rejected_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 903, "msg": "invalid token" })),
        )
        .mount(&server)
        .await;

    match sender(&server).send(&message()).await {
        Err(DomainError::Notification(msg)) => {
            assert!(msg.contains("903"));
            assert!(msg.contains("invalid token"));
        }
        other => panic!("Expected Notification error, got: {other:?}"),
    }

    println!("✓ Body code other than 200 reported as failure");
}

#[tokio::test]
async fn e2e_pushplus_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let result = sender(&server).send(&message()).await;
    assert!(matches!(result, Err(DomainError::Notification(_))));

    println!("✓ HTTP error status reported as failure");
}
