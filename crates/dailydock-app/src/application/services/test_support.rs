//! Shared doubles for service tests

use async_trait::async_trait;
use mockall::mock;
use std::sync::Mutex;

use dailydock_domain::check_in::{CheckinGateway, CheckinResponse, ExchangeResponse, GatewayError};
use dailydock_domain::notification::{NotificationMessage, NotificationSender};
use dailydock_domain::redemption::RedemptionPlan;
use dailydock_domain::reporting::RunReporter;
use dailydock_domain::shared::DomainError;
use dailydock_domain::Credential;

mock! {
    pub Gateway {}

    #[async_trait]
    impl CheckinGateway for Gateway {
        async fn fetch_points(&self, credential: &Credential) -> Result<Option<i64>, GatewayError>;
        async fn check_in(&self, credential: &Credential) -> Result<Option<CheckinResponse>, GatewayError>;
        async fn fetch_remaining_days(&self, credential: &Credential) -> Result<Option<i64>, GatewayError>;
        async fn exchange(&self, credential: &Credential, plan: RedemptionPlan) -> Result<Option<ExchangeResponse>, GatewayError>;
    }
}

mock! {
    pub Sender {}

    #[async_trait]
    impl NotificationSender for Sender {
        async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError>;
        fn channel_name(&self) -> &'static str;
    }
}

/// Reporter that records every call as a flat string
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl RunReporter for RecordingReporter {
    fn group(&self, title: &str) {
        self.push(format!("group:{title}"));
    }

    fn end_group(&self) {
        self.push("endgroup".to_string());
    }

    fn notice(&self, title: &str, message: &str) {
        self.push(format!("notice:{title}:{message}"));
    }

    fn warning(&self, message: &str) {
        self.push(format!("warning:{message}"));
    }

    fn error(&self, message: &str) {
        self.push(format!("error:{message}"));
    }

    fn debug(&self, message: &str) {
        self.push(format!("debug:{message}"));
    }

    fn print(&self, text: &str) {
        self.push(format!("print:{text}"));
    }
}

pub fn checkin_reply(code: i64, message: &str) -> Result<Option<CheckinResponse>, GatewayError> {
    Ok(Some(CheckinResponse {
        code: Some(code),
        message: message.to_string(),
    }))
}

pub fn exchange_reply(
    code: i64,
    message: Option<&str>,
) -> Result<Option<ExchangeResponse>, GatewayError> {
    Ok(Some(ExchangeResponse {
        code: Some(code),
        message: message.map(str::to_string),
    }))
}

/// What the gateway reports once every retry has failed
pub fn exhausted(operation: &str) -> GatewayError {
    GatewayError::CallFailed {
        operation: operation.to_string(),
        attempts: 3,
        message: "request timed out".to_string(),
    }
}
