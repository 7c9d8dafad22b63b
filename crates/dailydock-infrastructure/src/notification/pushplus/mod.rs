mod message_builder;
mod sender;

use reqwest::Client;
use std::time::Duration;

use dailydock_domain::shared::DomainError;

pub const PUSHPLUS_ENDPOINT: &str = "http://www.pushplus.plus/send";

/// PushPlus `send` API, plain-text template
pub struct PushPlusSender {
    token: String,
    endpoint: String,
    client: Client,
}

impl PushPlusSender {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(DomainError::InvalidInput(
                "PushPlus token must not be empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DomainError::Infrastructure(format!("Failed to create PushPlus client: {}", e))
        })?;

        Ok(Self {
            token,
            endpoint: PUSHPLUS_ENDPOINT.to_string(),
            client,
        })
    }

    /// Point the sender at another URL (local test servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
