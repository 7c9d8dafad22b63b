use async_trait::async_trait;
use log::debug;

use dailydock_domain::notification::{NotificationMessage, NotificationSender};
use dailydock_domain::shared::DomainError;

/// PushPlus reports success in the body, independent of the HTTP status
const PUSHPLUS_OK_CODE: i64 = 200;

#[async_trait]
impl NotificationSender for super::PushPlusSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        let payload = self.build_payload(message);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::Notification(format!("Failed to send PushPlus notification: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Notification(format!(
                "PushPlus failed with status {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            DomainError::Notification(format!("Failed to parse PushPlus response: {}", e))
        })?;
        debug!("PushPlus response: {}", body);

        match body.get("code").and_then(|c| c.as_i64()) {
            Some(PUSHPLUS_OK_CODE) => Ok(()),
            code => {
                let msg = body
                    .get("msg")
                    .and_then(|m| m.as_str())
                    .unwrap_or("Unknown error");
                Err(DomainError::Notification(format!(
                    "PushPlus error code {}: {}",
                    code.map_or_else(|| "missing".to_string(), |c| c.to_string()),
                    msg
                )))
            }
        }
    }

    fn channel_name(&self) -> &'static str {
        "PushPlus"
    }
}
