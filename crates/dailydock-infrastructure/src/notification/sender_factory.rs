use std::sync::Arc;
use std::time::Duration;

use dailydock_domain::notification::NotificationSender;
use dailydock_domain::shared::DomainError;

use super::pushplus::PushPlusSender;

/// Sender for the configured token, or `None` when notifications are off
pub fn create_sender(
    token: Option<&str>,
    timeout: Duration,
) -> Result<Option<Arc<dyn NotificationSender>>, DomainError> {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => Ok(Some(Arc::new(PushPlusSender::new(token, timeout)?))),
        None => Ok(None),
    }
}
