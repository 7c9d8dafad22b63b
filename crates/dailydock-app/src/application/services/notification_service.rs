use std::sync::Arc;

use tracing::{error, info};

use dailydock_domain::notification::{NotificationMessage, NotificationSender};
use dailydock_domain::reporting::{GroupGuard, RunReporter};

/// What happened to the run notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// No channel configured
    Skipped,
    Sent,
    Failed(String),
}

/// Delivers the run summary through the configured channel, if any.
/// Delivery problems are reported and never abort the run.
pub struct NotificationService {
    sender: Option<Arc<dyn NotificationSender>>,
    reporter: Arc<dyn RunReporter>,
}

impl NotificationService {
    pub fn new(sender: Option<Arc<dyn NotificationSender>>, reporter: Arc<dyn RunReporter>) -> Self {
        Self { sender, reporter }
    }

    pub async fn deliver(&self, message: &NotificationMessage) -> DeliveryStatus {
        let Some(sender) = &self.sender else {
            info!("📭 PUSHPLUS_TOKEN not set, skipping notification");
            return DeliveryStatus::Skipped;
        };

        let channel = sender.channel_name();
        let _group = GroupGuard::open(
            self.reporter.as_ref(),
            &format!("📤 Sending {} notification", channel),
        );

        match sender.send(message).await {
            Ok(()) => {
                self.reporter
                    .notice("Notification", &format!("{} notification sent", channel));
                info!("✅ {} notification sent", channel);
                DeliveryStatus::Sent
            }
            Err(e) => {
                self.reporter
                    .error(&format!("{} notification failed: {}", channel, e));
                error!("❌ {} notification failed: {}", channel, e.format_with_code());
                DeliveryStatus::Failed(e.to_string())
            }
        }
    }
}
