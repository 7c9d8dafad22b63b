pub mod account_workflow;
pub mod notification_service;
pub mod report_formatter;
pub mod run_coordinator;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_workflow::AccountWorkflow;
pub use notification_service::{DeliveryStatus, NotificationService};
pub use report_formatter::{render_notification, render_table};
pub use run_coordinator::{AccountRunner, RunCoordinator, RunSummary};
