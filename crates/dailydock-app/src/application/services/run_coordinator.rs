use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{error, info};

use dailydock_domain::check_in::AccountResult;
use dailydock_domain::notification::NotificationMessage;
use dailydock_domain::report::AggregateReport;
use dailydock_domain::reporting::{GroupGuard, RunReporter};
use dailydock_domain::Credential;
use dailydock_infrastructure::time::beijing_now;

use super::account_workflow::AccountWorkflow;
use super::notification_service::{DeliveryStatus, NotificationService};
use super::report_formatter::{render_notification, render_table};

/// Processes one account. Errors are isolated per account by the coordinator.
#[async_trait]
pub trait AccountRunner: Send + Sync {
    async fn run_account(&self, index: usize, credential: &Credential) -> Result<AccountResult>;
}

#[async_trait]
impl AccountRunner for AccountWorkflow {
    async fn run_account(&self, index: usize, credential: &Credential) -> Result<AccountResult> {
        Ok(self.run(index, credential).await)
    }
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub report: AggregateReport,
    pub table: String,
    pub notification: NotificationMessage,
    pub delivery: DeliveryStatus,
    pub elapsed: Duration,
}

/// Drives all accounts sequentially, then reports and notifies once
pub struct RunCoordinator {
    runner: Arc<dyn AccountRunner>,
    notifier: NotificationService,
    reporter: Arc<dyn RunReporter>,
    account_pause: Duration,
}

impl RunCoordinator {
    pub fn new(
        runner: Arc<dyn AccountRunner>,
        notifier: NotificationService,
        reporter: Arc<dyn RunReporter>,
        account_pause: Duration,
    ) -> Self {
        Self {
            runner,
            notifier,
            reporter,
            account_pause,
        }
    }

    pub async fn run(&self, credentials: &[Credential]) -> RunSummary {
        let started = Instant::now();
        let results = self.run_accounts(credentials).await;

        let report = AggregateReport::from_results(results);
        let table = render_table(&report);
        self.reporter.print(&table);

        let notification = render_notification(&report, beijing_now());
        {
            let _group = GroupGuard::open(self.reporter.as_ref(), "📱 Notification preview");
            info!("Title: {}", notification.title);
            info!("Content:\n{}", notification.content);
        }

        let delivery = self.notifier.deliver(&notification).await;

        let elapsed = started.elapsed();
        self.reporter.notice(
            "Done",
            &format!("All tasks finished in {:.2}s", elapsed.as_secs_f64()),
        );
        if report.fail_count() > 0 {
            self.reporter
                .warning(&format!("{} account(s) failed", report.fail_count()));
        }

        RunSummary {
            report,
            table,
            notification,
            delivery,
            elapsed,
        }
    }

    async fn run_accounts(&self, credentials: &[Credential]) -> Vec<AccountResult> {
        let mut results = Vec::with_capacity(credentials.len());

        for (position, credential) in credentials.iter().enumerate() {
            let index = position + 1;

            let result = match self.runner.run_account(index, credential).await {
                Ok(result) => result,
                Err(e) => {
                    error!(account = index, "💥 Account {} failed: {:#}", index, e);
                    AccountResult::failed(index, format!("{:#}", e))
                }
            };
            results.push(result);

            if index < credentials.len() {
                sleep(self.account_pause).await;
            }
        }

        results
    }
}
