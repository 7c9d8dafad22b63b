use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::Arc;

use dailydock_app::application::config::{AppConfig, RunEnvironment};
use dailydock_app::application::services::{AccountWorkflow, NotificationService, RunCoordinator};
use dailydock_domain::reporting::{GroupGuard, RunReporter};
use dailydock_infrastructure::http::GladosGateway;
use dailydock_infrastructure::logging::{init_logger, LoggingConfig};
use dailydock_infrastructure::notification::create_sender;
use dailydock_infrastructure::reporting::create_reporter;

#[tokio::main]
async fn main() -> ExitCode {
    let environment = RunEnvironment::from_env();

    if let Err(e) = init_logger(LoggingConfig {
        debug: environment.debug,
        log_dir: environment.log_dir.clone(),
    }) {
        eprintln!("Failed to initialize logger: {:#}", e);
    }

    let reporter = create_reporter(environment.github_actions, environment.debug);

    match run(environment, reporter.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("💥 Run aborted: {:#}", e);
            reporter.error(&format!("Run aborted: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(environment: RunEnvironment, reporter: Arc<dyn RunReporter>) -> Result<()> {
    let config = load_config(environment, reporter.as_ref())?;

    let gateway = GladosGateway::new(
        config.endpoints.clone(),
        &config.timeouts,
        config.retry.clone(),
        config.environment.debug,
    )
    .context("Failed to create HTTP gateway")?;

    let sender = create_sender(
        config.pushplus_token.as_deref(),
        config.timeouts.notification_request,
    )
    .context("Failed to create notification sender")?;

    let workflow = AccountWorkflow::new(Arc::new(gateway), reporter.clone(), config.plan);
    let coordinator = RunCoordinator::new(
        Arc::new(workflow),
        NotificationService::new(sender, reporter.clone()),
        reporter,
        config.timeouts.account_pause,
    );

    coordinator.run(&config.credentials).await;
    Ok(())
}

fn load_config(environment: RunEnvironment, reporter: &dyn RunReporter) -> Result<AppConfig> {
    let _group = GroupGuard::open(reporter, "🚀 Initializing configuration");

    let config = AppConfig::from_env(environment).context("Invalid configuration")?;
    config.report_summary(reporter);

    Ok(config)
}
