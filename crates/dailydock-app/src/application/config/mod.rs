use std::path::PathBuf;
use std::str::FromStr;

use dailydock_domain::account::parse_credential_list;
use dailydock_domain::redemption::RedemptionPlan;
use dailydock_domain::reporting::RunReporter;
use dailydock_domain::Credential;
use dailydock_infrastructure::config::TimeoutConfig;
use dailydock_infrastructure::http::{RetryPolicy, ServiceEndpoints, DEFAULT_BASE_URL};

pub const ENV_COOKIES: &str = "GLADOS_COOKIES";
pub const ENV_PUSHPLUS_TOKEN: &str = "PUSHPLUS_TOKEN";
pub const ENV_EXCHANGE_PLAN: &str = "GLADOS_EXCHANGE_PLAN";
pub const ENV_BASE_URL: &str = "GLADOS_BASE_URL";
pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_RUNNER_DEBUG: &str = "RUNNER_DEBUG";
pub const ENV_GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
pub const ENV_LOG_DIR: &str = "DAILYDOCK_LOG_DIR";

const CREDENTIAL_DELIMITER: char = '&';

/// Fatal configuration problems, detected before any account runs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingCredentials(&'static str),

    #[error("{0} contains no usable credentials")]
    EmptyCredentials(&'static str),

    #[error("unknown exchange plan '{0}' (expected plan100, plan200 or plan500)")]
    UnknownPlan(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Process-level switches, read before anything else so logging and
/// output framing exist even when the rest of the configuration is broken
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunEnvironment {
    pub debug: bool,
    pub github_actions: bool,
    pub log_dir: Option<PathBuf>,
}

impl RunEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, expected: &str| {
            lookup(key)
                .map(|v| v.trim().eq_ignore_ascii_case(expected))
                .unwrap_or(false)
        };

        Self {
            debug: flag(ENV_DEBUG, "true") || flag(ENV_RUNNER_DEBUG, "1"),
            github_actions: flag(ENV_GITHUB_ACTIONS, "true"),
            log_dir: lookup(ENV_LOG_DIR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Vec<Credential>,
    pub pushplus_token: Option<String>,
    pub plan: RedemptionPlan,
    pub endpoints: ServiceEndpoints,
    pub environment: RunEnvironment,
    pub timeouts: TimeoutConfig,
    pub retry: RetryPolicy,
}

impl AppConfig {
    pub fn from_env(environment: RunEnvironment) -> Result<Self, ConfigError> {
        Self::from_lookup(environment, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(environment: RunEnvironment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_cookies = non_empty(ENV_COOKIES).ok_or(ConfigError::MissingCredentials(ENV_COOKIES))?;
        let credentials = parse_credential_list(&raw_cookies, CREDENTIAL_DELIMITER);
        if credentials.is_empty() {
            return Err(ConfigError::EmptyCredentials(ENV_COOKIES));
        }

        let plan = match non_empty(ENV_EXCHANGE_PLAN) {
            Some(name) => {
                RedemptionPlan::from_str(&name).map_err(|_| ConfigError::UnknownPlan(name))?
            }
            None => RedemptionPlan::default(),
        };

        let base_url = non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoints =
            ServiceEndpoints::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: base_url.clone(),
                reason: format!("{:#}", e),
            })?;

        Ok(Self {
            credentials,
            pushplus_token: non_empty(ENV_PUSHPLUS_TOKEN),
            plan,
            endpoints,
            environment,
            timeouts: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn notifications_enabled(&self) -> bool {
        self.pushplus_token.is_some()
    }

    /// Credentials without a `koa:sess` cookie, as 1-based indices
    pub fn incomplete_credentials(&self) -> Vec<usize> {
        self.credentials
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.has_session_cookie())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Log the effective configuration and flag suspicious credentials
    pub fn report_summary(&self, reporter: &dyn RunReporter) {
        let runtime = if self.environment.github_actions {
            "GitHub Actions"
        } else {
            "local"
        };
        reporter.notice("Environment", &format!("Runtime: {}", runtime));
        reporter.notice(
            "Environment",
            &format!("dailydock {}", env!("CARGO_PKG_VERSION")),
        );

        tracing::info!("📋 Configuration:");
        tracing::info!("   - Accounts: {}", self.credentials.len());
        tracing::info!(
            "   - Exchange plan: {} ({} points)",
            self.plan,
            self.plan.threshold()
        );
        tracing::info!(
            "   - PushPlus: {}",
            if self.notifications_enabled() {
                "✅ enabled"
            } else {
                "❌ disabled"
            }
        );
        if self.endpoints.base().as_str().trim_end_matches('/') != DEFAULT_BASE_URL {
            tracing::info!("   - Base URL: {}", self.endpoints.base());
        }
        if self.environment.debug {
            tracing::info!("   - Debug mode: on");
        }

        for index in self.incomplete_credentials() {
            reporter.warning(&format!(
                "Cookie of account {} may be incomplete (missing koa:sess)",
                index
            ));
        }
    }
}
