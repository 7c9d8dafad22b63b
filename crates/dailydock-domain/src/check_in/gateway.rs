use async_trait::async_trait;

use crate::account::Credential;
use crate::redemption::RedemptionPlan;

/// Exchange status code the service returns on success
pub const EXCHANGE_OK_CODE: i64 = 0;

/// Body of the check-in endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinResponse {
    pub code: Option<i64>,
    pub message: String,
}

/// Body of the exchange endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResponse {
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl ExchangeResponse {
    pub fn is_ok(&self) -> bool {
        self.code == Some(EXCHANGE_OK_CODE)
    }
}

/// Hard failure of a single remote call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Transport failed on every attempt
    #[error("{operation} failed after {attempts} attempt(s): {message}")]
    CallFailed {
        operation: String,
        attempts: u32,
        message: String,
    },

    /// Request could not be built (e.g. a cookie that is not a valid header)
    #[error("cannot build {operation} request: {message}")]
    InvalidRequest { operation: String, message: String },

    /// Response arrived but could not be decoded
    #[error("invalid {operation} response: {message}")]
    InvalidResponse { operation: String, message: String },
}

/// Remote points service, one method per endpoint.
///
/// `Ok(None)` means the service answered with a non-success HTTP status;
/// callers degrade that step instead of failing. `Err` is reserved for
/// transport exhaustion and undecodable bodies.
#[async_trait]
pub trait CheckinGateway: Send + Sync {
    /// Current point balance, truncated to an integer
    async fn fetch_points(&self, credential: &Credential) -> Result<Option<i64>, GatewayError>;

    async fn check_in(
        &self,
        credential: &Credential,
    ) -> Result<Option<CheckinResponse>, GatewayError>;

    /// Remaining subscription days, truncated to an integer
    async fn fetch_remaining_days(
        &self,
        credential: &Credential,
    ) -> Result<Option<i64>, GatewayError>;

    async fn exchange(
        &self,
        credential: &Credential,
        plan: RedemptionPlan,
    ) -> Result<Option<ExchangeResponse>, GatewayError>;
}
