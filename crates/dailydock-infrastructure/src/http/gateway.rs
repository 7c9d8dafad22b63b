use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderValue;
use serde_json::{json, Value};
use url::Url;

use dailydock_domain::check_in::{
    CheckinGateway, CheckinResponse, ExchangeResponse, GatewayError,
};
use dailydock_domain::redemption::RedemptionPlan;
use dailydock_domain::Credential;

use super::client::HttpClient;
use super::endpoints::ServiceEndpoints;
use super::retry::RetryPolicy;
use crate::config::TimeoutConfig;

/// Fixed token the check-in endpoint expects in its body
const CHECKIN_TOKEN: &str = "glados.cloud";

/// `CheckinGateway` over the GLaDOS HTTP API.
///
/// Every call goes through [`RetryPolicy::execute`]; JSON decoding happens
/// after the retry loop so a malformed body is never retried.
pub struct GladosGateway {
    http: HttpClient,
    retry: RetryPolicy,
    endpoints: ServiceEndpoints,
}

impl GladosGateway {
    pub fn new(
        endpoints: ServiceEndpoints,
        timeouts: &TimeoutConfig,
        retry: RetryPolicy,
        debug_bodies: bool,
    ) -> Result<Self> {
        let http = HttpClient::new(timeouts.account_request, endpoints.default_headers()?)?
            .with_debug_bodies(debug_bodies);

        Ok(Self {
            http,
            retry,
            endpoints,
        })
    }

    async fn get_json(
        &self,
        operation: &str,
        url: &Url,
        credential: &Credential,
    ) -> Result<Option<Value>, GatewayError> {
        let cookie = cookie_header(operation, credential)?;
        let body = self
            .retry
            .execute(operation, || self.http.get(url.as_str(), &cookie))
            .await
            .map_err(|e| GatewayError::CallFailed {
                operation: e.operation.clone(),
                attempts: e.attempts,
                message: e.last_error.to_string(),
            })?;

        body.map(|text| decode(operation, &text)).transpose()
    }

    async fn post_json(
        &self,
        operation: &str,
        url: &Url,
        credential: &Credential,
        payload: &Value,
    ) -> Result<Option<Value>, GatewayError> {
        let cookie = cookie_header(operation, credential)?;
        let body = self
            .retry
            .execute(operation, || {
                self.http.post_json(url.as_str(), &cookie, payload)
            })
            .await
            .map_err(|e| GatewayError::CallFailed {
                operation: e.operation.clone(),
                attempts: e.attempts,
                message: e.last_error.to_string(),
            })?;

        body.map(|text| decode(operation, &text)).transpose()
    }
}

#[async_trait]
impl CheckinGateway for GladosGateway {
    async fn fetch_points(&self, credential: &Credential) -> Result<Option<i64>, GatewayError> {
        let Some(data) = self
            .get_json("points", &self.endpoints.points, credential)
            .await?
        else {
            return Ok(None);
        };

        debug!("Points response: {}", data);
        integral_field("points", data.get("points")).map(Some)
    }

    async fn check_in(
        &self,
        credential: &Credential,
    ) -> Result<Option<CheckinResponse>, GatewayError> {
        let payload = json!({ "token": CHECKIN_TOKEN });
        let data = self
            .post_json("checkin", &self.endpoints.checkin, credential, &payload)
            .await?;

        Ok(data.map(|data| {
            debug!("Check-in response: {}", data);
            CheckinResponse {
                code: data.get("code").and_then(Value::as_i64),
                message: data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }
        }))
    }

    async fn fetch_remaining_days(
        &self,
        credential: &Credential,
    ) -> Result<Option<i64>, GatewayError> {
        let Some(data) = self
            .get_json("status", &self.endpoints.status, credential)
            .await?
        else {
            return Ok(None);
        };

        let left_days = data.get("data").and_then(|d| d.get("leftDays"));
        integral_field("status", left_days).map(Some)
    }

    async fn exchange(
        &self,
        credential: &Credential,
        plan: RedemptionPlan,
    ) -> Result<Option<ExchangeResponse>, GatewayError> {
        let payload = json!({ "planType": plan.as_str() });
        let data = self
            .post_json("exchange", &self.endpoints.exchange, credential, &payload)
            .await?;

        Ok(data.map(|data| {
            debug!("Exchange response: {}", data);
            ExchangeResponse {
                code: data.get("code").and_then(Value::as_i64),
                message: data
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }
        }))
    }
}

fn cookie_header(operation: &str, credential: &Credential) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(credential.expose()).map_err(|_| GatewayError::InvalidRequest {
        operation: operation.to_string(),
        message: format!("credential {} is not a valid header value", credential),
    })
}

fn decode(operation: &str, text: &str) -> Result<Value, GatewayError> {
    serde_json::from_str(text).map_err(|e| GatewayError::InvalidResponse {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Numeric field that may arrive as a number or a numeric string, possibly
/// fractional. Truncated toward zero; a missing field reads as 0.
fn integral_field(operation: &str, value: Option<&Value>) -> Result<i64, GatewayError> {
    let invalid = |raw: &Value| GatewayError::InvalidResponse {
        operation: operation.to_string(),
        message: format!("expected a number, got {}", raw),
    };

    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .ok_or_else(|| invalid(&Value::String(s.clone()))),
        Some(other) => Err(invalid(other)),
    }
}
