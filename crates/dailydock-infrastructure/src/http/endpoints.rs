use anyhow::{Context, Result};
use reqwest::header;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://glados.cloud";

const CHECKIN_PATH: &str = "/api/user/checkin";
const STATUS_PATH: &str = "/api/user/status";
const POINTS_PATH: &str = "/api/user/points";
const EXCHANGE_PATH: &str = "/api/user/exchange";
const CONSOLE_PATH: &str = "/console/checkin";

/// Absolute URLs of the account endpoints, derived from one base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    base: Url,
    pub checkin: Url,
    pub status: Url,
    pub points: Url,
    pub exchange: Url,
    console: Url,
}

impl ServiceEndpoints {
    pub fn new(base: Url) -> Result<Self> {
        let join = |path: &str| {
            base.join(path)
                .with_context(|| format!("Invalid endpoint path {} for base {}", path, base))
        };

        Ok(Self {
            checkin: join(CHECKIN_PATH)?,
            status: join(STATUS_PATH)?,
            points: join(POINTS_PATH)?,
            exchange: join(EXCHANGE_PATH)?,
            console: join(CONSOLE_PATH)?,
            base,
        })
    }

    pub fn parse(base: &str) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
        Self::new(base)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Static headers the service expects on every call
    pub fn default_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_str(self.console.as_str())?,
        );
        headers.insert(
            header::ORIGIN,
            header::HeaderValue::from_str(&self.base.origin().ascii_serialization())?,
        );
        Ok(headers)
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::parse(DEFAULT_BASE_URL).expect("Failed to parse default base URL")
    }
}
